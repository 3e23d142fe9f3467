//! Reconstruction of trees from tables.
//!
//! The decoder walks the header left to right, parsing column names back
//! into path segments. Each subtree owns a contiguous block of columns and a
//! span of rows: a mapping's span is the maximum of its children's spans, a
//! sequence's span is the sum of its items' spans. Item boundaries inside a
//! sequence are recovered from the group-label column, whose value is
//! constant across all rows of one item.
//!
//! ## Examples
//!
//! ```rust
//! use treetable::{flatten, unflatten, tree};
//!
//! let value = tree!({"items": [{"id": 1}, {"id": 2}]});
//! let table = flatten(&value).unwrap();
//! assert_eq!(unflatten(&table).unwrap(), value);
//! ```

use crate::path::parse_column;
use crate::{Error, Map, Options, Result, Table, Value};

/// Rebuilds a tree from a table with default options.
pub fn unflatten(table: &Table) -> Result<Value> {
    unflatten_with_options(table, &Options::default())
}

/// Rebuilds a tree from a table with custom options.
///
/// The decoder accounts for every physical row; a leftover or shortfall is
/// reported as [`Error::StructuralMismatch`].
pub fn unflatten_with_options(table: &Table, options: &Options) -> Result<Value> {
    options.validate()?;

    let decoder = Decoder {
        header: table.header(),
        rows: table.rows(),
        options,
    };

    if decoder.header.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    // A root sequence puts its marker in the first column; a scalar document
    // is a single unnamed column with one data row.
    let (value, consumed) = if decoder.header[0] == options.list_suffix {
        let (value, rows_used, _) = decoder.decode_array("", 0, 0)?;
        (value, rows_used)
    } else if decoder.header.len() == 1 && decoder.header[0].is_empty() {
        (decoder.cell(0, 0).clone(), 1)
    } else {
        decoder.decode_object("", 0, 0, decoder.header.len())?
    };

    // A table without data rows reads as one implicit all-null row, so its
    // header still decodes to a structural skeleton.
    let total = decoder.rows.len().max(1);
    if consumed != total {
        return Err(Error::StructuralMismatch { consumed, total });
    }
    Ok(value)
}

struct Decoder<'a> {
    header: &'a [String],
    rows: &'a [Vec<Value>],
    options: &'a Options,
}

const NULL: Value = Value::Null;

impl<'a> Decoder<'a> {
    /// Looks up a cell, treating rows past the end as all-null. Tables with
    /// zero data rows still decode to their structural skeleton.
    fn cell(&self, row: usize, col: usize) -> &Value {
        self.rows.get(row).map_or(&NULL, |r| &r[col])
    }

    /// Decodes the mapping owning `header[col_start..col_end]` starting at
    /// `row`. Returns the value and the number of rows it spans.
    fn decode_object(
        &self,
        prefix: &str,
        row: usize,
        col_start: usize,
        col_end: usize,
    ) -> Result<(Value, usize)> {
        let mut map = Map::new();
        let mut span = 1usize;
        let mut col = col_start;

        while col < col_end {
            let segment = parse_column(&self.header[col], prefix, self.options)
                .ok_or_else(|| Error::missing_column(&self.header[col]))?;

            if segment.is_sequence && !segment.has_children {
                let path = crate::path::child_path(prefix, &segment.key, self.options.path_delimiter);
                let (value, rows_used, next_col) = self.decode_array(&path, row, col)?;
                map.insert(segment.key, value);
                span = span.max(rows_used);
                col = next_col;
            } else if segment.has_children {
                // Find the end of this child's contiguous column block.
                let mut end = col + 1;
                while end < col_end
                    && self.header[end].starts_with(segment.child_prefix.as_str())
                {
                    end += 1;
                }
                let (value, rows_used) =
                    self.decode_object(&segment.child_prefix, row, col, end)?;
                map.insert(segment.key, value);
                span = span.max(rows_used);
                col = end;
            } else {
                map.insert(segment.key, self.cell(row, col).clone());
                col += 1;
            }
        }

        Ok((Value::Object(map), span))
    }

    /// Decodes the sequence whose marker column is `marker_col`. Returns the
    /// value, the rows consumed and the first column past the sequence.
    fn decode_array(
        &self,
        path: &str,
        row: usize,
        marker_col: usize,
    ) -> Result<(Value, usize, usize)> {
        let child_prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{}{}", path, self.options.path_delimiter)
        };

        // Columns owned by the sequence: the exact path (scalar items) or
        // anything under the child prefix (mapping items).
        let mut col_end = marker_col + 1;
        while col_end < self.header.len() {
            let column = &self.header[col_end];
            let owned = column == path
                || (!child_prefix.is_empty() && column.starts_with(child_prefix.as_str()))
                || (child_prefix.is_empty() && !column.is_empty());
            if !owned {
                break;
            }
            col_end += 1;
        }

        let sentinel = self.cell(row, marker_col);
        if sentinel.is_null() {
            // Emptiness sentinel: the sequence occupies one row and no items.
            return Ok((Value::Array(Vec::new()), 1, col_end));
        }
        let sentinel = sentinel.clone();

        let mut items = Vec::new();
        let mut cursor = row;
        while cursor < self.rows.len() && *self.cell(cursor, marker_col) == sentinel {
            let (item, rows_used) = self.decode_item(path, &child_prefix, cursor, marker_col + 1, col_end)?;
            items.push(item);
            cursor += rows_used.max(1);
        }

        Ok((Value::Array(items), cursor - row, col_end))
    }

    fn decode_item(
        &self,
        path: &str,
        child_prefix: &str,
        row: usize,
        col_start: usize,
        col_end: usize,
    ) -> Result<(Value, usize)> {
        if col_start < col_end && self.header[col_start] == path {
            // Scalar items live in a column named exactly like the sequence.
            return Ok((self.cell(row, col_start).clone(), 1));
        }
        self.decode_object(child_prefix, row, col_start, col_end)
    }
}
