//! Flattening of trees into tables.
//!
//! A mapping contributes one column per scalar leaf, named by the
//! delimiter-joined path from the root. A sequence contributes a group-label
//! column (the sequence's path plus the configured suffix) followed by its
//! item columns, and one physical row per item row; sibling multi-row
//! subtrees combine by cross join.
//!
//! ## Examples
//!
//! ```rust
//! use treetable::{flatten, tree};
//!
//! let value = tree!({"a": 1, "b": {"c": 2}});
//! let table = flatten(&value).unwrap();
//! assert_eq!(table.header(), &["a", "b.c"]);
//! assert_eq!(table.rows().len(), 1);
//! ```

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::path::child_path;
use crate::{Error, Map, Options, Result, Table, Value};

/// Mints group labels for sequence instances.
///
/// The label encodes two ordinals: the order in which the sequence's *path*
/// was first seen, and how many instances of that path have been encoded so
/// far. Every row of one sequence instance shares one label, so the decoder
/// can recover item boundaries by watching the label column change.
struct LabelMinter {
    prefix: String,
    instances: IndexMap<String, usize>,
}

impl LabelMinter {
    fn new(options: &Options) -> Self {
        LabelMinter {
            prefix: options.label_prefix.clone(),
            instances: IndexMap::new(),
        }
    }

    fn mint(&mut self, path: &str) -> String {
        let (ordinal, instance) = match self.instances.entry(path.to_string()) {
            Entry::Occupied(mut entry) => {
                let ordinal = entry.index();
                let count = entry.get_mut();
                *count += 1;
                (ordinal, *count)
            }
            Entry::Vacant(entry) => {
                let ordinal = entry.index();
                entry.insert(0);
                (ordinal, 0)
            }
        };
        format!("{}_{}_{}", self.prefix, ordinal, instance)
    }
}

/// Flattens a tree into a table with default options.
pub fn flatten(value: &Value) -> Result<Table> {
    flatten_with_options(value, &Options::default())
}

/// Flattens a tree into a table with custom options.
///
/// The root may be a mapping, a sequence or a bare scalar; a scalar document
/// becomes a single unnamed column holding one row.
pub fn flatten_with_options(value: &Value, options: &Options) -> Result<Table> {
    options.validate()?;
    let mut minter = LabelMinter::new(options);
    let (header, rows) = flatten_value(value, "", options, &mut minter)?;
    Table::new(header, rows)
}

fn flatten_value(
    value: &Value,
    path: &str,
    options: &Options,
    minter: &mut LabelMinter,
) -> Result<(Vec<String>, Vec<Vec<Value>>)> {
    match value {
        Value::Object(map) => flatten_object(map, path, options, minter),
        Value::Array(items) => flatten_array(items, path, options, minter),
        scalar => Ok((vec![path.to_string()], vec![vec![scalar.clone()]])),
    }
}

fn flatten_object(
    map: &Map,
    path: &str,
    options: &Options,
    minter: &mut LabelMinter,
) -> Result<(Vec<String>, Vec<Vec<Value>>)> {
    let mut header: Vec<String> = Vec::new();
    // One empty row so that the first child has something to extend; an
    // empty mapping therefore yields a single zero-width row.
    let mut rows: Vec<Vec<Value>> = vec![Vec::new()];

    for (key, child) in map {
        let child_path = child_path(path, key, options.path_delimiter);
        let (child_header, child_rows) = flatten_value(child, &child_path, options, minter)?;

        header.extend(child_header);
        if child_rows.len() == 1 {
            let child_row = &child_rows[0];
            for row in &mut rows {
                row.extend(child_row.iter().cloned());
            }
        } else {
            // Multi-row child: cross join with what we have so far.
            let mut joined = Vec::with_capacity(rows.len() * child_rows.len());
            for row in &rows {
                for child_row in &child_rows {
                    let mut combined = row.clone();
                    combined.extend(child_row.iter().cloned());
                    joined.push(combined);
                }
            }
            rows = joined;
        }
    }

    Ok((header, rows))
}

fn flatten_array(
    items: &[Value],
    path: &str,
    options: &Options,
    minter: &mut LabelMinter,
) -> Result<(Vec<String>, Vec<Vec<Value>>)> {
    let label = minter.mint(path);
    let marker = format!("{}{}", path, options.list_suffix);

    let mut header = vec![marker];
    let mut rows: Vec<Vec<Value>> = Vec::new();

    if items.is_empty() {
        // An empty sequence still occupies one row so siblings stay aligned;
        // the null in the marker column is the decoder's emptiness sentinel.
        rows.push(vec![Value::Null]);
        return Ok((header, rows));
    }

    for item in items {
        let (item_header, item_rows) = flatten_value(item, path, options, minter)?;

        if item_header == header[1..] {
            // Same shape as everything so far: append rows directly.
            for mut item_row in item_rows {
                let mut row = Vec::with_capacity(1 + item_row.len());
                row.push(Value::String(label.clone()));
                row.append(&mut item_row);
                rows.push(row);
            }
            continue;
        }

        // Heterogeneous item: widen the header with any new columns, then
        // rebuild every row positionally with null backfill.
        let mut widened = header.clone();
        for column in &item_header {
            if !widened.contains(column) {
                widened.push(column.clone());
            }
        }
        if widened.len() > header.len() {
            let old_header = std::mem::replace(&mut header, widened);
            let mut rebuilt = Vec::with_capacity(rows.len());
            for row in &rows {
                let mut wide = vec![Value::Null; header.len()];
                for (idx, column) in old_header.iter().enumerate() {
                    let pos = header
                        .iter()
                        .position(|c| c == column)
                        .ok_or_else(|| Error::custom("widened header lost a column"))?;
                    wide[pos] = row[idx].clone();
                }
                rebuilt.push(wide);
            }
            rows = rebuilt;
        }

        for item_row in &item_rows {
            let mut row = vec![Value::Null; header.len()];
            row[0] = Value::String(label.clone());
            for (idx, column) in item_header.iter().enumerate() {
                let pos = header
                    .iter()
                    .position(|c| c == column)
                    .ok_or_else(|| Error::custom("widened header lost a column"))?;
                row[pos] = item_row[idx].clone();
            }
            rows.push(row);
        }
    }

    Ok((header, rows))
}
