//! The flat table form and column aliasing.
//!
//! A [`Table`] is a header of column names plus rectangular data rows; every
//! cell is a scalar [`Value`] (never a container). [`ColumnMap`] records the
//! renames a merge performs when an incoming column collides with existing
//! data, so callers can resolve a logical column name to its current
//! physical name.

use indexmap::IndexMap;

use crate::{Error, Result, Value};

/// A header plus rectangular rows of scalar cells.
///
/// Construction validates the shape; a `Table` is rectangular and its header
/// is duplicate-free for its whole lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Creates a table, validating that the header has no duplicate columns
    /// and every row matches the header width.
    pub fn new(header: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        for (idx, column) in header.iter().enumerate() {
            if header[..idx].contains(column) {
                return Err(Error::DuplicateColumn(column.clone()));
            }
        }
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != header.len() {
                return Err(Error::RaggedRow {
                    row: idx,
                    expected: header.len(),
                    found: row.len(),
                });
            }
        }
        Ok(Table { header, rows })
    }

    /// Returns the column names.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Returns the data rows.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Vec<Value>> {
        &mut self.rows
    }

    /// Returns the number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the position of a column in the header.
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.header
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| Error::missing_column(column))
    }

    /// Returns one column's cells, top to bottom.
    pub fn column(&self, column: &str) -> Result<Vec<Value>> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(|row| row[idx].clone()).collect())
    }

    /// Returns a new table holding the rows whose cells equal every
    /// `(column, value)` predicate.
    ///
    /// Row order is preserved. An unknown predicate column is an error.
    pub fn filter_rows(&self, predicates: &[(&str, Value)]) -> Result<Table> {
        let mut indexed = Vec::with_capacity(predicates.len());
        for (column, expected) in predicates {
            indexed.push((self.column_index(column)?, expected));
        }
        let rows = self
            .rows
            .iter()
            .filter(|row| indexed.iter().all(|(idx, expected)| &row[*idx] == *expected))
            .cloned()
            .collect();
        Table::new(self.header.clone(), rows)
    }

    /// Returns a new table restricted to the named columns, in the order
    /// given, with fully duplicate projected rows removed (first occurrence
    /// wins).
    pub fn project(&self, columns: &[&str]) -> Result<Table> {
        let mut indices = Vec::with_capacity(columns.len());
        for column in columns {
            indices.push(self.column_index(column)?);
        }
        let header: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        let mut rows: Vec<Vec<Value>> = Vec::new();
        for row in &self.rows {
            let projected: Vec<Value> = indices.iter().map(|&idx| row[idx].clone()).collect();
            if !rows.contains(&projected) {
                rows.push(projected);
            }
        }
        Table::new(header, rows)
    }

    /// Appends a column, filling existing rows with nulls.
    pub(crate) fn push_column(&mut self, column: String) -> Result<usize> {
        if self.header.contains(&column) {
            return Err(Error::DuplicateColumn(column));
        }
        self.header.push(column);
        for row in &mut self.rows {
            row.push(Value::Null);
        }
        Ok(self.header.len() - 1)
    }
}

/// Logical-to-physical column name aliases accumulated by merges.
///
/// When a merge finds that an incoming column name already holds unrelated
/// data, the existing data moves to an alias column and the map records
/// `logical -> alias`. [`resolve`](ColumnMap::resolve) then answers where a
/// logical column's pre-merge data now lives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    aliases: IndexMap<String, String>,
}

impl ColumnMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an alias.
    pub fn insert(&mut self, logical: impl Into<String>, physical: impl Into<String>) {
        self.aliases.insert(logical.into(), physical.into());
    }

    /// Returns the alias for a logical name, if one was recorded.
    pub fn get(&self, logical: &str) -> Option<&str> {
        self.aliases.get(logical).map(String::as_str)
    }

    /// Resolves a logical name to its physical column: the recorded alias,
    /// or the name itself when no rename happened.
    pub fn resolve<'a>(&'a self, logical: &'a str) -> &'a str {
        self.get(logical).unwrap_or(logical)
    }

    /// Returns `true` if an alias is recorded for this logical name.
    pub fn contains_key(&self, logical: &str) -> bool {
        self.aliases.contains_key(logical)
    }

    /// Iterates over `(logical, physical)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of recorded aliases.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Returns `true` if no aliases are recorded.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["id".to_string(), "name".to_string(), "team".to_string()],
            vec![
                vec![Value::from(1), Value::from("ada"), Value::from("red")],
                vec![Value::from(2), Value::from("bob"), Value::from("red")],
                vec![Value::from(3), Value::from("cyd"), Value::from("blue")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_duplicate_columns() {
        let result = Table::new(vec!["a".to_string(), "a".to_string()], vec![]);
        assert_eq!(result, Err(Error::DuplicateColumn("a".to_string())));
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let result = Table::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![Value::from(1)]],
        );
        assert_eq!(
            result,
            Err(Error::RaggedRow {
                row: 0,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_column() {
        let table = sample();
        assert_eq!(
            table.column("id").unwrap(),
            vec![Value::from(1), Value::from(2), Value::from(3)]
        );
        assert!(table.column("missing").is_err());
    }

    #[test]
    fn test_filter_rows() {
        let table = sample();
        let red = table.filter_rows(&[("team", Value::from("red"))]).unwrap();
        assert_eq!(red.header(), table.header());
        assert_eq!(red.len(), 2);
        assert_eq!(red.rows()[0][1], Value::from("ada"));

        let one = table
            .filter_rows(&[("team", Value::from("red")), ("id", Value::from(2))])
            .unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one.rows()[0][1], Value::from("bob"));
    }

    #[test]
    fn test_project_dedups_and_reorders() {
        let table = sample();
        let projected = table.project(&["team", "id"]).unwrap();
        assert_eq!(projected.header(), &["team", "id"]);
        assert_eq!(projected.len(), 3);

        let teams = table.project(&["team"]).unwrap();
        assert_eq!(
            teams.rows(),
            &[vec![Value::from("red")], vec![Value::from("blue")]]
        );
    }

    #[test]
    fn test_push_column_backfills_nulls() {
        let mut table = sample();
        let idx = table.push_column("extra".to_string()).unwrap();
        assert_eq!(idx, 3);
        assert!(table.rows().iter().all(|row| row[3].is_null()));
        assert!(table.push_column("extra".to_string()).is_err());
    }

    #[test]
    fn test_column_map_resolve() {
        let mut map = ColumnMap::new();
        map.insert("name", "_name");
        assert_eq!(map.resolve("name"), "_name");
        assert_eq!(map.resolve("other"), "other");
        assert!(map.contains_key("name"));
        assert_eq!(map.len(), 1);
    }
}
