//! Keyed merging of one table into another.
//!
//! The merge correlates rows by equality on a set of key columns. Incoming
//! columns absent from the target are appended with null backfill; an
//! incoming column whose name already holds unrelated data displaces that
//! data into an alias column (`"_"` prepended to the name) so the new data
//! can own the original name, and the rename is recorded in the caller's
//! [`ColumnMap`].
//!
//! Per key group: no matching old row inserts the new rows; exactly one old
//! row and one new row overlays in place; anything else replaces the old
//! rows with the old-by-new cross product. The result is sorted by the full
//! row (stable, left to right) so output order is deterministic.

use std::cmp::Ordering;

use crate::table::ColumnMap;
use crate::{Error, Result, Table, Value};

/// Merges `new` into `old`, correlating rows on the `correlation` key
/// columns (logical names, resolved through `col_map` against the old
/// header). Aliases created by this merge are added to `col_map`.
pub fn merge(
    old: &mut Table,
    new: &Table,
    correlation: &[&str],
    col_map: &mut ColumnMap,
) -> Result<()> {
    // Key columns must exist on both sides before anything is mutated.
    let mut old_key_cols = Vec::with_capacity(correlation.len());
    let mut new_key_cols = Vec::with_capacity(correlation.len());
    for key in correlation {
        old_key_cols.push(old.column_index(col_map.resolve(key))?);
        new_key_cols.push(new.column_index(key)?);
    }

    // Reconcile non-key columns: `transfer` maps each incoming column to the
    // old-table column its values land in.
    let mut transfer: Vec<(usize, usize)> = Vec::new();
    for (new_idx, column) in new.header().iter().enumerate() {
        if new_key_cols.contains(&new_idx) {
            continue;
        }
        match old.column_index(column) {
            Ok(old_idx) => {
                // Collision: move the existing data out to an alias so the
                // incoming data owns the original name.
                let alias = format!("_{}", column);
                let alias_idx = old.push_column(alias.clone())?;
                for row in old.rows_mut() {
                    row[alias_idx] = std::mem::take(&mut row[old_idx]);
                }
                col_map.insert(column.clone(), alias);
                transfer.push((new_idx, old_idx));
            }
            Err(_) => {
                let old_idx = old.push_column(column.clone())?;
                transfer.push((new_idx, old_idx));
            }
        }
    }

    let width = old.header().len();
    let mut arena = RowArena::from_rows(std::mem::take(old.rows_mut()));

    // Group incoming rows by key so a multi-row group is handled once. Cells
    // are only PartialEq (floats), so grouping is by linear scan.
    let mut groups: Vec<(Vec<Value>, Vec<usize>)> = Vec::new();
    for (idx, row) in new.rows().iter().enumerate() {
        let key: Vec<Value> = new_key_cols.iter().map(|&c| row[c].clone()).collect();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, indices)) => indices.push(idx),
            None => groups.push((key, vec![idx])),
        }
    }

    for (key, new_indices) in &groups {
        let matches: Vec<usize> = arena
            .live()
            .filter(|&(_, row)| {
                old_key_cols
                    .iter()
                    .zip(key.iter())
                    .all(|(&c, k)| &row[c] == k)
            })
            .map(|(slot, _)| slot)
            .collect();

        if matches.is_empty() {
            for &new_idx in new_indices {
                let mut row = vec![Value::Null; width];
                for (&key_col, key_val) in old_key_cols.iter().zip(key.iter()) {
                    row[key_col] = key_val.clone();
                }
                for &(new_col, old_col) in &transfer {
                    row[old_col] = new.rows()[new_idx][new_col].clone();
                }
                arena.push(row);
            }
        } else if matches.len() == 1 && new_indices.len() == 1 {
            let row = arena
                .get_mut(matches[0])
                .ok_or_else(|| Error::custom("merge slot vacated mid-group"))?;
            for &(new_col, old_col) in &transfer {
                row[old_col] = new.rows()[new_indices[0]][new_col].clone();
            }
        } else {
            // Many-to-many: replace the old group with its cross product
            // against the incoming group.
            let mut taken = Vec::with_capacity(matches.len());
            for &slot in &matches {
                taken.push(
                    arena
                        .take(slot)
                        .ok_or_else(|| Error::custom("merge slot vacated mid-group"))?,
                );
            }
            for old_row in &taken {
                for &new_idx in new_indices {
                    let mut row = old_row.clone();
                    for &(new_col, old_col) in &transfer {
                        row[old_col] = new.rows()[new_idx][new_col].clone();
                    }
                    arena.push(row);
                }
            }
        }
    }

    let mut rows = arena.into_rows();
    rows.sort_by(cmp_rows);
    *old.rows_mut() = rows;
    Ok(())
}

/// Row storage with stable slot indices during a merge.
///
/// Replacing a group must not shift the slots of rows that later groups
/// still need to find, so removal tombstones the slot instead of swapping.
struct RowArena {
    slots: Vec<Option<Vec<Value>>>,
}

impl RowArena {
    fn from_rows(rows: Vec<Vec<Value>>) -> Self {
        RowArena {
            slots: rows.into_iter().map(Some).collect(),
        }
    }

    fn live(&self) -> impl Iterator<Item = (usize, &Vec<Value>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, row)| row.as_ref().map(|r| (slot, r)))
    }

    /// `None` once the slot has been taken. Match sets are computed from
    /// [`live`](Self::live) per group, so callers only see live slots.
    fn get_mut(&mut self, slot: usize) -> Option<&mut Vec<Value>> {
        self.slots.get_mut(slot)?.as_mut()
    }

    fn take(&mut self, slot: usize) -> Option<Vec<Value>> {
        self.slots.get_mut(slot)?.take()
    }

    fn push(&mut self, row: Vec<Value>) {
        self.slots.push(Some(row));
    }

    fn into_rows(self) -> Vec<Vec<Value>> {
        self.slots.into_iter().flatten().collect()
    }
}

fn cmp_rows(a: &Vec<Value>, b: &Vec<Value>) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match cmp_cells(x, y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// Total order over scalar cells: nulls, then booleans, then numbers, then
/// strings; numbers compare by magnitude across integer and float.
fn cmp_cells(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            _ => 3,
        }
    }
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            x.as_f64().partial_cmp(&y.as_f64()).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(header: &[&str], rows: Vec<Vec<Value>>) -> Table {
        Table::new(header.iter().map(|c| c.to_string()).collect(), rows).unwrap()
    }


    #[test]
    fn test_merge_appends_new_column() {
        let mut old = table(
            &["id", "name"],
            vec![vec![Value::from(1), Value::from("ada")]],
        );
        let new = table(
            &["id", "score"],
            vec![vec![Value::from(1), Value::from(97)]],
        );
        let mut col_map = ColumnMap::new();
        merge(&mut old, &new, &["id"], &mut col_map).unwrap();

        assert_eq!(old.header(), &["id", "name", "score"]);
        assert_eq!(
            old.rows(),
            &[vec![Value::from(1), Value::from("ada"), Value::from(97)]]
        );
        assert!(col_map.is_empty());
    }

    #[test]
    fn test_merge_inserts_unmatched_rows() {
        let mut old = table(
            &["id", "name"],
            vec![vec![Value::from(1), Value::from("ada")]],
        );
        let new = table(
            &["id", "name"],
            vec![vec![Value::from(2), Value::from("bob")]],
        );
        let mut col_map = ColumnMap::new();
        merge(&mut old, &new, &["id"], &mut col_map).unwrap();

        assert_eq!(old.len(), 2);
        // "name" collided, so old data moved to the alias column.
        assert_eq!(old.header(), &["id", "name", "_name"]);
        assert_eq!(col_map.resolve("name"), "_name");
        let kept = old.filter_rows(&[("id", Value::from(1))]).unwrap();
        assert_eq!(kept.rows()[0][1], Value::Null);
        assert_eq!(kept.rows()[0][2], Value::from("ada"));
    }

    #[test]
    fn test_merge_collision_displaces_to_alias() {
        let mut old = table(
            &["id", "name"],
            vec![vec![Value::from(1), Value::from("a")]],
        );
        let new = table(
            &["id", "name"],
            vec![vec![Value::from(1), Value::from("b")]],
        );
        let mut col_map = ColumnMap::new();
        merge(&mut old, &new, &["id"], &mut col_map).unwrap();

        assert_eq!(old.header(), &["id", "name", "_name"]);
        assert_eq!(
            old.rows(),
            &[vec![Value::from(1), Value::from("b"), Value::from("a")]]
        );
        assert_eq!(col_map.get("name"), Some("_name"));
    }

    #[test]
    fn test_merge_missing_key_column() {
        let mut old = table(&["id"], vec![vec![Value::from(1)]]);
        let new = table(&["other"], vec![vec![Value::from(1)]]);
        let mut col_map = ColumnMap::new();
        let err = merge(&mut old, &new, &["id"], &mut col_map).unwrap_err();
        assert_eq!(err, crate::Error::MissingColumn("id".to_string()));
        // Nothing was mutated.
        assert_eq!(old.header(), &["id"]);
        assert_eq!(old.len(), 1);
    }

    #[test]
    fn test_merge_many_to_many_cross_product() {
        let mut old = table(
            &["k", "a"],
            vec![
                vec![Value::from(1), Value::from("x")],
                vec![Value::from(1), Value::from("y")],
            ],
        );
        let new = table(
            &["k", "b"],
            vec![
                vec![Value::from(1), Value::from(10)],
                vec![Value::from(1), Value::from(20)],
            ],
        );
        let mut col_map = ColumnMap::new();
        merge(&mut old, &new, &["k"], &mut col_map).unwrap();

        assert_eq!(old.len(), 4);
        for b in [10, 20] {
            for a in ["x", "y"] {
                let pair = old
                    .filter_rows(&[("a", Value::from(a)), ("b", Value::from(b))])
                    .unwrap();
                assert_eq!(pair.len(), 1);
            }
        }
    }

    #[test]
    fn test_merge_mixed_groups_single_pass() {
        // One merge hitting every group branch: in-place overlay (k=1),
        // cross-product replacement (k=2), and insertion (k=3).
        let mut old = table(
            &["k", "a"],
            vec![
                vec![Value::from(1), Value::from("x")],
                vec![Value::from(2), Value::from("y")],
                vec![Value::from(2), Value::from("z")],
            ],
        );
        let new = table(
            &["k", "b"],
            vec![
                vec![Value::from(1), Value::from(10)],
                vec![Value::from(2), Value::from(20)],
                vec![Value::from(2), Value::from(21)],
                vec![Value::from(3), Value::from(30)],
            ],
        );
        let mut col_map = ColumnMap::new();
        merge(&mut old, &new, &["k"], &mut col_map).unwrap();

        assert_eq!(old.header(), &["k", "a", "b"]);
        assert_eq!(
            old.rows(),
            &[
                vec![Value::from(1), Value::from("x"), Value::from(10)],
                vec![Value::from(2), Value::from("y"), Value::from(20)],
                vec![Value::from(2), Value::from("y"), Value::from(21)],
                vec![Value::from(2), Value::from("z"), Value::from(20)],
                vec![Value::from(2), Value::from("z"), Value::from(21)],
                vec![Value::from(3), Value::Null, Value::from(30)],
            ]
        );
        assert!(col_map.is_empty());
    }

    #[test]
    fn test_merge_output_sorted() {
        let mut old = table(&["id"], vec![vec![Value::from(3)]]);
        let new = table(
            &["id"],
            vec![vec![Value::from(1)], vec![Value::from(2)]],
        );
        let mut col_map = ColumnMap::new();
        merge(&mut old, &new, &["id"], &mut col_map).unwrap();
        assert_eq!(
            old.rows(),
            &[
                vec![Value::from(1)],
                vec![Value::from(2)],
                vec![Value::from(3)]
            ]
        );
    }

    #[test]
    fn test_merge_composite_key() {
        let mut old = table(
            &["a", "b", "v"],
            vec![vec![Value::from(1), Value::from(1), Value::from("old")]],
        );
        let new = table(
            &["a", "b", "w"],
            vec![
                vec![Value::from(1), Value::from(1), Value::from("hit")],
                vec![Value::from(1), Value::from(2), Value::from("miss")],
            ],
        );
        let mut col_map = ColumnMap::new();
        merge(&mut old, &new, &["a", "b"], &mut col_map).unwrap();

        assert_eq!(old.len(), 2);
        let hit = old.filter_rows(&[("b", Value::from(1))]).unwrap();
        assert_eq!(hit.rows()[0][2], Value::from("old"));
        assert_eq!(hit.rows()[0][3], Value::from("hit"));
        let miss = old.filter_rows(&[("b", Value::from(2))]).unwrap();
        assert_eq!(miss.rows()[0][2], Value::Null);
        assert_eq!(miss.rows()[0][3], Value::from("miss"));
    }

    #[test]
    fn test_cmp_cells_type_ranking() {
        assert_eq!(cmp_cells(&Value::Null, &Value::from(false)), Ordering::Less);
        assert_eq!(cmp_cells(&Value::from(true), &Value::from(0)), Ordering::Less);
        assert_eq!(cmp_cells(&Value::from(9), &Value::from("a")), Ordering::Less);
        assert_eq!(cmp_cells(&Value::from(1), &Value::from(1.5)), Ordering::Less);
    }
}
