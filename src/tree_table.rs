//! A synchronized tree/table pair.
//!
//! [`TreeTable`] holds both forms of one document plus the options and the
//! column aliases accumulated by merges. Every mutation goes through the
//! transcoder, so the two forms never drift apart; the tree side is kept
//! normalized.
//!
//! ## Examples
//!
//! ```rust
//! use treetable::{tree, TreeTable};
//!
//! let doc = TreeTable::from_tree(tree!({"a": 1, "b": {"c": 2}})).unwrap();
//! assert_eq!(doc.table().header(), &["a", "b.c"]);
//!
//! let update = TreeTable::from_tree(tree!({"a": 1, "d": 9})).unwrap();
//! let mut doc = doc;
//! doc.merge_table(update.table(), &["a"]).unwrap();
//! assert_eq!(doc.tree(), &tree!({"a": 1, "b": {"c": 2}, "d": 9}));
//! ```

use crate::table::ColumnMap;
use crate::{
    flatten_with_options, merge, normalize, unflatten_with_options, Options, Result, Table, Value,
};

/// Both forms of one document, kept in sync.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeTable {
    options: Options,
    col_map: ColumnMap,
    tree: Value,
    table: Table,
}

impl TreeTable {
    /// Builds a pair from a tree with default options.
    ///
    /// The tree is normalized before encoding.
    pub fn from_tree(tree: Value) -> Result<Self> {
        Self::from_tree_with_options(tree, Options::default())
    }

    /// Builds a pair from a tree with custom options.
    pub fn from_tree_with_options(mut tree: Value, options: Options) -> Result<Self> {
        options.validate()?;
        normalize(&mut tree);
        let table = flatten_with_options(&tree, &options)?;
        Ok(TreeTable {
            options,
            col_map: ColumnMap::new(),
            tree,
            table,
        })
    }

    /// Builds a pair from a table with default options.
    pub fn from_table(table: Table) -> Result<Self> {
        Self::from_table_with_options(table, Options::default())
    }

    /// Builds a pair from a table with custom options.
    ///
    /// The decoded tree is normalized, so the stored table may differ from
    /// the input where the input carried nulls or empty containers.
    pub fn from_table_with_options(table: Table, options: Options) -> Result<Self> {
        options.validate()?;
        let mut tree = unflatten_with_options(&table, &options)?;
        normalize(&mut tree);
        let table = flatten_with_options(&tree, &options)?;
        Ok(TreeTable {
            options,
            col_map: ColumnMap::new(),
            tree,
            table,
        })
    }

    /// Returns the tree form.
    pub fn tree(&self) -> &Value {
        &self.tree
    }

    /// Returns the table form.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Returns the options both forms were built with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the column aliases accumulated by merges.
    pub fn col_map(&self) -> &ColumnMap {
        &self.col_map
    }

    /// Merges an incoming table into this document, correlating rows on the
    /// given key columns, then rebuilds the tree from the merged table.
    pub fn merge_table(&mut self, new: &Table, correlation: &[&str]) -> Result<()> {
        let mut table = self.table.clone();
        let mut col_map = self.col_map.clone();
        merge(&mut table, new, correlation, &mut col_map)?;
        let mut tree = unflatten_with_options(&table, &self.options)?;
        normalize(&mut tree);
        // Commit only after the merged table decodes cleanly.
        self.table = table;
        self.col_map = col_map;
        self.tree = tree;
        Ok(())
    }

    /// Flattens an incoming tree and merges it, correlating on the given key
    /// columns.
    pub fn merge_tree(&mut self, new: &Value, correlation: &[&str]) -> Result<()> {
        let mut new = new.clone();
        normalize(&mut new);
        let new_table = flatten_with_options(&new, &self.options)?;
        self.merge_table(&new_table, correlation)
    }

    /// Returns a tree with this document's structure but every leaf replaced
    /// by `fill`.
    ///
    /// Useful as a template showing which paths a table's header encodes.
    pub fn empty_structure(&self, fill: Value) -> Result<Value> {
        let rows = vec![vec![fill; self.table.header().len()]];
        let skeleton = Table::new(self.table.header().to_vec(), rows)?;
        unflatten_with_options(&skeleton, &self.options)
    }
}
