//! # treetable
//!
//! Lossless bidirectional conversion between nested values and flat tables.
//!
//! ## What does it do?
//!
//! A nested document (mappings, sequences, scalars) is flattened into a
//! single rectangular table whose column names are delimiter-joined paths,
//! and the table can be decoded back into the identical document. Nothing
//! structural is stored outside the table itself: sequences announce
//! themselves with a marker column (`path[...]`) whose cells carry group
//! labels, and the decoder recovers nesting and item boundaries purely from
//! the header and those labels.
//!
//! ## Key Features
//!
//! - **Lossless round trip**: flatten then unflatten returns the original
//!   normalized document
//! - **Self-describing tables**: structure is encoded in column names and
//!   group labels, not in side metadata
//! - **Keyed merging**: a second table merges in by correlation columns,
//!   with collision-safe column renames tracked in a [`ColumnMap`]
//! - **Serde Compatible**: host structs convert to trees via
//!   `#[derive(Serialize)]` and [`to_value`]
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! treetable = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Flattening and Round Trips
//!
//! ```rust
//! use treetable::{flatten, unflatten, tree};
//!
//! let doc = tree!({
//!     "name": "Alice",
//!     "address": {"city": "Oslo"},
//!     "pets": [{"kind": "cat"}, {"kind": "dog"}]
//! });
//!
//! let table = flatten(&doc).unwrap();
//! assert_eq!(
//!     table.header(),
//!     &["name", "address.city", "pets[...]", "pets.kind"]
//! );
//! assert_eq!(table.rows().len(), 2);
//!
//! assert_eq!(unflatten(&table).unwrap(), doc);
//! ```
//!
//! ### Keeping Both Forms in Sync
//!
//! [`TreeTable`] holds a tree and its table together and routes merges
//! through the transcoder:
//!
//! ```rust
//! use treetable::{tree, TreeTable};
//!
//! let mut doc = TreeTable::from_tree(tree!({"id": 7, "name": "ada"})).unwrap();
//! doc.merge_tree(&tree!({"id": 7, "score": 97}), &["id"]).unwrap();
//! assert_eq!(doc.tree(), &tree!({"id": 7, "name": "ada", "score": 97}));
//! ```
//!
//! ### Host Types
//!
//! ```rust
//! use serde::Serialize;
//! use treetable::{flatten, to_value};
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u32,
//!     name: String,
//! }
//!
//! let value = to_value(&User { id: 1, name: "ada".to_string() }).unwrap();
//! let table = flatten(&value).unwrap();
//! assert_eq!(table.header(), &["id", "name"]);
//! ```
//!
//! ## Normalization
//!
//! Trees are canonicalized before encoding: nulls are dropped, containers
//! emptied by that pruning are dropped in turn, and booleans become the
//! integers `0`/`1`. Round trips are exact over normalized documents; see
//! [`normalize`].

pub mod decode;
pub mod encode;
pub mod error;
pub mod macros;
pub mod map;
pub mod merge;
pub mod normalize;
pub mod options;
mod path;
pub mod ser;
pub mod table;
pub mod tree_table;
pub mod value;

pub use decode::{unflatten, unflatten_with_options};
pub use encode::{flatten, flatten_with_options};
pub use error::{Error, Result};
pub use map::Map;
pub use merge::merge;
pub use normalize::normalize;
pub use options::Options;
pub use ser::{to_value, ValueSerializer};
pub use table::{ColumnMap, Table};
pub use tree_table::TreeTable;
pub use value::{Number, Value};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_smoke() {
        let doc = tree!({"a": 1, "b": {"c": true}, "xs": [1, 2]});
        let mut normalized = doc.clone();
        normalize(&mut normalized);
        let table = flatten(&normalized).unwrap();
        assert_eq!(unflatten(&table).unwrap(), normalized);
    }

    #[test]
    fn test_error_display() {
        let err = Error::missing_column("id");
        assert!(err.to_string().contains("id"));
    }
}
