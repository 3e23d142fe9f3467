//! Error types for the tree/table transcoder.
//!
//! ## Error Categories
//!
//! - **Configuration errors**: bad [`Options`](crate::Options), rejected
//!   eagerly before any transform runs
//! - **Shape errors**: ragged rows or duplicate header columns in a table
//! - **Structural mismatch**: the decoder consumed a different number of rows
//!   than the table physically holds, which means the table was not produced
//!   by this encoder or has been hand-edited inconsistently
//! - **Merge errors**: a correlation column missing from one of the headers
//!
//! There are no retries anywhere: every transform is deterministic, so a
//! failure is surfaced synchronously and retrying the same input is pointless.
//!
//! ## Examples
//!
//! ```rust
//! use treetable::{Options, Error};
//!
//! let options = Options::new().with_path_delimiter(',');
//! match options.validate() {
//!     Err(Error::Config(msg)) => assert!(msg.contains("delimiter")),
//!     other => panic!("expected a configuration error, got {:?}", other),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while transcoding or merging.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Invalid configuration, rejected before any transform runs
    #[error("configuration error: {0}")]
    Config(String),

    /// A header column appears more than once
    #[error("duplicate column {0:?} in table header")]
    DuplicateColumn(String),

    /// A data row does not match the header width
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A column required by a lookup or merge is absent from the header
    #[error("column {0:?} not found in table header")]
    MissingColumn(String),

    /// The decoder could not account for every physical row
    #[error("decoded {consumed} of {total} data rows; table was not produced by this encoder or was edited inconsistently")]
    StructuralMismatch { consumed: usize, total: usize },

    /// Unsupported type at the host-value boundary
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a configuration error.
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Creates a missing-column error.
    pub fn missing_column(column: &str) -> Self {
        Error::MissingColumn(column.to_string())
    }

    /// Creates an unsupported-type error for host values that cannot be
    /// represented as a tree.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treetable::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
