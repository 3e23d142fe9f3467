//! Configuration options for encoding, decoding and merging.
//!
//! [`Options`] uses the builder pattern; a default-constructed value matches
//! the conventional flat-table layout (dot paths, `[...]` sequence marker,
//! `LIST`-prefixed group labels).
//!
//! ```rust
//! use treetable::Options;
//!
//! let options = Options::new()
//!     .with_path_delimiter('/')
//!     .with_label_prefix("GRP");
//! assert!(options.validate().is_ok());
//! ```

use crate::{Error, Result};

/// Configuration for the encoder, decoder and merger.
///
/// All transforms on a single [`TreeTable`](crate::TreeTable) share one
/// `Options` value; decoding a table with different options than it was
/// encoded with is unsupported.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Character joining path segments in column names (default: `'.'`)
    pub path_delimiter: char,
    /// Character separating cells in delimited text renderings (default: `','`)
    pub cell_delimiter: char,
    /// Marker appended to a path to name a sequence's group-label column
    /// (default: `"[...]"`)
    pub list_suffix: String,
    /// Prefix for minted group labels (default: `"LIST"`)
    pub label_prefix: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            path_delimiter: '.',
            cell_delimiter: ',',
            list_suffix: "[...]".to_string(),
            label_prefix: "LIST".to_string(),
        }
    }
}

impl Options {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path delimiter used in column names.
    pub fn with_path_delimiter(mut self, delimiter: char) -> Self {
        self.path_delimiter = delimiter;
        self
    }

    /// Sets the cell delimiter used in delimited text renderings.
    pub fn with_cell_delimiter(mut self, delimiter: char) -> Self {
        self.cell_delimiter = delimiter;
        self
    }

    /// Sets the sequence marker suffix.
    pub fn with_list_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.list_suffix = suffix.into();
        self
    }

    /// Sets the group-label prefix.
    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.label_prefix = prefix.into();
        self
    }

    /// Checks the options for internal consistency.
    ///
    /// The path and cell delimiters must differ, and the suffix and label
    /// prefix must be non-empty; an empty suffix would make every column
    /// look like a sequence marker.
    pub fn validate(&self) -> Result<()> {
        if self.path_delimiter == self.cell_delimiter {
            return Err(Error::config(format!(
                "path delimiter and cell delimiter must differ (both are {:?})",
                self.path_delimiter
            )));
        }
        if self.list_suffix.is_empty() {
            return Err(Error::config("list suffix must not be empty"));
        }
        if self.label_prefix.is_empty() {
            return Err(Error::config("label prefix must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.path_delimiter, '.');
        assert_eq!(options.cell_delimiter, ',');
        assert_eq!(options.list_suffix, "[...]");
        assert_eq!(options.label_prefix, "LIST");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let options = Options::new()
            .with_path_delimiter('/')
            .with_cell_delimiter(';')
            .with_list_suffix("[]")
            .with_label_prefix("GRP");
        assert_eq!(options.path_delimiter, '/');
        assert_eq!(options.cell_delimiter, ';');
        assert_eq!(options.list_suffix, "[]");
        assert_eq!(options.label_prefix, "GRP");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_equal_delimiters_rejected() {
        let options = Options::new().with_cell_delimiter('.');
        assert!(matches!(options.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_suffix_rejected() {
        let options = Options::new().with_list_suffix("");
        assert!(matches!(options.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_label_prefix_rejected() {
        let options = Options::new().with_label_prefix("");
        assert!(matches!(options.validate(), Err(Error::Config(_))));
    }
}
