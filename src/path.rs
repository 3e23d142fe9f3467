//! Column-path helpers shared by the encoder and decoder.
//!
//! Column names are delimiter-joined paths from the root of the tree; a
//! sequence contributes a group-label column whose name is the sequence's
//! path with the configured suffix appended. The decoder reconstructs
//! structure purely by parsing these names back into segments.

use crate::Options;

/// Joins a parent path and a child key into a column path.
///
/// An empty parent yields the bare key, so root-level keys carry no leading
/// delimiter.
pub(crate) fn child_path(parent: &str, key: &str, delimiter: char) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        let mut path = String::with_capacity(parent.len() + key.len() + 1);
        path.push_str(parent);
        path.push(delimiter);
        path.push_str(key);
        path
    }
}

/// One parsed column under a given prefix.
#[derive(Debug, PartialEq)]
pub(crate) struct Segment {
    /// First path segment below the prefix, with any sequence suffix removed
    pub key: String,
    /// Prefix that columns owned by this segment's subtree start with
    pub child_prefix: String,
    /// Column text after the prefix
    pub remainder: String,
    /// True if the first segment carries the sequence suffix
    pub is_sequence: bool,
    /// True if further segments follow the first
    pub has_children: bool,
}

/// Parses a column name relative to `prefix`.
///
/// Returns `None` when the column is not under the prefix. The prefix is
/// either empty (root) or delimiter-terminated, so a prefix match is exact:
/// `"ab"` is never treated as a child of `"a"`.
pub(crate) fn parse_column(column: &str, prefix: &str, options: &Options) -> Option<Segment> {
    let remainder = column.strip_prefix(prefix)?;
    if remainder.is_empty() {
        return None;
    }

    // The suffix may itself contain the delimiter (the default "[...]" does),
    // so a marker column at this level must be recognized before splitting.
    let (key, is_sequence, has_children) =
        match remainder.strip_suffix(options.list_suffix.as_str()) {
            Some(stem) if !stem.contains(options.path_delimiter) => (stem, true, false),
            _ => {
                let raw_key = match remainder.find(options.path_delimiter) {
                    Some(idx) => &remainder[..idx],
                    None => remainder,
                };
                let has_children = remainder.len() > raw_key.len();
                match raw_key.strip_suffix(options.list_suffix.as_str()) {
                    Some(stripped) => (stripped, true, has_children),
                    None => (raw_key, false, has_children),
                }
            }
        };
    if key.is_empty() {
        return None;
    }

    let mut child_prefix = String::with_capacity(prefix.len() + key.len() + 1);
    child_prefix.push_str(prefix);
    child_prefix.push_str(key);
    child_prefix.push(options.path_delimiter);

    Some(Segment {
        key: key.to_string(),
        child_prefix,
        remainder: remainder.to_string(),
        is_sequence,
        has_children,
    })
}
