//! Canonicalization of trees before encoding.
//!
//! Normalization runs post-order: nulls are dropped from mappings and
//! sequences, containers left empty by that pruning are dropped in turn,
//! and booleans are rewritten as the integers `0` and `1` so that cells
//! carry a uniform scalar vocabulary. Normalizing twice is a no-op.

use crate::Value;

/// Normalizes a tree in place.
///
/// ```rust
/// use treetable::{normalize, tree};
///
/// let mut value = tree!({"a": null, "b": {"c": null}, "keep": true});
/// normalize(&mut value);
/// assert_eq!(value, tree!({"keep": 1}));
/// ```
pub fn normalize(value: &mut Value) {
    match value {
        Value::Bool(b) => {
            *value = Value::from(i64::from(*b));
        }
        Value::Object(map) => {
            let keys: Vec<String> = map.keys().cloned().collect();
            for key in keys {
                let drop = match map.get_mut(&key) {
                    Some(child) => {
                        if child.is_null() {
                            true
                        } else {
                            normalize(child);
                            is_empty_container(child)
                        }
                    }
                    None => false,
                };
                if drop {
                    map.shift_remove(&key);
                }
            }
        }
        Value::Array(items) => {
            items.retain_mut(|item| {
                if item.is_null() {
                    return false;
                }
                normalize(item);
                !is_empty_container(item)
            });
        }
        _ => {}
    }
}

fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
