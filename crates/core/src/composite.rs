//! Composite key codec
//!
//! Secondary indexes are emulated on top of the flat ledger keyspace by
//! encoding `(index_name, components...)` into a single string key:
//!
//! ```text
//! U+0000 index_name U+0000 component_1 U+0000 ... component_n U+0000
//! ```
//!
//! The leading U+0000 puts every composite key in its own namespace below all
//! simple keys (simple keys may not contain U+0000). Because no component may
//! contain U+0000, a prefix built from the first `k` components matches exactly
//! the keys that share those components, and appending U+10FFFF to that prefix
//! gives the exclusive upper bound of a partial-key scan.

use thiserror::Error;

/// Namespace marker and component delimiter
pub const COMPOSITE_DELIMITER: char = '\u{0}';

/// Highest Unicode scalar; upper bound for partial-key scans
pub const MAX_UNICODE_RUNE: char = '\u{10FFFF}';

/// Composite key encoding failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// Index name is empty
    #[error("composite index name cannot be empty")]
    EmptyIndexName,

    /// Index name or component contains U+0000 or U+10FFFF
    #[error("composite key component {component:?} contains a reserved character")]
    ReservedCharacter {
        /// The offending component
        component: String,
    },

    /// Key does not start with the composite namespace marker
    #[error("key {key:?} is not a composite key")]
    NotComposite {
        /// The key that failed to split
        key: String,
    },

    /// Key is missing its trailing delimiter
    #[error("composite key {key:?} is truncated")]
    Truncated {
        /// The key that failed to split
        key: String,
    },
}

fn check_component(component: &str) -> Result<(), EncodingError> {
    if component.contains(COMPOSITE_DELIMITER) || component.contains(MAX_UNICODE_RUNE) {
        return Err(EncodingError::ReservedCharacter {
            component: component.to_string(),
        });
    }
    Ok(())
}

fn check_index_name(index_name: &str) -> Result<(), EncodingError> {
    if index_name.is_empty() {
        return Err(EncodingError::EmptyIndexName);
    }
    check_component(index_name)
}

/// Build a composite key from an index name and its components
///
/// # Examples
///
/// ```
/// use ledgerstore_core::composite::{make_composite_key, split_composite_key};
///
/// let key = make_composite_key("owner~key", &["Tomoko", "CAR0"]).unwrap();
/// let (index, parts) = split_composite_key(&key).unwrap();
/// assert_eq!(index, "owner~key");
/// assert_eq!(parts, vec!["Tomoko".to_string(), "CAR0".to_string()]);
/// ```
pub fn make_composite_key<S: AsRef<str>>(
    index_name: &str,
    components: &[S],
) -> Result<String, EncodingError> {
    check_index_name(index_name)?;
    let mut key = String::with_capacity(
        index_name.len() + 2 + components.iter().map(|c| c.as_ref().len() + 1).sum::<usize>(),
    );
    key.push(COMPOSITE_DELIMITER);
    key.push_str(index_name);
    key.push(COMPOSITE_DELIMITER);
    for component in components {
        let component = component.as_ref();
        check_component(component)?;
        key.push_str(component);
        key.push(COMPOSITE_DELIMITER);
    }
    Ok(key)
}

/// Split a composite key back into its index name and components
///
/// Exact inverse of [`make_composite_key`].
pub fn split_composite_key(key: &str) -> Result<(String, Vec<String>), EncodingError> {
    let body = key
        .strip_prefix(COMPOSITE_DELIMITER)
        .ok_or_else(|| EncodingError::NotComposite {
            key: key.to_string(),
        })?;
    let body = body
        .strip_suffix(COMPOSITE_DELIMITER)
        .ok_or_else(|| EncodingError::Truncated {
            key: key.to_string(),
        })?;

    let mut parts = body.split(COMPOSITE_DELIMITER);
    let index_name = match parts.next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(EncodingError::EmptyIndexName),
    };
    Ok((index_name, parts.map(str::to_string).collect()))
}

/// Half-open key range covering every composite key that starts with
/// `(index_name, components...)`
pub fn partial_key_range<S: AsRef<str>>(
    index_name: &str,
    components: &[S],
) -> Result<(String, String), EncodingError> {
    let start = make_composite_key(index_name, components)?;
    let mut end = start.clone();
    end.push(MAX_UNICODE_RUNE);
    Ok((start, end))
}

/// Returns `true` if `key` lives in the composite namespace
pub fn is_composite_key(key: &str) -> bool {
    key.starts_with(COMPOSITE_DELIMITER)
}
