//! Primary key validation
//!
//! Primary keys are Unicode strings with a few constraints. They share the
//! ledger keyspace with composite index keys, and they are themselves stored
//! as the last component of every index entry, so the rules here line up with
//! the composite-key codec:
//!
//! - Keys must not be empty
//! - Keys must not contain U+0000 (composite namespace and delimiter)
//! - Keys must not contain U+10FFFF (partial-scan upper bound)
//! - Keys must not exceed `max_key_bytes` (default: 1024)

use crate::composite::{COMPOSITE_DELIMITER, MAX_UNICODE_RUNE};
use crate::limits::Limits;
use thiserror::Error;

/// Validate a key using default limits
///
/// # Examples
///
/// ```
/// use ledgerstore_core::key::validate_key;
///
/// assert!(validate_key("CAR0").is_ok());
/// assert!(validate_key("").is_err());
/// assert!(validate_key("a\u{0}b").is_err());
/// ```
pub fn validate_key(key: &str) -> Result<(), KeyError> {
    validate_key_with_limits(key, &Limits::default())
}

/// Validate a key with custom limits
pub fn validate_key_with_limits(key: &str, limits: &Limits) -> Result<(), KeyError> {
    if key.is_empty() {
        return Err(KeyError::Empty);
    }

    if key.contains(COMPOSITE_DELIMITER) {
        return Err(KeyError::ContainsNul);
    }

    if key.contains(MAX_UNICODE_RUNE) {
        return Err(KeyError::ContainsMaxRune);
    }

    let len = key.len();
    if len > limits.max_key_bytes {
        return Err(KeyError::TooLong {
            actual: len,
            max: limits.max_key_bytes,
        });
    }

    Ok(())
}

/// Key validation errors
///
/// These map to `InvalidArgument` at the store boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// Key is empty (length 0)
    #[error("Key cannot be empty")]
    Empty,

    /// Key contains U+0000
    #[error("Key cannot contain U+0000")]
    ContainsNul,

    /// Key contains U+10FFFF
    #[error("Key cannot contain U+10FFFF")]
    ContainsMaxRune,

    /// Key exceeds maximum length
    #[error("Key too long: {actual} bytes exceeds maximum {max}")]
    TooLong {
        /// Actual key length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },
}

impl KeyError {
    /// Get the reason code for wire errors
    pub fn reason_code(&self) -> &'static str {
        match self {
            KeyError::Empty => "empty_key",
            KeyError::ContainsNul => "contains_nul",
            KeyError::ContainsMaxRune => "contains_max_rune",
            KeyError::TooLong { .. } => "key_too_long",
        }
    }
}
