//! Error types for the record store
//!
//! This module defines the error taxonomy shared by every layer above the
//! ledger. We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! A missing key is deliberately *not* an error anywhere in this crate: reads
//! of keys that were never written return empty bytes or `None`, mirroring the
//! host ledger's "no value, no error" convention.

use crate::composite::EncodingError;
use crate::key::KeyError;
use thiserror::Error;

/// Result type alias for record store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the record store
#[derive(Debug, Error)]
pub enum Error {
    /// Wrong arity or shape of input
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the input
        reason: String,
    },

    /// Delimiter collision or malformed composite key
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Stored payload failed to decode as a record
    #[error("Malformed record: {reason}")]
    MalformedRecord {
        /// Decoder failure detail
        reason: String,
    },

    /// Access gate denial
    #[error("Forbidden: {reason}")]
    Forbidden {
        /// Why the caller was denied
        reason: String,
    },

    /// Opaque failure surfaced from the ledger adapter
    #[error("Adapter error: {reason}")]
    Adapter {
        /// Adapter-supplied description
        reason: String,
    },
}

impl Error {
    /// Create an [`Error::InvalidArgument`]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create an [`Error::MalformedRecord`]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            reason: reason.into(),
        }
    }

    /// Create an [`Error::Forbidden`]
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Error::Forbidden {
            reason: reason.into(),
        }
    }

    /// Create an [`Error::Adapter`]
    pub fn adapter(reason: impl Into<String>) -> Self {
        Error::Adapter {
            reason: reason.into(),
        }
    }

    /// Stable reason code, used when mapping to wire errors and in logs
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidArgument { .. } => "invalid_argument",
            Error::Encoding(_) => "encoding_error",
            Error::MalformedRecord { .. } => "malformed_record",
            Error::Forbidden { .. } => "forbidden",
            Error::Adapter { .. } => "adapter_error",
        }
    }
}

impl From<KeyError> for Error {
    fn from(e: KeyError) -> Self {
        Error::InvalidArgument {
            reason: e.to_string(),
        }
    }
}
