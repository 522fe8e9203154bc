//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Lossless**: No error information is lost in conversion from internal errors

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// Every failure is terminal for the call that produced it; nothing is
/// retried or swallowed at this layer.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Input | `InvalidArgument`, `UnknownFunction`, `Encoding` | Bad call |
/// | Data | `MalformedRecord` | Stored payload does not decode |
/// | Access | `Forbidden` | Access gate denied the caller |
/// | Ledger | `Adapter` | Failure reported by the host ledger |
/// | System | `Config`, `Serialization` | Startup and rendering failures |
///
/// # Example
///
/// ```ignore
/// match executor.invoke(&txn, "restictedMethod", &args) {
///     Ok(payload) => { /* handle success */ }
///     Err(Error::Forbidden { reason }) => {
///         println!("denied: {}", reason);
///     }
///     Err(e) => {
///         println!("Error: {}", e);
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Input Errors ====================
    /// Wrong arity or shape of arguments
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Function name not present in the route table
    #[error("unknown function: {name}")]
    UnknownFunction { name: String },

    /// Composite key encoding failure
    #[error("encoding error: {reason}")]
    Encoding { reason: String },

    // ==================== Data Errors ====================
    /// Stored payload failed to decode
    #[error("malformed record: {reason}")]
    MalformedRecord { reason: String },

    // ==================== Access Errors ====================
    /// Access gate denial
    #[error("forbidden: {reason}")]
    Forbidden { reason: String },

    // ==================== Ledger Errors ====================
    /// Failure surfaced from the ledger adapter
    #[error("adapter error: {reason}")]
    Adapter { reason: String },

    // ==================== System Errors ====================
    /// Invalid configuration or route table
    #[error("config error: {reason}")]
    Config { reason: String },

    /// Output could not be rendered
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl Error {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidArgument { .. } => "invalid_argument",
            Error::UnknownFunction { .. } => "unknown_function",
            Error::Encoding { .. } => "encoding_error",
            Error::MalformedRecord { .. } => "malformed_record",
            Error::Forbidden { .. } => "forbidden",
            Error::Adapter { .. } => "adapter_error",
            Error::Config { .. } => "config_error",
            Error::Serialization { .. } => "serialization_error",
        }
    }
}
