//! Error conversion from internal error types.
//!
//! This module provides conversions from the record store's internal errors
//! to the executor's [`Error`] type.

use ledgerstore_core::Error as CoreError;
use ledgerstore_engine::ConfigError;

use crate::Error;

/// Convert a core error to an executor Error.
///
/// Each core variant has exactly one executor counterpart, so callers can
/// still tell a denial from a bad argument.
impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidArgument { reason } => Error::InvalidArgument { reason },
            CoreError::Encoding(e) => Error::Encoding {
                reason: e.to_string(),
            },
            CoreError::MalformedRecord { reason } => Error::MalformedRecord { reason },
            CoreError::Forbidden { reason } => Error::Forbidden { reason },
            CoreError::Adapter { reason } => Error::Adapter { reason },
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization {
            reason: err.to_string(),
        }
    }
}

/// Convert a core Result to an executor Result.
pub fn convert_result<T>(result: ledgerstore_core::Result<T>) -> crate::Result<T> {
    result.map_err(Error::from)
}
