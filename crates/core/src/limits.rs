//! Size limits for keys
//!
//! Limits are configurable at executor construction time; violations surface
//! as `InvalidArgument` through [`KeyError::TooLong`](crate::key::KeyError).

use serde::{Deserialize, Serialize};

/// Default maximum primary key length in bytes
pub const DEFAULT_MAX_KEY_BYTES: usize = 1024;

/// Size limits enforced on primary keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum key length in bytes (default: 1024)
    pub max_key_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_key_bytes: DEFAULT_MAX_KEY_BYTES,
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    pub fn with_small_limits() -> Self {
        Limits { max_key_bytes: 16 }
    }
}
