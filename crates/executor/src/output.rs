//! Output enum for command execution results.
//!
//! Every command produces exactly one output type. This mapping is deterministic:
//! the same command always produces the same output variant (though the values
//! may differ based on ledger state).

use serde::{Deserialize, Serialize};

use ledgerstore_core::{HistoryEntry, Record};

use crate::types::KeyedValue;
use crate::Result;

/// Successful command execution results.
///
/// Each [`Command`](crate::Command) variant maps to exactly one `Output` variant.
/// [`Output::to_payload`] renders the bytes returned to remote callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    /// No return value (seed)
    Unit,

    /// Raw stored bytes; empty when the key has no value
    Bytes(Vec<u8>),

    /// The record as written
    Record(Record),

    /// The updated record, or `None` when the key had no value
    MaybeRecord(Option<Record>),

    /// Range query results in key order
    Entries(Vec<KeyedValue>),

    /// Index query results in index order
    Records(Vec<Record>),

    /// Key history, oldest first
    History {
        /// Key the history belongs to
        key: String,
        /// Committed versions
        entries: Vec<HistoryEntry>,
    },
}

impl Output {
    /// Boundary payload for this output
    ///
    /// Byte outputs pass through unchanged, records render as their stored
    /// JSON, and query results render as JSON arrays.
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        crate::json::render(self)
    }
}
