//! Command enum defining all record store operations.
//!
//! Commands are the "instruction set" of the store. Every operation a caller
//! can reach is represented as a variant of this enum.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON for cross-language use
//! - **Typed**: Positional string arguments are bound before dispatch
//! - **Pure data**: No closures or executable code

use serde::{Deserialize, Serialize};

use ledgerstore_core::Fields;

/// A command is a self-contained, serializable operation.
///
/// Named functions from the route table are bound to commands by
/// [`Route::bind`](crate::Route::bind); commands can also be built and
/// executed directly.
///
/// # Example
///
/// ```ignore
/// use ledgerstore_executor::Command;
///
/// let cmd = Command::QueryByIndex {
///     index: "owner~key".into(),
///     value: "Tomoko".into(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    /// Raw stored bytes of a key.
    /// Returns: `Output::Bytes`
    Read { key: String },

    /// `Read`, permitted only to callers passing the access gate.
    /// Returns: `Output::Bytes`
    GuardedRead { key: String },

    /// Create a record and its index entries.
    /// Returns: `Output::Record`
    Create {
        kind: String,
        key: String,
        fields: Fields,
    },

    /// Overwrite one field of an existing record.
    /// Returns: `Output::MaybeRecord`
    UpdateField {
        key: String,
        field: String,
        value: String,
    },

    /// Simple keys in `[start, end)`.
    /// Returns: `Output::Entries`
    QueryRange { start: String, end: String },

    /// Records whose index entry carries `value`.
    /// Returns: `Output::Records`
    QueryByIndex { index: String, value: String },

    /// Committed history of a key.
    /// Returns: `Output::History`
    History { key: String },

    /// Write the configured seed records.
    /// Returns: `Output::Unit`
    Seed,
}

impl Command {
    /// Returns `true` if this command writes to the ledger.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::Create { .. } | Command::UpdateField { .. } | Command::Seed
        )
    }

    /// Returns the variant name as a static string.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Read { .. } => "Read",
            Command::GuardedRead { .. } => "GuardedRead",
            Command::Create { .. } => "Create",
            Command::UpdateField { .. } => "UpdateField",
            Command::QueryRange { .. } => "QueryRange",
            Command::QueryByIndex { .. } => "QueryByIndex",
            Command::History { .. } => "History",
            Command::Seed => "Seed",
        }
    }
}
