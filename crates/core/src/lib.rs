//! Core types and traits for the ledger record store
//!
//! This crate defines the foundational types used throughout the system:
//! - Error: Error taxonomy shared by every layer
//! - Key validation and size limits
//! - Composite keys: index-entry encoding over the flat ledger keyspace
//! - Record, RecordKind and the record codec
//! - History entries and ledger timestamps
//! - CallerIdentity: attributes bound to the submitting client
//! - LedgerAdapter: the versioned key-value substrate, plus scoped cursors

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod composite;
pub mod error;
pub mod history;
pub mod identity;
pub mod key;
pub mod kind;
pub mod ledger;
pub mod limits;
pub mod record;

pub use codec::{JsonCodec, RecordCodec};
pub use composite::{
    is_composite_key, make_composite_key, partial_key_range, split_composite_key, EncodingError,
    COMPOSITE_DELIMITER, MAX_UNICODE_RUNE,
};
pub use error::{Error, Result};
pub use history::{HistoryEntry, LedgerTimestamp};
pub use identity::CallerIdentity;
pub use key::{validate_key, validate_key_with_limits, KeyError};
pub use kind::{index_name, RecordKind};
pub use ledger::{HistoryCursor, KeyValue, KvCursor, LedgerAdapter, LedgerCursor, ScopedCursor};
pub use limits::Limits;
pub use record::{fields, Fields, Record};
