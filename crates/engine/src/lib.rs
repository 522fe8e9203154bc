//! Record store engine for ledgerstore
//!
//! This crate orchestrates the record layer on top of a `LedgerAdapter`:
//! - RecordStore: create/read/update, range and index queries, history
//! - CompositeIndex: secondary index entries over composite keys
//! - AccessGate: caller-attribute check for guarded operations
//! - KindRegistry: declared record kinds and their indexes
//! - StoreConfig: `ledgerstore.toml` loading and validation
//!
//! Nothing here holds durable state; the engine is re-entered per call with
//! the adapter for that call's transaction.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod gate;
pub mod index;
pub mod registry;
pub mod store;

pub use config::{ConfigError, RouteConfig, SeedRecord, StoreConfig, CONFIG_FILE_NAME};
pub use gate::AccessGate;
pub use index::{CompositeIndex, IndexScan, INDEX_ENTRY_SENTINEL};
pub use registry::KindRegistry;
pub use store::{HistoryScan, IndexMatches, RangeScan, RecordStore};
