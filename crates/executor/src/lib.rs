//! # ledgerstore executor
//!
//! The dispatch layer of the record store. It provides:
//! - [`Executor`] - builds from a [`StoreConfig`] and runs calls against a
//!   ledger transaction
//! - [`Command`]/[`Output`] - the typed instruction set and its results
//! - [`RouteTable`] - the closed mapping from function names to commands
//! - [`Error`] - serializable errors for remote callers
//!
//! ## Quick Start
//!
//! ```text
//! use ledgerstore_executor::{Executor, StoreConfig};
//! use ledgerstore_storage::MemoryLedger;
//!
//! let executor = Executor::new(StoreConfig::default())?;
//! let ledger = MemoryLedger::new();
//!
//! let txn = ledger.begin(caller);
//! executor.invoke(&txn, "initLedger", &[])?;
//! txn.commit()?;
//!
//! let txn = ledger.begin(caller);
//! let car = executor.invoke(&txn, "queryCar", &["CAR0".to_string()])?;
//! ```
//!
//! ## Boundary payloads
//!
//! | Output | Payload |
//! |--------|---------|
//! | `Bytes` | stored bytes, possibly empty |
//! | `Record`, `MaybeRecord` | record JSON, or empty |
//! | `Entries`, `Records` | `[{"Key": .., "Record": ..}]` |
//! | `History` | `[{"TxId", "Value", "Timestamp", "IsDelete"}]` |
//! | `Unit` | empty |

#![warn(missing_docs)]

mod command;
mod convert;
mod error;
mod executor;
pub(crate) mod json;
mod output;
mod routes;
mod types;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

pub use command::Command;
pub use convert::convert_result;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;
pub use routes::{Route, RouteTable};
pub use types::KeyedValue;

// Re-export configuration types so users don't need ledgerstore-engine directly
pub use ledgerstore_engine::{AccessGate, RouteConfig, SeedRecord, StoreConfig};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
