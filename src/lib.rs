//! ledgerstore - secondary-indexed records over a versioned key-value ledger
//!
//! Records are flat string maps stored under primary keys in a ledger the
//! host owns. Each record kind may declare indexed fields; creating a record
//! writes one composite-key index entry per indexed field. The store supports
//! range scans, index lookups, full key history, and one read guarded by a
//! caller attribute.
//!
//! # Quick Start
//!
//! ```ignore
//! use ledgerstore::{CallerIdentity, Executor, MemoryLedger, StoreConfig};
//!
//! let executor = Executor::new(StoreConfig::default())?;
//! let ledger = MemoryLedger::new();
//!
//! let txn = ledger.begin(CallerIdentity::new("user1", "Org1MSP"));
//! executor.invoke(&txn, "initLedger", &[])?;
//! txn.commit()?;
//!
//! let txn = ledger.begin(CallerIdentity::new("user1", "Org1MSP"));
//! let cars = executor.invoke(&txn, "queryCarsByOwner", &["Tomoko".to_string()])?;
//! ```
//!
//! # Architecture
//!
//! All calls go through the [`Executor`], which binds function names to
//! commands and runs them on a per-call record store over the caller's
//! ledger transaction. [`MemoryLedger`] is the in-process ledger used for
//! tests and embedding; a host ledger plugs in by implementing
//! [`LedgerAdapter`].

// Re-export the public API from ledgerstore-executor
pub use ledgerstore_executor::*;

// Types needed to drive the executor against a ledger
pub use ledgerstore_core::{CallerIdentity, HistoryEntry, LedgerAdapter, LedgerTimestamp, Record};
pub use ledgerstore_storage::{CommitInfo, LedgerTxn, MemoryLedger};
