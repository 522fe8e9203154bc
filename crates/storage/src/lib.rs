//! In-process ledger for ledgerstore
//!
//! This crate implements the `LedgerAdapter` contract with:
//! - MemoryLedger: BTreeMap of per-key version chains behind an RwLock
//! - LedgerTxn: buffered write set with read-your-writes and read-set
//!   validation at commit
//! - MemoryCursor: snapshot cursors counted while open
//!
//! It stands in for the host ledger in tests and in embedded use.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chain;
pub mod cursor;
pub mod memory;
pub mod txn;

pub use chain::VersionChain;
pub use cursor::MemoryCursor;
pub use memory::{CommitInfo, MemoryLedger};
pub use txn::LedgerTxn;
