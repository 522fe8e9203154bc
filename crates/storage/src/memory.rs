//! MemoryLedger: in-process versioned key-value ledger
//!
//! This module implements the committed side of the ledger using:
//! - `BTreeMap<String, VersionChain>` for ordered keys with full history
//! - `parking_lot::RwLock` for thread-safe access
//! - `AtomicU64` for the commit counter
//!
//! Work happens in transactions: [`MemoryLedger::begin`] returns a
//! [`LedgerTxn`] that buffers writes and is applied by
//! [`LedgerTxn::commit`]. A commit validates the transaction's read set
//! (first committer wins) and applies the whole write set under one write
//! lock, one transaction id and one timestamp.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use ledgerstore_core::{
    is_composite_key, CallerIdentity, Error, HistoryEntry, KeyValue, LedgerTimestamp, Result,
};

use crate::chain::VersionChain;
use crate::cursor::MemoryCursor;
use crate::txn::{LedgerTxn, WriteSet};

/// Outcome of a successful commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Transaction id recorded in every history entry the commit produced
    pub tx_id: String,
    /// Commit timestamp
    pub timestamp: LedgerTimestamp,
    /// Number of keys written or deleted
    pub writes: usize,
}

#[derive(Debug, Default)]
struct LedgerState {
    keys: BTreeMap<String, VersionChain>,
    last_commit: Option<LedgerTimestamp>,
}

impl LedgerState {
    /// Commit timestamps are strictly increasing even if the wall clock is not
    fn next_timestamp(&mut self) -> LedgerTimestamp {
        let now = LedgerTimestamp::now();
        let ts = match self.last_commit {
            Some(last) if now <= last => {
                if last.nanos >= 999_999_999 {
                    LedgerTimestamp::new(last.seconds + 1, 0)
                } else {
                    LedgerTimestamp::new(last.seconds, last.nanos + 1)
                }
            }
            _ => now,
        };
        self.last_commit = Some(ts);
        ts
    }
}

/// In-process ledger with per-key history
///
/// Thread-safe: any number of transactions may run concurrently; conflicts
/// are detected at commit.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: RwLock<LedgerState>,
    commits: AtomicU64,
    open_cursors: Arc<AtomicUsize>,
}

impl MemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a transaction on behalf of `caller`
    pub fn begin(&self, caller: CallerIdentity) -> LedgerTxn<'_> {
        LedgerTxn::new(self, caller)
    }

    /// Number of adapter cursors currently open
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    /// Number of transactions committed so far
    pub fn committed(&self) -> u64 {
        self.commits.load(Ordering::Acquire)
    }

    /// Number of keys with a live (non-deleted) value
    pub fn live_keys(&self) -> usize {
        self.state
            .read()
            .keys
            .values()
            .filter(|chain| chain.current().is_some())
            .count()
    }

    /// Current committed value and version of `key`
    pub(crate) fn committed_get(&self, key: &str) -> (Option<Vec<u8>>, usize) {
        let state = self.state.read();
        match state.keys.get(key) {
            Some(chain) => (chain.current().map(<[u8]>::to_vec), chain.version()),
            None => (None, 0),
        }
    }

    /// Live committed pairs with keys in `[start, end)`, or from `start` on
    /// when `end` is `None`
    pub(crate) fn committed_range(
        &self,
        start: &str,
        end: Option<&str>,
        composite: bool,
    ) -> BTreeMap<String, Vec<u8>> {
        let upper = match end {
            Some(end) if end <= start => return BTreeMap::new(),
            Some(end) => Bound::Excluded(end),
            None => Bound::Unbounded,
        };
        let state = self.state.read();
        state
            .keys
            .range::<str, _>((Bound::Included(start), upper))
            .filter(|(key, _)| is_composite_key(key) == composite)
            .filter_map(|(key, chain)| chain.current().map(|v| (key.clone(), v.to_vec())))
            .collect()
    }

    pub(crate) fn committed_history(&self, key: &str) -> Vec<HistoryEntry> {
        let state = self.state.read();
        state
            .keys
            .get(key)
            .map(|chain| chain.history().cloned().collect())
            .unwrap_or_default()
    }

    pub(crate) fn cursor<T>(&self, items: impl IntoIterator<Item = T>) -> MemoryCursor<T> {
        MemoryCursor::open(items, self.open_cursors.clone())
    }

    /// Validate `reads` and apply `writes` atomically
    pub(crate) fn apply(
        &self,
        tx_id: &str,
        reads: &HashMap<String, usize>,
        writes: WriteSet,
    ) -> Result<CommitInfo> {
        let mut state = self.state.write();

        for (key, read_version) in reads {
            let current = state.keys.get(key).map_or(0, VersionChain::version);
            if current != *read_version {
                debug!(
                    target: "ledgerstore::ledger",
                    tx_id,
                    key = %key,
                    read_version,
                    current_version = current,
                    "read conflict"
                );
                return Err(Error::adapter(format!(
                    "MVCC read conflict on key {:?}: read version {}, current version {}",
                    key, read_version, current
                )));
            }
        }

        let timestamp = state.next_timestamp();
        let count = writes.len();
        for (key, value) in writes {
            let entry = match value {
                Some(bytes) => HistoryEntry::write(tx_id, bytes, timestamp),
                None => HistoryEntry::delete(tx_id, timestamp),
            };
            state.keys.entry(key).or_default().push(entry);
        }
        drop(state);

        self.commits.fetch_add(1, Ordering::AcqRel);
        debug!(target: "ledgerstore::ledger", tx_id, writes = count, "committed");
        Ok(CommitInfo {
            tx_id: tx_id.to_string(),
            timestamp,
            writes: count,
        })
    }
}
