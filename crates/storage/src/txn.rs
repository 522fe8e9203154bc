//! Ledger transactions
//!
//! A [`LedgerTxn`] is the adapter the record store runs against. It
//! buffers writes in a private write set and records the version of every
//! key it reads. Reads see the transaction's own writes, including inside
//! range and composite scans. Nothing reaches the ledger until
//! [`LedgerTxn::commit`]; dropping the transaction discards it.
//!
//! History reads only see committed versions.

use std::collections::{BTreeMap, HashMap};

use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

use ledgerstore_core::{
    is_composite_key, partial_key_range, CallerIdentity, Error, HistoryCursor, KeyValue, KvCursor,
    LedgerAdapter, Result,
};

use crate::memory::{CommitInfo, MemoryLedger};

/// Pending writes; `None` marks a delete
pub(crate) type WriteSet = BTreeMap<String, Option<Vec<u8>>>;

/// One transaction against a [`MemoryLedger`]
pub struct LedgerTxn<'a> {
    ledger: &'a MemoryLedger,
    tx_id: String,
    caller: CallerIdentity,
    writes: Mutex<WriteSet>,
    reads: Mutex<HashMap<String, usize>>,
}

impl<'a> LedgerTxn<'a> {
    pub(crate) fn new(ledger: &'a MemoryLedger, caller: CallerIdentity) -> Self {
        LedgerTxn {
            ledger,
            tx_id: Uuid::new_v4().to_string(),
            caller,
            writes: Mutex::new(WriteSet::new()),
            reads: Mutex::new(HashMap::new()),
        }
    }

    /// Identity bound to this transaction
    pub fn caller(&self) -> &CallerIdentity {
        &self.caller
    }

    /// Number of keys written or deleted so far
    pub fn pending_writes(&self) -> usize {
        self.writes.lock().len()
    }

    /// Validate the read set and apply the write set atomically
    ///
    /// Fails with `Adapter` if a key this transaction read was committed by
    /// another transaction in the meantime; nothing is applied in that case.
    pub fn commit(self) -> Result<CommitInfo> {
        let writes = std::mem::take(&mut *self.writes.lock());
        let reads = std::mem::take(&mut *self.reads.lock());
        self.ledger.apply(&self.tx_id, &reads, writes)
    }

    /// Discard the transaction
    pub fn rollback(self) {
        let discarded = std::mem::take(&mut *self.writes.lock()).len();
        debug!(target: "ledgerstore::ledger", tx_id = %self.tx_id, discarded, "rolled back");
    }

    /// Merge pending writes in `[start, end)` over a committed scan
    fn overlay(
        &self,
        mut base: BTreeMap<String, Vec<u8>>,
        start: &str,
        end: Option<&str>,
        composite: bool,
    ) -> Vec<KeyValue> {
        let writes = self.writes.lock();
        for (key, value) in writes.iter() {
            let key_str = key.as_str();
            if key_str < start || end.is_some_and(|end| key_str >= end) {
                continue;
            }
            if is_composite_key(key_str) != composite {
                continue;
            }
            match value {
                Some(bytes) => {
                    base.insert(key.clone(), bytes.clone());
                }
                None => {
                    base.remove(key_str);
                }
            }
        }
        base.into_iter().map(|(k, v)| KeyValue::new(k, v)).collect()
    }
}

impl LedgerAdapter for LedgerTxn<'_> {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn get_state(&self, key: &str) -> Result<Vec<u8>> {
        if let Some(pending) = self.writes.lock().get(key) {
            return Ok(pending.clone().unwrap_or_default());
        }
        let (value, version) = self.ledger.committed_get(key);
        self.reads.lock().entry(key.to_string()).or_insert(version);
        Ok(value.unwrap_or_default())
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<()> {
        if key.is_empty() {
            return Err(Error::adapter("key must not be an empty string"));
        }
        if value.is_empty() {
            return Err(Error::adapter(format!(
                "value for key {:?} must not be empty; use del_state",
                key
            )));
        }
        self.writes.lock().insert(key.to_string(), Some(value));
        Ok(())
    }

    fn del_state(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::adapter("key must not be an empty string"));
        }
        self.writes.lock().insert(key.to_string(), None);
        Ok(())
    }

    fn state_by_range(&self, start_key: &str, end_key: &str) -> Result<KvCursor> {
        let end = (!end_key.is_empty()).then_some(end_key);
        let base = self.ledger.committed_range(start_key, end, false);
        let items = self.overlay(base, start_key, end, false);
        Ok(Box::new(self.ledger.cursor(items)))
    }

    fn state_by_partial_composite_key(
        &self,
        index_name: &str,
        components: &[&str],
    ) -> Result<KvCursor> {
        let (start, end) = partial_key_range(index_name, components)?;
        let base = self.ledger.committed_range(&start, Some(&end), true);
        let items = self.overlay(base, &start, Some(&end), true);
        Ok(Box::new(self.ledger.cursor(items)))
    }

    fn history_for_key(&self, key: &str) -> Result<HistoryCursor> {
        let entries = self.ledger.committed_history(key);
        Ok(Box::new(self.ledger.cursor(entries)))
    }

    fn caller_attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.caller.attribute(name).map(str::to_string))
    }
}

impl Drop for LedgerTxn<'_> {
    fn drop(&mut self) {
        let pending = self.writes.get_mut().len();
        if pending > 0 {
            debug!(target: "ledgerstore::ledger", tx_id = %self.tx_id, pending, "discarding uncommitted transaction");
        }
    }
}
