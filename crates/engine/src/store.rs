//! RecordStore: secondary-indexed records over a ledger adapter
//!
//! ## Design
//!
//! RecordStore is a stateless facade. It borrows the adapter for the current
//! transaction and the kind registry, and owns nothing durable; a new store
//! is built for every call. Atomicity of multi-key writes comes from the
//! host transaction the adapter represents.
//!
//! ## Index maintenance
//!
//! `create` writes the record plus one index entry per indexed field.
//! `update` rewrites only the record. An update that changes an indexed
//! field therefore leaves the entry for the old value in place, and index
//! queries for the old value keep returning the record.
//!
//! ## Scans
//!
//! Queries return lazy sequences backed by exactly one adapter cursor. The
//! cursor is closed when the sequence is exhausted, hits an error, or is
//! dropped.

use tracing::{debug, info, warn};

use ledgerstore_core::{
    validate_key_with_limits, Error, Fields, HistoryEntry, JsonCodec, KeyValue, LedgerAdapter,
    Record, RecordCodec, Result, ScopedCursor,
};

use crate::config::SeedRecord;
use crate::gate::AccessGate;
use crate::index::{CompositeIndex, IndexScan};
use crate::registry::KindRegistry;

/// History of one key, oldest first
pub type HistoryScan = ScopedCursor<HistoryEntry>;

/// Record store bound to one transaction
pub struct RecordStore<'a, L: LedgerAdapter + ?Sized, C: RecordCodec = JsonCodec> {
    ledger: &'a L,
    registry: &'a KindRegistry,
    codec: C,
}

impl<'a, L: LedgerAdapter + ?Sized> RecordStore<'a, L, JsonCodec> {
    /// Store using the JSON record codec
    pub fn new(ledger: &'a L, registry: &'a KindRegistry) -> Self {
        RecordStore {
            ledger,
            registry,
            codec: JsonCodec,
        }
    }
}

impl<'a, L: LedgerAdapter + ?Sized, C: RecordCodec> RecordStore<'a, L, C> {
    /// Store using a custom codec
    pub fn with_codec(ledger: &'a L, registry: &'a KindRegistry, codec: C) -> Self {
        RecordStore {
            ledger,
            registry,
            codec,
        }
    }

    /// The adapter this store runs against
    pub fn ledger(&self) -> &'a L {
        self.ledger
    }

    /// The kind registry this store validates against
    pub fn registry(&self) -> &'a KindRegistry {
        self.registry
    }

    fn check_key(&self, key: &str) -> Result<()> {
        validate_key_with_limits(key, self.registry.limits())?;
        Ok(())
    }

    /// Create a record and its index entries
    ///
    /// `fields` must carry exactly the field set of `kind`. Every entry key is
    /// encoded before the first write, so an unencodable indexed value fails
    /// the call without touching the ledger. An existing record under `key`
    /// is overwritten.
    pub fn create(&self, kind: &str, key: &str, fields: Fields) -> Result<Record> {
        let record_kind = self.registry.get(kind)?;
        self.check_key(key)?;
        record_kind.check_fields(&fields)?;

        let mut entries = Vec::new();
        for (field, index) in record_kind.index_names() {
            let value = fields.get(field).ok_or_else(|| {
                Error::invalid_argument(format!("missing indexed field '{}'", field))
            })?;
            let index = CompositeIndex::new(self.ledger, index);
            let entry = index.entry_key(value, key)?;
            entries.push((index, entry));
        }

        let payload = self.codec.encode(&fields)?;
        self.ledger.put_state(key, payload)?;
        for (index, entry) in &entries {
            index.put_encoded(entry)?;
        }

        debug!(target: "ledgerstore::store", key, kind, index_entries = entries.len(), "created record");
        Ok(Record::new(key, fields))
    }

    /// Raw stored bytes; empty when the key was never written
    pub fn read(&self, key: &str) -> Result<Vec<u8>> {
        self.check_key(key)?;
        let bytes = self.ledger.get_state(key)?;
        debug!(target: "ledgerstore::store", key, found = !bytes.is_empty(), "read");
        Ok(bytes)
    }

    /// Decoded record, or `None` when the key was never written
    pub fn read_record(&self, key: &str) -> Result<Option<Record>> {
        let bytes = self.read(key)?;
        if bytes.is_empty() {
            return Ok(None);
        }
        let fields = self.codec.decode(&bytes)?;
        Ok(Some(Record::new(key, fields)))
    }

    /// Read, mutate and write back a record
    ///
    /// Returns `None` without writing when the key has no value. Index
    /// entries are not touched.
    pub fn update<F>(&self, key: &str, mutator: F) -> Result<Option<Record>>
    where
        F: FnOnce(&mut Record) -> Result<()>,
    {
        let mut record = match self.read_record(key)? {
            Some(record) => record,
            None => {
                debug!(target: "ledgerstore::store", key, "update of absent record");
                return Ok(None);
            }
        };
        mutator(&mut record)?;
        let payload = self.codec.encode(&record.fields)?;
        self.ledger.put_state(key, payload)?;
        debug!(target: "ledgerstore::store", key, "updated record");
        Ok(Some(record))
    }

    /// Overwrite one existing field of a record
    pub fn set_field(&self, key: &str, field: &str, value: &str) -> Result<Option<Record>> {
        self.update(key, |record| record.set(field, value))
    }

    /// Simple keys in `[start_key, end_key)`, in key order
    ///
    /// An empty `start_key` starts at the first key; an empty `end_key`
    /// leaves the range open above. A non-empty `end_key` at or below
    /// `start_key` yields nothing and opens no cursor.
    pub fn query_range(&self, start_key: &str, end_key: &str) -> Result<RangeScan> {
        if !end_key.is_empty() && end_key <= start_key {
            debug!(target: "ledgerstore::store", start_key, end_key, "empty range");
            return Ok(RangeScan { cursor: None });
        }
        let cursor = self.ledger.state_by_range(start_key, end_key)?;
        debug!(target: "ledgerstore::store", start_key, end_key, "range scan");
        Ok(RangeScan {
            cursor: Some(ScopedCursor::new(cursor)),
        })
    }

    /// Records whose index entry under `index` carries `value`
    ///
    /// Records come back in index scan order, decoded from their current
    /// payload. `index` must belong to a registered kind.
    pub fn query_by_index(&self, index: &str, value: &str) -> Result<IndexMatches<'_, L, C>> {
        if self.registry.index_owner(index).is_none() {
            return Err(Error::invalid_argument(format!("unknown index '{}'", index)));
        }
        let keys = CompositeIndex::new(self.ledger, index).scan(value)?;
        debug!(target: "ledgerstore::store", index, value, "index scan");
        Ok(IndexMatches {
            keys,
            ledger: self.ledger,
            codec: &self.codec,
            index: index.to_string(),
        })
    }

    /// Every committed write and delete of `key`, oldest first
    pub fn history(&self, key: &str) -> Result<HistoryScan> {
        self.check_key(key)?;
        let cursor = self.ledger.history_for_key(key)?;
        debug!(target: "ledgerstore::store", key, "history scan");
        Ok(ScopedCursor::new(cursor))
    }

    /// Create each record, index entries included
    pub fn seed(&self, records: &[SeedRecord]) -> Result<usize> {
        for record in records {
            self.create(&record.kind, &record.key, record.fields.clone())?;
        }
        info!(target: "ledgerstore::store", records = records.len(), "seeded ledger");
        Ok(records.len())
    }

    /// `read`, permitted only if the caller passes `gate`
    pub fn guarded_read(&self, gate: &AccessGate, key: &str) -> Result<Vec<u8>> {
        gate.check(self.ledger)?;
        self.read(key)
    }
}

/// Lazy `(key, value)` sequence from a range query
pub struct RangeScan {
    cursor: Option<ScopedCursor<KeyValue>>,
}

impl RangeScan {
    /// Returns `true` while the underlying cursor is still held
    pub fn is_open(&self) -> bool {
        self.cursor.as_ref().is_some_and(ScopedCursor::is_open)
    }
}

impl Iterator for RangeScan {
    type Item = Result<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.as_mut()?.next()
    }
}

/// Lazy record sequence from an index query
///
/// Index entries whose record no longer has a value are skipped.
pub struct IndexMatches<'s, L: LedgerAdapter + ?Sized, C: RecordCodec> {
    keys: IndexScan<'s, L>,
    ledger: &'s L,
    codec: &'s C,
    index: String,
}

impl<L: LedgerAdapter + ?Sized, C: RecordCodec> IndexMatches<'_, L, C> {
    fn load(&self, key: String) -> Result<Option<Record>> {
        let bytes = self.ledger.get_state(&key)?;
        if bytes.is_empty() {
            warn!(target: "ledgerstore::store", index = %self.index, key = %key, "index entry points at missing record");
            return Ok(None);
        }
        let fields = self.codec.decode(&bytes)?;
        Ok(Some(Record::new(key, fields)))
    }
}

impl<L: LedgerAdapter + ?Sized, C: RecordCodec> Iterator for IndexMatches<'_, L, C> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let key = match self.keys.next()? {
                Ok(key) => key,
                Err(e) => return Some(Err(e)),
            };
            match self.load(key) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
