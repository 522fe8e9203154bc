//! Composite secondary index
//!
//! An index entry for record `pk` with indexed value `v` is the composite key
//! `(index_name, v, pk)` holding a one-byte sentinel. Looking records up by
//! value is a partial composite scan on `(index_name, v)` followed by
//! splitting each hit to recover `pk`, always the last component.
//!
//! Entries are written when a record is created and never rewritten: an
//! update that changes the indexed field leaves the old entry in place.

use ledgerstore_core::{EncodingError, Error, KeyValue, LedgerAdapter, Result, ScopedCursor};

/// Value stored under every index entry
pub const INDEX_ENTRY_SENTINEL: [u8; 1] = [0x00];

/// One named index over a ledger
pub struct CompositeIndex<'a, L: LedgerAdapter + ?Sized> {
    ledger: &'a L,
    name: String,
}

impl<'a, L: LedgerAdapter + ?Sized> CompositeIndex<'a, L> {
    /// Bind an index name to a ledger
    pub fn new(ledger: &'a L, name: impl Into<String>) -> Self {
        CompositeIndex {
            ledger,
            name: name.into(),
        }
    }

    /// Index name, e.g. `owner~key`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Composite key of the entry for `(value, primary_key)`
    pub fn entry_key(&self, value: &str, primary_key: &str) -> Result<String> {
        self.ledger
            .create_composite_key(&self.name, &[value, primary_key])
    }

    /// Write an entry whose key came from [`CompositeIndex::entry_key`]
    pub fn put_encoded(&self, entry_key: &str) -> Result<()> {
        self.ledger
            .put_state(entry_key, INDEX_ENTRY_SENTINEL.to_vec())
    }

    /// Primary keys of every entry recorded under `value`, in scan order
    pub fn scan(&self, value: &str) -> Result<IndexScan<'a, L>> {
        let cursor = self
            .ledger
            .state_by_partial_composite_key(&self.name, &[value])?;
        Ok(IndexScan {
            ledger: self.ledger,
            name: self.name.clone(),
            cursor: ScopedCursor::new(cursor),
        })
    }
}

/// Lazy sequence of primary keys from an index scan
///
/// The underlying cursor is released on exhaustion, on error, or on drop.
pub struct IndexScan<'a, L: LedgerAdapter + ?Sized> {
    ledger: &'a L,
    name: String,
    cursor: ScopedCursor<KeyValue>,
}

impl<L: LedgerAdapter + ?Sized> IndexScan<'_, L> {
    fn primary_key(&self, entry: KeyValue) -> Result<String> {
        let (index, mut parts) = self.ledger.split_composite_key(&entry.key)?;
        if index != self.name || parts.len() < 2 {
            return Err(Error::Encoding(EncodingError::Truncated { key: entry.key }));
        }
        parts
            .pop()
            .ok_or_else(|| Error::Encoding(EncodingError::Truncated { key: entry.key }))
    }
}

impl<L: LedgerAdapter + ?Sized> Iterator for IndexScan<'_, L> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.cursor.next()? {
            Ok(entry) => entry,
            Err(e) => return Some(Err(e)),
        };
        Some(self.primary_key(entry))
    }
}
