//! Ledger adapter abstraction
//!
//! The ledger is the host's versioned key-value substrate. Everything durable
//! lives there; the store above it is a stateless orchestration layer. This
//! module defines the narrow interface the store consumes, plus
//! [`ScopedCursor`], which guarantees every scan the store opens is closed.
//!
//! # Conventions
//!
//! - A missing key reads as empty bytes, never as an error.
//! - Range scans are half-open `[start, end)` in lexicographic key order and
//!   never return composite (index) keys.
//! - History is returned oldest-first.
//! - All methods run inside the host transaction that the adapter instance
//!   represents; the adapter provides atomicity and conflict detection.

use tracing::warn;

use crate::composite::{make_composite_key, split_composite_key};
use crate::error::Result;
use crate::history::HistoryEntry;

/// A key with its current value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    /// Ledger key
    pub key: String,
    /// Stored bytes
    pub value: Vec<u8>,
}

impl KeyValue {
    /// Create a key/value pair
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Forward-only cursor over adapter results
///
/// Cursors hold adapter resources until `close` is called. Callers inside
/// this workspace never use a raw cursor directly; they wrap it in a
/// [`ScopedCursor`].
pub trait LedgerCursor<T>: Send {
    /// Advance the cursor; `Ok(None)` once exhausted
    fn next_item(&mut self) -> Result<Option<T>>;

    /// Release the cursor's resources
    fn close(&mut self) -> Result<()>;
}

/// Cursor over `(key, value)` pairs
pub type KvCursor = Box<dyn LedgerCursor<KeyValue>>;

/// Cursor over a key's history
pub type HistoryCursor = Box<dyn LedgerCursor<HistoryEntry>>;

/// Versioned key-value substrate consumed by the record store.
///
/// Thread safety: adapters must be `Send + Sync`; an adapter instance is
/// scoped to one host transaction.
pub trait LedgerAdapter: Send + Sync {
    /// Id of the enclosing transaction
    fn tx_id(&self) -> &str;

    /// Read a key; empty bytes when the key has no value
    fn get_state(&self, key: &str) -> Result<Vec<u8>>;

    /// Write a key
    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Delete a key, leaving a tombstone in its history
    fn del_state(&self, key: &str) -> Result<()>;

    /// Scan simple keys in `[start_key, end_key)`
    ///
    /// An empty `start_key` means "from the first simple key".
    fn state_by_range(&self, start_key: &str, end_key: &str) -> Result<KvCursor>;

    /// Scan every composite key under `index_name` whose leading components
    /// equal `components`
    fn state_by_partial_composite_key(
        &self,
        index_name: &str,
        components: &[&str],
    ) -> Result<KvCursor>;

    /// Every committed write and delete of `key`, oldest first
    fn history_for_key(&self, key: &str) -> Result<HistoryCursor>;

    /// Look up one attribute of the caller's identity
    fn caller_attribute(&self, name: &str) -> Result<Option<String>>;

    /// Encode an index name and components into a composite key
    fn create_composite_key(&self, index_name: &str, components: &[&str]) -> Result<String> {
        Ok(make_composite_key(index_name, components)?)
    }

    /// Decode a composite key into its index name and components
    fn split_composite_key(&self, key: &str) -> Result<(String, Vec<String>)> {
        Ok(split_composite_key(key)?)
    }
}

/// Cursor wrapper that closes the underlying cursor exactly once
///
/// The cursor is released when iteration reaches the end, when the adapter
/// reports an error, or when the wrapper is dropped, whichever comes first.
/// A close failure during drop can only be logged; call [`ScopedCursor::close`]
/// to observe it.
pub struct ScopedCursor<T> {
    inner: Option<Box<dyn LedgerCursor<T>>>,
}

impl<T> ScopedCursor<T> {
    /// Take ownership of an open cursor
    pub fn new(cursor: Box<dyn LedgerCursor<T>>) -> Self {
        ScopedCursor {
            inner: Some(cursor),
        }
    }

    /// Returns `true` until the underlying cursor has been released
    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    /// Release the cursor now, surfacing any close error
    pub fn close(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        match self.inner.take() {
            Some(mut cursor) => cursor.close(),
            None => Ok(()),
        }
    }
}

impl<T> Iterator for ScopedCursor<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.inner.as_mut()?;
        match cursor.next_item() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => match self.release() {
                Ok(()) => None,
                Err(e) => Some(Err(e)),
            },
            Err(e) => {
                if let Err(close_err) = self.release() {
                    warn!(target: "ledgerstore::cursor", error = %close_err, "cursor close failed after scan error");
                }
                Some(Err(e))
            }
        }
    }
}

impl<T> Drop for ScopedCursor<T> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!(target: "ledgerstore::cursor", error = %e, "cursor close failed on drop");
        }
    }
}
