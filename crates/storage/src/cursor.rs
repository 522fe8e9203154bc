//! Snapshot cursors
//!
//! Scans materialize their result when opened, so a cursor never holds the
//! ledger lock. What it does hold is a slot in the ledger's open-cursor
//! count, released exactly once on `close` or drop.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ledgerstore_core::{LedgerCursor, Result};

/// Cursor over a materialized scan result
pub struct MemoryCursor<T> {
    items: VecDeque<T>,
    open: Option<Arc<AtomicUsize>>,
}

impl<T> MemoryCursor<T> {
    pub(crate) fn open(items: impl IntoIterator<Item = T>, counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        MemoryCursor {
            items: items.into_iter().collect(),
            open: Some(counter),
        }
    }

    fn release(&mut self) {
        if let Some(counter) = self.open.take() {
            counter.fetch_sub(1, Ordering::SeqCst);
        }
        self.items.clear();
    }
}

impl<T: Send> LedgerCursor<T> for MemoryCursor<T> {
    fn next_item(&mut self) -> Result<Option<T>> {
        if self.open.is_none() {
            return Ok(None);
        }
        Ok(self.items.pop_front())
    }

    fn close(&mut self) -> Result<()> {
        self.release();
        Ok(())
    }
}

impl<T> Drop for MemoryCursor<T> {
    fn drop(&mut self) {
        self.release();
    }
}
