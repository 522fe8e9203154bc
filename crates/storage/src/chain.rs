//! Per-key version chain
//!
//! Every committed write or delete of a key becomes one [`HistoryEntry`] in
//! the key's chain. Entries are stored newest-first so the current value is
//! always at the front; history readers walk the chain backwards to get the
//! oldest-first order the adapter contract requires.

use std::collections::VecDeque;

use ledgerstore_core::HistoryEntry;

/// Versions of one key, newest first
#[derive(Debug, Clone, Default)]
pub struct VersionChain {
    versions: VecDeque<HistoryEntry>,
}

impl VersionChain {
    /// Create an empty chain
    pub fn new() -> Self {
        VersionChain {
            versions: VecDeque::with_capacity(4),
        }
    }

    /// Add a version (must be newer than every existing version)
    #[inline]
    pub fn push(&mut self, entry: HistoryEntry) {
        self.versions.push_front(entry);
    }

    /// The current value, or `None` if the key was never written or its
    /// latest version is a tombstone
    pub fn current(&self) -> Option<&[u8]> {
        match self.versions.front() {
            Some(entry) if !entry.is_delete => entry.value.as_deref(),
            _ => None,
        }
    }

    /// Number of committed versions, used as the key's version number
    #[inline]
    pub fn version(&self) -> usize {
        self.versions.len()
    }

    /// Returns `true` if no version has been committed
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Every version, oldest first
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.versions.iter().rev()
    }
}
