//! # In-Memory World State
//!
//! Ordered key-value store with per-key commit versions. Commits validate the
//! transaction's read set before applying anything (optimistic MVCC).

use crate::domain::LedgerError;
use crate::ports::outbound::{
    scan_bounds, scan_is_empty, CommitBatch, KeyValue, VersionedValue, WorldState,
};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct Inner {
    entries: BTreeMap<String, VersionedValue>,
    version: u64,
}

/// In-memory implementation of `WorldState`.
#[derive(Debug, Default)]
pub struct InMemoryWorldState {
    inner: RwLock<Inner>,
    offline: AtomicBool,
}

impl InMemoryWorldState {
    /// Create an empty world state at version 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write raw bytes outside any transaction. Test and bootstrap helper.
    pub fn put_raw(&self, key: impl Into<String>, value: Vec<u8>) {
        let mut inner = self.inner.write();
        inner.version += 1;
        let version = inner.version;
        inner
            .entries
            .insert(key.into(), VersionedValue { value, version });
    }

    /// Simulate backend failure: every call returns `Unavailable` while set.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of committed keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Committed keys in order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.inner.read().entries.keys().cloned().collect()
    }

    fn ensure_online(&self) -> Result<(), LedgerError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(LedgerError::Unavailable("world state offline".to_string()));
        }
        Ok(())
    }
}

impl WorldState for InMemoryWorldState {
    fn get(&self, key: &str) -> Result<Option<VersionedValue>, LedgerError> {
        self.ensure_online()?;
        Ok(self.inner.read().entries.get(key).cloned())
    }

    fn scan(&self, start: &str, end: &str) -> Result<Vec<KeyValue>, LedgerError> {
        self.ensure_online()?;
        if scan_is_empty(start, end) {
            return Ok(Vec::new());
        }
        let inner = self.inner.read();
        let results = inner
            .entries
            .range::<str, _>(scan_bounds(start, end))
            .map(|(key, entry)| KeyValue {
                key: key.clone(),
                value: entry.value.clone(),
            })
            .collect();
        Ok(results)
    }

    fn commit(&self, batch: CommitBatch) -> Result<u64, LedgerError> {
        self.ensure_online()?;
        let mut inner = self.inner.write();

        for (key, observed) in &batch.reads {
            let current = inner.entries.get(key).map(|entry| entry.version);
            if current != *observed {
                warn!(
                    tx_id = %batch.tx_id,
                    key = %key,
                    ?observed,
                    ?current,
                    "Read conflict, rejecting commit"
                );
                return Err(LedgerError::Conflict { key: key.clone() });
            }
        }

        if batch.writes.is_empty() {
            return Ok(inner.version);
        }

        inner.version += 1;
        let version = inner.version;
        let write_count = batch.writes.len();
        for (key, write) in batch.writes {
            match write {
                Some(value) => {
                    inner.entries.insert(key, VersionedValue { value, version });
                }
                None => {
                    inner.entries.remove(&key);
                }
            }
        }

        debug!(tx_id = %batch.tx_id, version, writes = write_count, "Batch committed");
        Ok(version)
    }

    fn height(&self) -> u64 {
        self.inner.read().version
    }
}
