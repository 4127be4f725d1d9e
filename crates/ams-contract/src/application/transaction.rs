//! # Transaction Context
//!
//! Arena of pending writes for one contract operation.
//!
//! Reads go to the staged writes first, then to committed state, and record the
//! version observed. Nothing reaches the world state until `commit`, which
//! hands the read set and all writes to `WorldState::commit` in one batch. An
//! operation that fails simply drops its context.

use crate::domain::{LedgerError, UnixSeconds};
use crate::events::{ContractEvent, EventName};
use crate::ports::outbound::{
    scan_bounds, scan_is_empty, CommitBatch, KeyValue, LedgerStub, WorldState,
};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Result of a successful commit.
#[derive(Clone, Debug)]
pub struct CommitReceipt {
    pub tx_id: String,
    /// Commit version assigned by the world state.
    pub version: u64,
    pub writes: usize,
    /// Event to deliver now that the writes are durable.
    pub event: Option<ContractEvent>,
}

/// `LedgerStub` implementation that stages everything until commit.
pub struct TransactionContext<'s, S: WorldState + ?Sized> {
    state: &'s S,
    tx_id: String,
    timestamp: UnixSeconds,
    reads: BTreeMap<String, Option<u64>>,
    writes: BTreeMap<String, Option<Vec<u8>>>,
    event: Option<ContractEvent>,
}

impl<'s, S: WorldState + ?Sized> TransactionContext<'s, S> {
    /// Open a transaction with a fresh id and the current wall-clock time.
    pub fn begin(state: &'s S) -> Self {
        Self::new(
            state,
            Uuid::new_v4().simple().to_string(),
            chrono::Utc::now().timestamp(),
        )
    }

    /// Open a transaction with an explicit id and timestamp.
    pub fn new(state: &'s S, tx_id: impl Into<String>, timestamp: UnixSeconds) -> Self {
        Self {
            state,
            tx_id: tx_id.into(),
            timestamp,
            reads: BTreeMap::new(),
            writes: BTreeMap::new(),
            event: None,
        }
    }

    /// Number of keys with a staged write or delete.
    #[must_use]
    pub fn staged_writes(&self) -> usize {
        self.writes.len()
    }

    /// The staged event, if any.
    #[must_use]
    pub fn staged_event(&self) -> Option<&ContractEvent> {
        self.event.as_ref()
    }

    /// Apply the staged writes atomically.
    ///
    /// Read-only transactions never touch the world state.
    pub fn commit(self) -> Result<CommitReceipt, LedgerError> {
        let writes = self.writes.len();
        if writes == 0 && self.event.is_none() {
            return Ok(CommitReceipt {
                tx_id: self.tx_id,
                version: self.state.height(),
                writes: 0,
                event: None,
            });
        }

        let version = self.state.commit(CommitBatch {
            tx_id: self.tx_id.clone(),
            reads: self.reads,
            writes: self.writes,
        })?;

        Ok(CommitReceipt {
            tx_id: self.tx_id,
            version,
            writes,
            event: self.event,
        })
    }

    fn check_key(key: &str) -> Result<(), LedgerError> {
        if key.is_empty() {
            return Err(LedgerError::InvalidKey(key.to_string()));
        }
        Ok(())
    }
}

impl<S: WorldState + ?Sized> LedgerStub for TransactionContext<'_, S> {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn tx_timestamp(&self) -> UnixSeconds {
        self.timestamp
    }

    fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Self::check_key(key)?;
        if let Some(staged) = self.writes.get(key) {
            return Ok(staged.clone());
        }

        let committed = self.state.get(key)?;
        self.reads
            .entry(key.to_string())
            .or_insert_with(|| committed.as_ref().map(|entry| entry.version));
        Ok(committed.map(|entry| entry.value))
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        Self::check_key(key)?;
        self.writes.insert(key.to_string(), Some(value));
        Ok(())
    }

    fn del_state(&mut self, key: &str) -> Result<(), LedgerError> {
        Self::check_key(key)?;
        self.writes.insert(key.to_string(), None);
        Ok(())
    }

    fn get_state_by_range(
        &mut self,
        start: &str,
        end: &str,
    ) -> Result<Vec<KeyValue>, LedgerError> {
        let mut merged: BTreeMap<String, Vec<u8>> = self
            .state
            .scan(start, end)?
            .into_iter()
            .map(|kv| (kv.key, kv.value))
            .collect();

        if !scan_is_empty(start, end) {
            for (key, write) in self.writes.range::<str, _>(scan_bounds(start, end)) {
                match write {
                    Some(value) => {
                        merged.insert(key.clone(), value.clone());
                    }
                    None => {
                        merged.remove(key);
                    }
                }
            }
        }

        Ok(merged
            .into_iter()
            .map(|(key, value)| KeyValue { key, value })
            .collect())
    }

    fn set_event(&mut self, name: EventName, payload: Vec<u8>) -> Result<(), LedgerError> {
        self.event = Some(ContractEvent {
            name,
            tx_id: self.tx_id.clone(),
            payload,
        });
        Ok(())
    }
}
