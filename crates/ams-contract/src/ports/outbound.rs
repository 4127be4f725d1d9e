//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the contract depends on. The host platform supplies the world
//! state, caller identity and event delivery; this crate ships in-memory
//! adapters for tests and the local node.

use crate::domain::{ContractError, LedgerError, UnixSeconds};
use crate::events::{ContractEvent, EventName};
use std::collections::BTreeMap;
use std::ops::Bound;

// =============================================================================
// LEDGER STUB (per-transaction accessor)
// =============================================================================

/// A key/value pair returned by range scans.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// `BTreeMap` range bounds for `[start, end)`, where empty bounds are open.
#[must_use]
pub fn scan_bounds<'a>(start: &'a str, end: &'a str) -> (Bound<&'a str>, Bound<&'a str>) {
    let lower = if start.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start)
    };
    let upper = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end)
    };
    (lower, upper)
}

/// True when `[start, end)` cannot contain any key.
#[must_use]
pub fn scan_is_empty(start: &str, end: &str) -> bool {
    !start.is_empty() && !end.is_empty() && start >= end
}

/// Ledger access scoped to one transaction.
///
/// Every contract operation receives exactly one stub. Writes and the event
/// are staged and become visible only if the whole operation commits.
pub trait LedgerStub {
    /// Unique id of the enclosing transaction.
    fn tx_id(&self) -> &str;

    /// Timestamp assigned to the enclosing transaction.
    fn tx_timestamp(&self) -> UnixSeconds;

    /// Read a key. Returns staged writes of this transaction first.
    fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Stage a write.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Stage a deletion.
    fn del_state(&mut self, key: &str) -> Result<(), LedgerError>;

    /// Scan `[start, end)` in key order. Empty bounds are open.
    fn get_state_by_range(&mut self, start: &str, end: &str)
        -> Result<Vec<KeyValue>, LedgerError>;

    /// Stage the transaction's event. A later call replaces an earlier one.
    fn set_event(&mut self, name: EventName, payload: Vec<u8>) -> Result<(), LedgerError>;
}

// =============================================================================
// WORLD STATE (committed store)
// =============================================================================

/// A committed value and the commit version that wrote it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionedValue {
    pub value: Vec<u8>,
    pub version: u64,
}

/// Everything a transaction asks the world state to apply.
#[derive(Clone, Debug, Default)]
pub struct CommitBatch {
    pub tx_id: String,
    /// Version observed for every key read (`None` = absent when read).
    pub reads: BTreeMap<String, Option<u64>>,
    /// Staged writes (`None` = delete).
    pub writes: BTreeMap<String, Option<Vec<u8>>>,
}

/// The committed key-value store shared by all transactions.
///
/// ## Implementation Notes
///
/// `commit` must be all-or-nothing and must reject the batch with
/// `LedgerError::Conflict` if any key in `reads` changed version since it was
/// observed.
pub trait WorldState: Send + Sync {
    /// Point read of committed state.
    fn get(&self, key: &str) -> Result<Option<VersionedValue>, LedgerError>;

    /// Committed entries in `[start, end)`, key-lexicographic. Empty bounds are open.
    fn scan(&self, start: &str, end: &str) -> Result<Vec<KeyValue>, LedgerError>;

    /// Validate the read set and apply the writes atomically.
    ///
    /// Returns the commit version assigned to the writes.
    fn commit(&self, batch: CommitBatch) -> Result<u64, LedgerError>;

    /// Version of the latest commit.
    fn height(&self) -> u64;
}

// =============================================================================
// IDENTITY PROVIDER
// =============================================================================

/// Resolves the authenticated identity of the invoking principal.
///
/// The returned string is trusted unconditionally.
pub trait IdentityProvider: Send + Sync {
    fn caller_id(&self) -> Result<String, ContractError>;
}

// =============================================================================
// EVENT EMITTER
// =============================================================================

/// Delivers committed events to external subscribers.
pub trait EventEmitter: Send + Sync {
    /// Broadcast an event. Returns the number of subscribers reached.
    fn emit(&self, event: &ContractEvent) -> usize;

    /// Total events emitted.
    fn events_emitted(&self) -> u64;
}
