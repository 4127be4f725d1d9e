//! # Error Types
//!
//! Failures surfaced by contract operations. Every error aborts the enclosing
//! transaction; nothing is retried internally.

use super::value_objects::RecordKind;
use thiserror::Error;

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors from the world-state backend or the transaction arena.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Backend could not serve the request.
    #[error("world state unavailable: {0}")]
    Unavailable(String),

    /// A key read by the transaction changed before the transaction committed.
    #[error("read conflict on key {key}")]
    Conflict { key: String },

    /// Key rejected by the ledger (empty keys are not addressable).
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

// =============================================================================
// CONTRACT ERRORS
// =============================================================================

/// Errors returned by User Registry, Asset Registry and Transfer Coordinator.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Underlying read or write failed.
    #[error("failed to access world state: {0}")]
    Store(#[from] LedgerError),

    /// Stored bytes do not match the expected record shape.
    #[error("record at {key} is not a valid {expected} record: {reason}")]
    Decode {
        key: String,
        expected: RecordKind,
        reason: String,
    },

    /// A record could not be serialized.
    #[error("failed to encode {kind} record {key}: {reason}")]
    Encode {
        key: String,
        kind: RecordKind,
        reason: String,
    },

    /// No record at the requested key.
    #[error("the {kind} {id} does not exist")]
    NotFound { kind: RecordKind, id: String },

    /// A record already occupies the requested key.
    #[error("the {kind} {id} already exists")]
    AlreadyExists { kind: RecordKind, id: String },

    /// Caller is not allowed to perform the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Operation is not legal in the record's current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Caller identity could not be resolved.
    #[error("failed to get client identity: {0}")]
    Identity(String),
}

impl ContractError {
    /// Stable error code for the invocation surface.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Store(_) => "STORE_ERROR",
            Self::Decode { .. } => "DECODE_ERROR",
            Self::Encode { .. } => "ENCODE_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::AlreadyExists { .. } => "ALREADY_EXISTS",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::Identity(_) => "IDENTITY_ERROR",
        }
    }

    /// True when the transaction lost an optimistic concurrency race.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Store(LedgerError::Conflict { .. }))
    }
}

// =============================================================================
// TESTS
// =============================================================================
