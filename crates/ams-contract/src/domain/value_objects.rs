//! # Value Objects
//!
//! Status machines, record kinds and the key scheme shared by every record in
//! the flat world-state namespace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unix timestamp in seconds.
pub type UnixSeconds = i64;

/// Prefix of transfer request keys.
pub const TRANSFER_KEY_PREFIX: &str = "transfer_";

/// Derive the transfer request key for an asset.
///
/// One key per asset, so at most one outstanding transfer per asset.
#[must_use]
pub fn transfer_key(asset_id: &str) -> String {
    format!("{TRANSFER_KEY_PREFIX}{asset_id}")
}

// =============================================================================
// RECORD KIND
// =============================================================================

/// Discriminant stored in every record under the `docType` tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    User,
    Asset,
    Transfer,
}

impl RecordKind {
    /// Tag value as written to the ledger.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Asset => "asset",
            Self::Transfer => "transfer",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// STATUS ENUMS
// =============================================================================

/// Participant status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    #[default]
    Active,
    Suspended,
    Deleted,
}

/// Asset status.
///
/// `Locked` is owned by the transfer protocol: it is set by initiate and
/// cleared by complete, reject or cancel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetStatus {
    #[default]
    Active,
    Locked,
    Deleted,
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Transfer request status.
///
/// ```text
/// Pending ──→ Completed
///    │──────→ Rejected
///    └──────→ Cancelled
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    #[default]
    Pending,
    Completed,
    Rejected,
    Cancelled,
}

impl TransferStatus {
    /// Terminal states have no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether `self -> next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (
                Self::Pending,
                Self::Completed | Self::Rejected | Self::Cancelled
            )
        )
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
