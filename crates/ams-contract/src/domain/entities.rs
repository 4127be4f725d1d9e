//! # Domain Entities
//!
//! Records stored in the world state. Field tags are part of the external
//! record format and must not change.
//!
//! Users, assets and transfer requests share one flat keyspace, so every stored
//! record carries a `docType` discriminant. Readers check the discriminant
//! before touching business fields.

use super::errors::ContractError;
use super::value_objects::{
    transfer_key, AssetStatus, RecordKind, TransferStatus, UnixSeconds, UserStatus,
};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

// =============================================================================
// USER
// =============================================================================

/// A network participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique key, immutable once created.
    pub id: String,
    /// Caller identity bound at registration.
    pub wallet_id: String,
    pub role: String,
    pub status: UserStatus,
    /// Version counter, starts at 1. Reserved for optimistic concurrency.
    pub sequence: u64,
    pub updated_at: UnixSeconds,
}

impl User {
    /// Create an active user at sequence 1.
    pub fn new(
        id: impl Into<String>,
        wallet_id: impl Into<String>,
        role: impl Into<String>,
        now: UnixSeconds,
    ) -> Self {
        Self {
            id: id.into(),
            wallet_id: wallet_id.into(),
            role: role.into(),
            status: UserStatus::Active,
            sequence: 1,
            updated_at: now,
        }
    }
}

// =============================================================================
// ASSET
// =============================================================================

/// The transferable resource.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    /// Identity of the current owner. Never empty after creation.
    pub owner: String,
    /// Opaque pointer to off-ledger metadata.
    pub meta_url: String,
    pub status: AssetStatus,
    /// Viewer ids, or the `"public"` sentinel.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub views: Vec<String>,
    /// Incremented by exactly one on every content mutation.
    pub sequence: u64,
    /// Transaction id of the last write.
    pub last_txid: String,
    pub updated_at: UnixSeconds,
    pub updated_by: String,
}

/// Stamp left on an asset by the transaction that writes it.
#[derive(Clone, Copy, Debug)]
pub struct WriteStamp<'a> {
    pub caller: &'a str,
    pub tx_id: &'a str,
    pub timestamp: UnixSeconds,
}

impl Asset {
    /// Issue a new active asset owned by the issuing caller.
    pub fn issue(
        id: impl Into<String>,
        name: impl Into<String>,
        meta_url: impl Into<String>,
        views: Vec<String>,
        stamp: WriteStamp<'_>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            owner: stamp.caller.to_string(),
            meta_url: meta_url.into(),
            status: AssetStatus::Active,
            views,
            sequence: 1,
            last_txid: stamp.tx_id.to_string(),
            updated_at: stamp.timestamp,
            updated_by: stamp.caller.to_string(),
        }
    }

    /// Whether the asset is held by an in-flight transfer.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.status == AssetStatus::Locked
    }

    /// Replace the editable content and advance the sequence.
    pub fn apply_update(
        &mut self,
        name: String,
        meta_url: String,
        status: AssetStatus,
        views: Vec<String>,
        stamp: WriteStamp<'_>,
    ) -> Result<(), ContractError> {
        let sequence = self.next_sequence()?;
        self.name = name;
        self.meta_url = meta_url;
        self.status = status;
        self.views = views;
        self.sequence = sequence;
        self.stamp(stamp);
        Ok(())
    }

    /// Lock for a pending transfer. Ownership and sequence are untouched.
    pub fn lock(&mut self, stamp: WriteStamp<'_>) {
        self.status = AssetStatus::Locked;
        self.stamp(stamp);
    }

    /// Release the transfer lock without changing ownership.
    pub fn unlock(&mut self, stamp: WriteStamp<'_>) {
        self.status = AssetStatus::Active;
        self.stamp(stamp);
    }

    /// Hand the asset to a new owner and release the lock.
    pub fn reassign(
        &mut self,
        new_owner: impl Into<String>,
        stamp: WriteStamp<'_>,
    ) -> Result<(), ContractError> {
        let sequence = self.next_sequence()?;
        self.owner = new_owner.into();
        self.status = AssetStatus::Active;
        self.sequence = sequence;
        self.stamp(stamp);
        Ok(())
    }

    /// Sequence after one more content mutation.
    fn next_sequence(&self) -> Result<u64, ContractError> {
        self.sequence.checked_add(1).ok_or_else(|| {
            ContractError::InvalidState(format!("asset {} sequence is exhausted", self.id))
        })
    }

    fn stamp(&mut self, stamp: WriteStamp<'_>) {
        self.last_txid = stamp.tx_id.to_string();
        self.updated_at = stamp.timestamp;
        self.updated_by = stamp.caller.to_string();
    }
}

// =============================================================================
// TRANSFER REQUEST
// =============================================================================

/// Two-phase transfer record, one per asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub asset_id: String,
    /// Owner identity at initiation.
    pub seller_id: String,
    /// Declared buyer; overwritten with the confirming caller on completion.
    pub buyer_id: String,
    pub status: TransferStatus,
}

impl TransferRequest {
    /// Open a pending transfer.
    pub fn open(
        asset_id: impl Into<String>,
        seller_id: impl Into<String>,
        buyer_id: impl Into<String>,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            seller_id: seller_id.into(),
            buyer_id: buyer_id.into(),
            status: TransferStatus::Pending,
        }
    }

    /// Move to a new status.
    pub fn transition_to(&mut self, next: TransferStatus) -> Result<(), ContractError> {
        if !self.status.can_transition_to(next) {
            return Err(ContractError::InvalidState(format!(
                "transfer of {} cannot move from {} to {}",
                self.asset_id, self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }
}

// =============================================================================
// STORED RECORD ENVELOPE
// =============================================================================

/// A record as written to the world state, tagged by `docType`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "docType", rename_all = "lowercase")]
pub enum LedgerRecord {
    User(User),
    Asset(Asset),
    Transfer(TransferRequest),
}

#[derive(Deserialize)]
struct RecordHeader {
    #[serde(rename = "docType")]
    doc_type: Option<RecordKind>,
}

impl LedgerRecord {
    /// Read only the discriminant, without decoding business fields.
    ///
    /// Returns `None` for bytes that are not a tagged record.
    #[must_use]
    pub fn peek_kind(bytes: &[u8]) -> Option<RecordKind> {
        serde_json::from_slice::<RecordHeader>(bytes)
            .ok()
            .and_then(|header| header.doc_type)
    }
}

/// A typed record that lives at a derivable key.
pub trait Record: Sized {
    const KIND: RecordKind;

    /// World-state key of this record.
    fn key(&self) -> String;

    fn to_record(&self) -> LedgerRecord;

    fn from_record(record: LedgerRecord) -> Option<Self>;

    /// Serialize with the `docType` tag.
    fn encode(&self) -> Result<Vec<u8>, ContractError> {
        serde_json::to_vec(&self.to_record()).map_err(|e| ContractError::Encode {
            key: self.key(),
            kind: Self::KIND,
            reason: e.to_string(),
        })
    }

    /// Decode bytes stored at `key`, rejecting records of another kind.
    fn decode(key: &str, bytes: &[u8]) -> Result<Self, ContractError> {
        let decode_error = |reason: String| ContractError::Decode {
            key: key.to_string(),
            expected: Self::KIND,
            reason,
        };

        match LedgerRecord::peek_kind(bytes) {
            Some(kind) if kind == Self::KIND => {}
            Some(kind) => return Err(decode_error(format!("found {kind} record"))),
            None => return Err(decode_error("missing docType".to_string())),
        }

        let record: LedgerRecord =
            serde_json::from_slice(bytes).map_err(|e| decode_error(e.to_string()))?;
        Self::from_record(record).ok_or_else(|| decode_error("kind mismatch".to_string()))
    }
}

impl Record for User {
    const KIND: RecordKind = RecordKind::User;

    fn key(&self) -> String {
        self.id.clone()
    }

    fn to_record(&self) -> LedgerRecord {
        LedgerRecord::User(self.clone())
    }

    fn from_record(record: LedgerRecord) -> Option<Self> {
        match record {
            LedgerRecord::User(user) => Some(user),
            _ => None,
        }
    }
}

impl Record for Asset {
    const KIND: RecordKind = RecordKind::Asset;

    fn key(&self) -> String {
        self.id.clone()
    }

    fn to_record(&self) -> LedgerRecord {
        LedgerRecord::Asset(self.clone())
    }

    fn from_record(record: LedgerRecord) -> Option<Self> {
        match record {
            LedgerRecord::Asset(asset) => Some(asset),
            _ => None,
        }
    }
}

impl Record for TransferRequest {
    const KIND: RecordKind = RecordKind::Transfer;

    fn key(&self) -> String {
        transfer_key(&self.asset_id)
    }

    fn to_record(&self) -> LedgerRecord {
        LedgerRecord::Transfer(self.clone())
    }

    fn from_record(record: LedgerRecord) -> Option<Self> {
        match record {
            LedgerRecord::Transfer(request) => Some(request),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
