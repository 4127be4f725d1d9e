//! # Event Schema
//!
//! Named payloads broadcast to subscribers after a transaction commits.
//! At most one event per transaction.
//!
//! | Event | Payload |
//! |-------|---------|
//! | `AssetCreated` | asset JSON |
//! | `AssetUpdated` | asset JSON |
//! | `AssetDeleted` | raw asset id bytes |
//! | `TransferInitiated` | transfer request JSON |
//! | `AssetTransferred` | asset JSON |
//! | `TransferRejected` | transfer request JSON |
//! | `TransferCancelled` | transfer request JSON |

use crate::domain::{ContractError, RecordKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed event names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventName {
    AssetCreated,
    AssetUpdated,
    AssetDeleted,
    TransferInitiated,
    AssetTransferred,
    TransferRejected,
    TransferCancelled,
}

impl EventName {
    /// Every event name, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::AssetCreated,
        Self::AssetUpdated,
        Self::AssetDeleted,
        Self::TransferInitiated,
        Self::AssetTransferred,
        Self::TransferRejected,
        Self::TransferCancelled,
    ];

    /// Name as delivered to subscribers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AssetCreated => "AssetCreated",
            Self::AssetUpdated => "AssetUpdated",
            Self::AssetDeleted => "AssetDeleted",
            Self::TransferInitiated => "TransferInitiated",
            Self::AssetTransferred => "AssetTransferred",
            Self::TransferRejected => "TransferRejected",
            Self::TransferCancelled => "TransferCancelled",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A committed event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractEvent {
    pub name: EventName,
    /// Transaction that produced the event.
    pub tx_id: String,
    pub payload: Vec<u8>,
}

impl ContractEvent {
    /// Payload parsed as JSON, if it is JSON.
    #[must_use]
    pub fn payload_json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.payload).ok()
    }
}

/// Serialize a record body (without the `docType` tag) as an event payload.
pub fn record_payload<T: Serialize>(
    key: &str,
    kind: RecordKind,
    body: &T,
) -> Result<Vec<u8>, ContractError> {
    serde_json::to_vec(body).map_err(|e| ContractError::Encode {
        key: key.to_string(),
        kind,
        reason: e.to_string(),
    })
}
