//! # Asset Management Contract
//!
//! Ownership and lifecycle of registered digital assets on a shared key-value
//! ledger, plus a two-phase ownership transfer between a seller and a buyer.
//!
//! ## Components
//!
//! | Component | Location | Keys |
//! |-----------|----------|------|
//! | User Registry | `application/users.rs` | `<userId>` |
//! | Asset Registry | `application/assets.rs` | `<assetId>` |
//! | Transfer Coordinator | `application/transfers.rs` | `transfer_<assetId>` |
//!
//! All three share one flat keyspace. Every stored record carries a `docType`
//! discriminant (`user`, `asset`, `transfer`) so a reader never mistakes one
//! kind for another.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Owner is never empty after creation | `domain/entities.rs` - `Asset::issue()` |
//! | Locked assets accept no content mutation | `domain/invariants.rs` - `check_unlocked()` |
//! | Sequence advances by one per content mutation | `Asset::apply_update()`, `Asset::reassign()` |
//! | Transfer requests never leave a terminal state | `TransferStatus::can_transition_to()` |
//! | One event per transaction, emitted after commit | `service.rs` - `execute()` |
//!
//! ## Two-Phase Transfer
//!
//! ```text
//! [Pending] ──complete──→ [Completed]   asset: Locked → Active, new owner
//!     │
//!     ├──── reject ─────→ [Rejected]    asset: Locked → Active
//!     └──── cancel ─────→ [Cancelled]   asset: Locked → Active (seller only)
//! ```
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      OUTER LAYER                                │
//! │  adapters/   - in-memory world state, identity, event bus       │
//! │  service.rs  - transactional front end (AssetLedgerApi)         │
//! │  invocation.rs - JSON function/args envelope                    │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - AssetLedgerApi                             │
//! │  ports/outbound.rs - LedgerStub, WorldState, IdentityProvider,  │
//! │                      EventEmitter                               │
//! │  application/      - contract operations, transaction context   │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/entities.rs     - User, Asset, TransferRequest          │
//! │  domain/value_objects.rs - statuses, record kinds, keys         │
//! │  domain/invariants.rs   - authorization and state checks        │
//! │  domain/errors.rs       - ContractError, LedgerError            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ams_contract::prelude::*;
//! use std::sync::Arc;
//!
//! let service = ContractService::new(
//!     ServiceConfig::default(),
//!     Arc::new(InMemoryWorldState::new()),
//!     Arc::new(BroadcastEventBus::new()),
//! );
//! let alice = StaticIdentity::new("alice");
//! let asset = service.create_asset(&alice, "a1", "Painting", "ipfs://..", vec![])?;
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod events;
pub mod invocation;
pub mod ports;
pub mod service;

pub use config::ServiceConfig;
pub use domain::{
    Asset, AssetStatus, ContractError, LedgerError, RecordKind, TransferRequest, TransferStatus,
    User, UserStatus,
};
pub use events::{ContractEvent, EventName};
pub use invocation::{ContractCall, Invocation, InvocationResponse};
pub use service::{ContractService, Outcome, ServiceStats};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports.
pub mod prelude {
    pub use crate::adapters::{
        AnonymousCaller, BroadcastEventBus, EventSubscription, InMemoryWorldState, StaticIdentity,
    };
    pub use crate::application::{AssetContract, InvocationContext, TransactionContext};
    pub use crate::config::ServiceConfig;
    pub use crate::domain::{
        Asset, AssetStatus, ContractError, LedgerError, RecordKind, TransferRequest,
        TransferStatus, User, UserStatus,
    };
    pub use crate::events::{ContractEvent, EventName};
    pub use crate::invocation::{ContractCall, Invocation, InvocationResponse};
    pub use crate::ports::inbound::AssetLedgerApi;
    pub use crate::ports::outbound::{EventEmitter, IdentityProvider, LedgerStub, WorldState};
    pub use crate::service::{ContractService, Outcome, ServiceStats};
}
