//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Ports (Inbound)**: `AssetLedgerApi`
//! - **Driven Ports (Outbound)**: `LedgerStub`, `WorldState`, `IdentityProvider`,
//!   `EventEmitter`
//!
//! No concrete implementations live here.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
