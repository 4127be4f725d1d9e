//! # Adapters Layer (Outer Hexagon)
//!
//! In-memory implementations of the driven ports, used by tests and the local
//! node. A platform deployment replaces these with its own world state,
//! identity attestation and event delivery.

pub mod event_bus;
pub mod identity;
pub mod memory_state;

pub use event_bus::*;
pub use identity::*;
pub use memory_state::*;
