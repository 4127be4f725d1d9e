//! # Domain Layer (Inner Hexagon)
//!
//! Records, status machines and business rules for the asset ledger.
//! NO I/O: everything here operates on values already read from the ledger.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
