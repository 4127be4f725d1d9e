//! # Application Layer
//!
//! Contract operations and the transaction arena they run in.
//!
//! - `transaction`: staged writes + event, committed atomically
//! - `contract`: `AssetContract` and the invocation context
//! - `users`, `assets`, `transfers`: User Registry, Asset Registry,
//!   Transfer Coordinator

pub mod assets;
pub mod contract;
pub mod transaction;
pub mod transfers;
pub mod users;

pub use contract::{AssetContract, InvocationContext};
pub use transaction::{CommitReceipt, TransactionContext};
