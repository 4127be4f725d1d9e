//! Cross-module flows run against the in-memory adapters.

pub mod asset_lifecycle;
pub mod concurrency;
pub mod transfer_flows;

use std::sync::Arc;

use ams_contract::prelude::*;

/// Service wired to fresh in-memory adapters.
pub type TestService = ContractService<InMemoryWorldState, BroadcastEventBus>;

pub fn new_service() -> TestService {
    ContractService::new(
        ServiceConfig::default(),
        Arc::new(InMemoryWorldState::new()),
        Arc::new(BroadcastEventBus::new()),
    )
}

pub fn who(id: &str) -> StaticIdentity {
    StaticIdentity::new(id)
}
