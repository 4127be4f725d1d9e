//! # Asset Ledger Service
//!
//! Runs each contract operation as one transaction against a `WorldState` and
//! delivers the staged event through an `EventEmitter` once the commit has
//! succeeded.
//!
//! ```text
//! caller ──► execute ──► TransactionContext ──► AssetContract operation
//!                              │
//!                              ▼ commit (read-set validated)
//!                         WorldState ──► EventEmitter::emit
//! ```
//!
//! A failed operation or a rejected commit drops every staged write and the
//! staged event.

use crate::adapters::AnonymousCaller;
use crate::application::{AssetContract, CommitReceipt, InvocationContext, TransactionContext};
use crate::config::ServiceConfig;
use crate::domain::{Asset, AssetStatus, ContractError, TransferRequest, User};
use crate::ports::inbound::AssetLedgerApi;
use crate::ports::outbound::{EventEmitter, IdentityProvider, LedgerStub, WorldState};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, field, info_span, instrument, warn};

/// Running counters for the service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ServiceStats {
    /// Operations started.
    pub invocations: u64,
    /// Operations whose transaction committed.
    pub committed: u64,
    /// Operations that failed, including commit conflicts.
    pub rejected: u64,
    /// Commits refused because a read key changed.
    pub conflicts: u64,
    /// Events handed to the emitter.
    pub events_emitted: u64,
}

/// Value returned by an operation together with its commit receipt.
#[derive(Clone, Debug)]
pub struct Outcome<T> {
    pub value: T,
    pub receipt: CommitReceipt,
}

/// Transactional front end over `AssetContract`.
pub struct ContractService<S: WorldState, E: EventEmitter> {
    config: ServiceConfig,
    contract: AssetContract,
    state: Arc<S>,
    events: Arc<E>,
    stats: RwLock<ServiceStats>,
}

impl<S: WorldState, E: EventEmitter> ContractService<S, E> {
    pub fn new(config: ServiceConfig, state: Arc<S>, events: Arc<E>) -> Self {
        Self {
            config,
            contract: AssetContract::new(),
            state,
            events,
            stats: RwLock::new(ServiceStats::default()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &Arc<S> {
        &self.state
    }

    #[must_use]
    pub fn events(&self) -> &Arc<E> {
        &self.events
    }

    /// Snapshot of the running counters.
    #[must_use]
    pub fn stats(&self) -> ServiceStats {
        self.stats.read().clone()
    }

    /// Run `operation` in a fresh transaction and commit it.
    ///
    /// The event staged by the operation, if any, is emitted only after the
    /// world state accepted the commit.
    pub fn execute<T>(
        &self,
        operation: &'static str,
        identity: &dyn IdentityProvider,
        f: impl FnOnce(&AssetContract, &mut InvocationContext<'_>) -> Result<T, ContractError>,
    ) -> Result<Outcome<T>, ContractError> {
        let mut tx = TransactionContext::begin(self.state.as_ref());
        let span = info_span!("contract", operation, tx_id = %tx.tx_id(), version = field::Empty);
        let _enter = span.enter();
        self.stats.write().invocations += 1;

        let result = {
            let mut ctx = InvocationContext::new(&mut tx, identity);
            f(&self.contract, &mut ctx)
        };
        let value = match result {
            Ok(value) => value,
            Err(e) => return Err(self.reject(operation, e)),
        };

        let receipt = match tx.commit() {
            Ok(receipt) => receipt,
            Err(e) => return Err(self.reject(operation, e.into())),
        };
        span.record("version", receipt.version);

        let mut stats = self.stats.write();
        stats.committed += 1;
        if let Some(event) = &receipt.event {
            if self.config.log_payloads {
                debug!(event = %event.name, payload = ?event.payload_json(), "Event payload");
            }
            let receivers = self.events.emit(event);
            stats.events_emitted += 1;
            debug!(event = %event.name, receivers, "Event emitted");
        }
        debug!(writes = receipt.writes, "Operation committed");

        Ok(Outcome { value, receipt })
    }

    fn reject(&self, operation: &'static str, error: ContractError) -> ContractError {
        let mut stats = self.stats.write();
        stats.rejected += 1;
        if error.is_conflict() {
            stats.conflicts += 1;
        }
        warn!(operation, code = error.kind(), error = %error, "Operation rejected");
        error
    }

    fn query<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&AssetContract, &mut InvocationContext<'_>) -> Result<T, ContractError>,
    ) -> Result<T, ContractError> {
        self.execute(operation, &AnonymousCaller, f)
            .map(|outcome| outcome.value)
    }

    fn mutate<T>(
        &self,
        operation: &'static str,
        caller: &dyn IdentityProvider,
        f: impl FnOnce(&AssetContract, &mut InvocationContext<'_>) -> Result<T, ContractError>,
    ) -> Result<T, ContractError> {
        self.execute(operation, caller, f).map(|outcome| outcome.value)
    }
}

impl<S: WorldState, E: EventEmitter> AssetLedgerApi for ContractService<S, E> {
    #[instrument(level = "debug", skip(self))]
    fn user_exists(&self, id: &str) -> Result<bool, ContractError> {
        self.query("user_exists", |c, ctx| c.user_exists(ctx, id))
    }

    #[instrument(skip(self, caller))]
    fn create_user(
        &self,
        caller: &dyn IdentityProvider,
        id: &str,
        name: &str,
        role: &str,
    ) -> Result<User, ContractError> {
        self.mutate("create_user", caller, |c, ctx| {
            c.create_user(ctx, id, name, role)
        })
    }

    #[instrument(level = "debug", skip(self))]
    fn read_user(&self, id: &str) -> Result<User, ContractError> {
        self.query("read_user", |c, ctx| c.read_user(ctx, id))
    }

    #[instrument(level = "debug", skip(self))]
    fn asset_exists(&self, id: &str) -> Result<bool, ContractError> {
        self.query("asset_exists", |c, ctx| c.asset_exists(ctx, id))
    }

    #[instrument(skip(self, caller))]
    fn create_asset(
        &self,
        caller: &dyn IdentityProvider,
        id: &str,
        name: &str,
        meta_url: &str,
        views: Vec<String>,
    ) -> Result<Asset, ContractError> {
        self.mutate("create_asset", caller, |c, ctx| {
            c.create_asset(ctx, id, name, meta_url, views)
        })
    }

    #[instrument(level = "debug", skip(self))]
    fn read_asset(&self, id: &str) -> Result<Asset, ContractError> {
        self.query("read_asset", |c, ctx| c.read_asset(ctx, id))
    }

    #[instrument(skip(self, caller))]
    fn update_asset(
        &self,
        caller: &dyn IdentityProvider,
        id: &str,
        name: &str,
        meta_url: &str,
        status: AssetStatus,
        views: Vec<String>,
    ) -> Result<Asset, ContractError> {
        self.mutate("update_asset", caller, |c, ctx| {
            c.update_asset(ctx, id, name, meta_url, status, views)
        })
    }

    #[instrument(skip(self, caller))]
    fn delete_asset(&self, caller: &dyn IdentityProvider, id: &str) -> Result<(), ContractError> {
        self.mutate("delete_asset", caller, |c, ctx| c.delete_asset(ctx, id))
    }

    #[instrument(level = "debug", skip(self))]
    fn get_all_assets(&self) -> Result<Vec<Asset>, ContractError> {
        self.query("get_all_assets", |c, ctx| c.get_all_assets(ctx))
    }

    #[instrument(skip(self, caller))]
    fn initiate_transfer(
        &self,
        caller: &dyn IdentityProvider,
        asset_id: &str,
        buyer_wallet_id: &str,
    ) -> Result<TransferRequest, ContractError> {
        self.mutate("initiate_transfer", caller, |c, ctx| {
            c.initiate_transfer(ctx, asset_id, buyer_wallet_id)
        })
    }

    #[instrument(skip(self, caller))]
    fn complete_transfer(
        &self,
        caller: &dyn IdentityProvider,
        asset_id: &str,
    ) -> Result<Asset, ContractError> {
        self.mutate("complete_transfer", caller, |c, ctx| {
            c.complete_transfer(ctx, asset_id)
        })
    }

    #[instrument(skip(self, caller))]
    fn reject_transfer(
        &self,
        caller: &dyn IdentityProvider,
        asset_id: &str,
    ) -> Result<TransferRequest, ContractError> {
        self.mutate("reject_transfer", caller, |c, ctx| {
            c.reject_transfer(ctx, asset_id)
        })
    }

    #[instrument(skip(self, caller))]
    fn cancel_transfer(
        &self,
        caller: &dyn IdentityProvider,
        asset_id: &str,
    ) -> Result<TransferRequest, ContractError> {
        self.mutate("cancel_transfer", caller, |c, ctx| {
            c.cancel_transfer(ctx, asset_id)
        })
    }

    #[instrument(level = "debug", skip(self))]
    fn read_transfer(&self, asset_id: &str) -> Result<TransferRequest, ContractError> {
        self.query("read_transfer", |c, ctx| c.read_transfer(ctx, asset_id))
    }
}
