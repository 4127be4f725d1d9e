//! # Driving Ports (API - Inbound)
//!
//! Typed operations exposed to callers. Each call runs as one transaction.

use crate::domain::{Asset, AssetStatus, ContractError, TransferRequest, User};
use crate::ports::outbound::IdentityProvider;

/// Public surface of the asset ledger.
///
/// Mutating operations take the caller's identity provider; queries do not
/// depend on who asks.
pub trait AssetLedgerApi: Send + Sync {
    // === User Registry ===

    fn user_exists(&self, id: &str) -> Result<bool, ContractError>;

    fn create_user(
        &self,
        caller: &dyn IdentityProvider,
        id: &str,
        name: &str,
        role: &str,
    ) -> Result<User, ContractError>;

    fn read_user(&self, id: &str) -> Result<User, ContractError>;

    // === Asset Registry ===

    fn asset_exists(&self, id: &str) -> Result<bool, ContractError>;

    fn create_asset(
        &self,
        caller: &dyn IdentityProvider,
        id: &str,
        name: &str,
        meta_url: &str,
        views: Vec<String>,
    ) -> Result<Asset, ContractError>;

    fn read_asset(&self, id: &str) -> Result<Asset, ContractError>;

    fn update_asset(
        &self,
        caller: &dyn IdentityProvider,
        id: &str,
        name: &str,
        meta_url: &str,
        status: AssetStatus,
        views: Vec<String>,
    ) -> Result<Asset, ContractError>;

    fn delete_asset(&self, caller: &dyn IdentityProvider, id: &str) -> Result<(), ContractError>;

    fn get_all_assets(&self) -> Result<Vec<Asset>, ContractError>;

    // === Transfer Coordinator ===

    fn initiate_transfer(
        &self,
        caller: &dyn IdentityProvider,
        asset_id: &str,
        buyer_wallet_id: &str,
    ) -> Result<TransferRequest, ContractError>;

    fn complete_transfer(
        &self,
        caller: &dyn IdentityProvider,
        asset_id: &str,
    ) -> Result<Asset, ContractError>;

    fn reject_transfer(
        &self,
        caller: &dyn IdentityProvider,
        asset_id: &str,
    ) -> Result<TransferRequest, ContractError>;

    fn cancel_transfer(
        &self,
        caller: &dyn IdentityProvider,
        asset_id: &str,
    ) -> Result<TransferRequest, ContractError>;

    fn read_transfer(&self, asset_id: &str) -> Result<TransferRequest, ContractError>;
}
