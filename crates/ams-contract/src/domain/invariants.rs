//! # Domain Invariants
//!
//! Rules checked before any write is staged.
//!
//! | Rule | Enforced by |
//! |------|-------------|
//! | Only the owner edits or offers an asset | `check_owner` |
//! | A locked asset accepts no content mutation | `check_unlocked` |
//! | `Locked` is set only by the transfer protocol | `check_settable_status` |
//! | Only `Pending` transfers can be resolved | `check_pending` |
//! | Only the seller cancels | `check_seller` |
//!
//! Sequence advancement lives on the entity itself: `Asset::apply_update` and
//! `Asset::reassign`.

use super::entities::{Asset, TransferRequest};
use super::errors::ContractError;
use super::value_objects::AssetStatus;

/// Caller must own the asset.
pub fn check_owner(asset: &Asset, caller: &str, action: &str) -> Result<(), ContractError> {
    if asset.owner != caller {
        return Err(ContractError::Forbidden(format!(
            "only the owner can {action} asset {}",
            asset.id
        )));
    }
    Ok(())
}

/// Asset must not be held by an in-flight transfer.
pub fn check_unlocked(asset: &Asset) -> Result<(), ContractError> {
    if asset.is_locked() {
        return Err(ContractError::InvalidState(format!(
            "asset {} is locked by a pending transfer",
            asset.id
        )));
    }
    Ok(())
}

/// Content edits may not take or fake the transfer lock.
pub fn check_settable_status(status: AssetStatus) -> Result<(), ContractError> {
    if status == AssetStatus::Locked {
        return Err(ContractError::InvalidState(
            "status Locked can only be set by initiating a transfer".to_string(),
        ));
    }
    Ok(())
}

/// Transfer must still be open.
pub fn check_pending(request: &TransferRequest) -> Result<(), ContractError> {
    if request.status.is_terminal() {
        return Err(ContractError::InvalidState(format!(
            "transfer of {} is not pending (status {})",
            request.asset_id, request.status
        )));
    }
    Ok(())
}

/// Caller must be the identity that initiated the transfer.
pub fn check_seller(request: &TransferRequest, caller: &str) -> Result<(), ContractError> {
    if request.seller_id != caller {
        return Err(ContractError::Forbidden(format!(
            "only the seller can cancel the transfer of {}",
            request.asset_id
        )));
    }
    Ok(())
}
