//! Transfer Coordinator operations.
//!
//! ```text
//!            initiate                complete
//!  Active ─────────────► Locked ─────────────► Active (new owner)
//!                          │
//!                          │ reject / cancel
//!                          ▼
//!                        Active (same owner)
//! ```
//!
//! The request at `transfer_<assetId>` moves `Pending -> Completed | Rejected |
//! Cancelled` in the same transaction as the asset write.

use super::contract::{AssetContract, InvocationContext};
use crate::domain::{
    check_owner, check_pending, check_seller, check_unlocked, transfer_key, Asset,
    ContractError, Record, RecordKind, TransferRequest, TransferStatus, WriteStamp,
};
use crate::events::{record_payload, EventName};
use tracing::{debug, info, warn};

impl AssetContract {
    /// Lock the asset and open a pending transfer to `buyer_wallet_id`.
    ///
    /// A resolved request left at the same key is replaced.
    pub fn initiate_transfer(
        &self,
        ctx: &mut InvocationContext<'_>,
        asset_id: &str,
        buyer_wallet_id: &str,
    ) -> Result<TransferRequest, ContractError> {
        let mut asset = self.read_asset(ctx, asset_id)?;
        let caller = ctx.caller()?;

        if let Err(e) =
            check_owner(&asset, &caller, "transfer").and_then(|()| check_unlocked(&asset))
        {
            warn!(asset = %asset_id, caller = %caller, error = %e, "Transfer initiation refused");
            return Err(e);
        }

        let tx_id = ctx.tx_id();
        asset.lock(WriteStamp {
            caller: &caller,
            tx_id: &tx_id,
            timestamp: ctx.timestamp(),
        });
        ctx.write(&asset)?;

        let request = TransferRequest::open(asset_id, caller, buyer_wallet_id);
        ctx.write(&request)?;
        ctx.emit(
            EventName::TransferInitiated,
            record_payload(&request.key(), RecordKind::Transfer, &request)?,
        )?;

        info!(
            asset = %asset_id,
            seller = %request.seller_id,
            buyer = %request.buyer_id,
            "Transfer initiated"
        );
        Ok(request)
    }

    /// Hand the asset to the declared buyer and close the request.
    ///
    /// The confirming caller is recorded as the request's buyer; it is not
    /// compared with the buyer declared at initiation.
    pub fn complete_transfer(
        &self,
        ctx: &mut InvocationContext<'_>,
        asset_id: &str,
    ) -> Result<Asset, ContractError> {
        let mut request = self.read_transfer(ctx, asset_id)?;
        let caller = ctx.caller()?;
        self.ensure_pending(&request)?;

        let mut asset = self.read_asset(ctx, asset_id)?;
        let tx_id = ctx.tx_id();
        asset.reassign(
            request.buyer_id.clone(),
            WriteStamp {
                caller: &caller,
                tx_id: &tx_id,
                timestamp: ctx.timestamp(),
            },
        )?;
        ctx.write(&asset)?;

        request.transition_to(TransferStatus::Completed)?;
        request.buyer_id = caller;
        ctx.write(&request)?;
        ctx.emit(
            EventName::AssetTransferred,
            record_payload(asset_id, RecordKind::Asset, &asset)?,
        )?;

        info!(
            asset = %asset_id,
            seller = %request.seller_id,
            owner = %asset.owner,
            sequence = asset.sequence,
            "Transfer completed"
        );
        Ok(asset)
    }

    /// Release the lock and mark the request rejected. Any caller may reject.
    pub fn reject_transfer(
        &self,
        ctx: &mut InvocationContext<'_>,
        asset_id: &str,
    ) -> Result<TransferRequest, ContractError> {
        let request = self.read_transfer(ctx, asset_id)?;
        self.ensure_pending(&request)?;
        let caller = ctx.caller()?;

        let request = self.release(ctx, request, &caller, TransferStatus::Rejected)?;
        info!(asset = %asset_id, caller = %caller, "Transfer rejected");
        Ok(request)
    }

    /// Seller withdraws a pending transfer.
    pub fn cancel_transfer(
        &self,
        ctx: &mut InvocationContext<'_>,
        asset_id: &str,
    ) -> Result<TransferRequest, ContractError> {
        let request = self.read_transfer(ctx, asset_id)?;
        let caller = ctx.caller()?;

        if let Err(e) = check_seller(&request, &caller) {
            warn!(asset = %asset_id, caller = %caller, "Transfer cancel refused");
            return Err(e);
        }
        self.ensure_pending(&request)?;

        let request = self.release(ctx, request, &caller, TransferStatus::Cancelled)?;
        info!(asset = %asset_id, seller = %caller, "Transfer cancelled");
        Ok(request)
    }

    /// Current transfer record for `asset_id`.
    pub fn read_transfer(
        &self,
        ctx: &mut InvocationContext<'_>,
        asset_id: &str,
    ) -> Result<TransferRequest, ContractError> {
        let request: TransferRequest = ctx.read(&transfer_key(asset_id), asset_id)?;
        debug!(asset = %asset_id, status = %request.status, "Transfer read");
        Ok(request)
    }

    fn ensure_pending(&self, request: &TransferRequest) -> Result<(), ContractError> {
        check_pending(request).inspect_err(|e| {
            warn!(asset = %request.asset_id, error = %e, "Transfer already resolved");
        })
    }

    /// Unlock the asset (owner unchanged) and close the request as `outcome`.
    fn release(
        &self,
        ctx: &mut InvocationContext<'_>,
        mut request: TransferRequest,
        caller: &str,
        outcome: TransferStatus,
    ) -> Result<TransferRequest, ContractError> {
        let mut asset = self.read_asset(ctx, &request.asset_id)?;
        let tx_id = ctx.tx_id();
        asset.unlock(WriteStamp {
            caller,
            tx_id: &tx_id,
            timestamp: ctx.timestamp(),
        });
        ctx.write(&asset)?;

        request.transition_to(outcome)?;
        ctx.write(&request)?;

        let name = if outcome == TransferStatus::Rejected {
            EventName::TransferRejected
        } else {
            EventName::TransferCancelled
        };
        ctx.emit(
            name,
            record_payload(&request.key(), RecordKind::Transfer, &request)?,
        )?;
        Ok(request)
    }
}
