//! Asset Registry operations.

use super::contract::{AssetContract, InvocationContext};
use crate::domain::{
    check_owner, check_settable_status, check_unlocked, Asset, AssetStatus, ContractError,
    LedgerRecord, RecordKind, WriteStamp,
};
use crate::events::{record_payload, EventName};
use tracing::{debug, info, warn};

impl AssetContract {
    /// Whether any record occupies `id`.
    pub fn asset_exists(
        &self,
        ctx: &mut InvocationContext<'_>,
        id: &str,
    ) -> Result<bool, ContractError> {
        ctx.exists(id)
    }

    /// Issue a new asset owned by the caller. Emits `AssetCreated`.
    pub fn create_asset(
        &self,
        ctx: &mut InvocationContext<'_>,
        id: &str,
        name: &str,
        meta_url: &str,
        views: Vec<String>,
    ) -> Result<Asset, ContractError> {
        ctx.ensure_vacant(id, RecordKind::Asset)?;
        let caller = ctx.caller()?;
        let tx_id = ctx.tx_id();

        let asset = Asset::issue(
            id,
            name,
            meta_url,
            views,
            WriteStamp {
                caller: &caller,
                tx_id: &tx_id,
                timestamp: ctx.timestamp(),
            },
        );
        ctx.write(&asset)?;
        ctx.emit(
            EventName::AssetCreated,
            record_payload(id, RecordKind::Asset, &asset)?,
        )?;

        info!(asset = %id, owner = %asset.owner, "Asset created");
        Ok(asset)
    }

    /// The only path by which asset records are read.
    pub fn read_asset(
        &self,
        ctx: &mut InvocationContext<'_>,
        id: &str,
    ) -> Result<Asset, ContractError> {
        ctx.read(id, id)
    }

    /// Replace name, metadata pointer, status and views. Owner only, and only
    /// while the asset is not locked. Emits `AssetUpdated`.
    #[allow(clippy::too_many_arguments)]
    pub fn update_asset(
        &self,
        ctx: &mut InvocationContext<'_>,
        id: &str,
        name: &str,
        meta_url: &str,
        status: AssetStatus,
        views: Vec<String>,
    ) -> Result<Asset, ContractError> {
        let mut asset = self.read_asset(ctx, id)?;
        let caller = ctx.caller()?;

        // The lock wins over ownership so every caller sees the same refusal.
        if let Err(e) = check_unlocked(&asset)
            .and_then(|()| check_owner(&asset, &caller, "update"))
            .and_then(|()| check_settable_status(status))
        {
            warn!(asset = %id, caller = %caller, error = %e, "Asset update refused");
            return Err(e);
        }

        let tx_id = ctx.tx_id();
        asset.apply_update(
            name.to_string(),
            meta_url.to_string(),
            status,
            views,
            WriteStamp {
                caller: &caller,
                tx_id: &tx_id,
                timestamp: ctx.timestamp(),
            },
        )?;
        ctx.write(&asset)?;
        ctx.emit(
            EventName::AssetUpdated,
            record_payload(id, RecordKind::Asset, &asset)?,
        )?;

        info!(asset = %id, sequence = asset.sequence, "Asset updated");
        Ok(asset)
    }

    /// Remove the asset key. Emits `AssetDeleted` carrying the raw id.
    ///
    /// Neither ownership nor the transfer lock is checked here. A key holding a
    /// user or transfer record is refused with a decode error and left intact.
    pub fn delete_asset(
        &self,
        ctx: &mut InvocationContext<'_>,
        id: &str,
    ) -> Result<(), ContractError> {
        let asset = self.read_asset(ctx, id)?;
        ctx.stub.del_state(id)?;
        ctx.emit(EventName::AssetDeleted, id.as_bytes().to_vec())?;

        info!(asset = %id, owner = %asset.owner, "Asset deleted");
        Ok(())
    }

    /// Every asset in the world state, in key order.
    ///
    /// Users, transfer requests and anything else without an asset `docType`
    /// are skipped, as are asset records with an empty id.
    pub fn get_all_assets(
        &self,
        ctx: &mut InvocationContext<'_>,
    ) -> Result<Vec<Asset>, ContractError> {
        let entries = ctx.stub.get_state_by_range("", "")?;
        let scanned = entries.len();

        let mut assets = Vec::new();
        for entry in entries {
            if LedgerRecord::peek_kind(&entry.value) != Some(RecordKind::Asset) {
                continue;
            }
            match serde_json::from_slice::<LedgerRecord>(&entry.value) {
                Ok(LedgerRecord::Asset(asset)) if !asset.id.is_empty() => assets.push(asset),
                Ok(_) => {}
                Err(e) => debug!(key = %entry.key, error = %e, "Skipping malformed asset"),
            }
        }

        debug!(scanned, assets = assets.len(), "Assets listed");
        Ok(assets)
    }
}
