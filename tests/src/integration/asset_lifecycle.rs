//! # Asset Lifecycle Flows
//!
//! Users and assets driven through `AssetLedgerApi`, one transaction per call.

#[cfg(test)]
mod tests {
    use super::super::{new_service, who};
    use ams_contract::prelude::*;

    // =============================================================================
    // CREATE / READ
    // =============================================================================

    #[test]
    fn test_create_then_read_records_creator() {
        let service = new_service();
        let alice = who("alice");

        service
            .create_asset(&alice, "a1", "Painting", "ipfs://a1", vec!["public".into()])
            .unwrap();
        let asset = service.read_asset("a1").unwrap();

        assert_eq!(asset.owner, "alice");
        assert_eq!(asset.updated_by, "alice");
        assert_eq!(asset.status, AssetStatus::Active);
        assert_eq!(asset.sequence, 1);
        assert_eq!(asset.views, vec!["public".to_string()]);
        assert!(!asset.last_txid.is_empty());
    }

    #[test]
    fn test_user_registration() {
        let service = new_service();

        let user = service
            .create_user(&who("wallet-7"), "u7", "Seven", "collector")
            .unwrap();
        assert_eq!(user.wallet_id, "wallet-7");
        assert_eq!(user.status, UserStatus::Active);

        assert!(service.user_exists("u7").unwrap());
        assert_eq!(service.read_user("u7").unwrap(), user);
        assert!(matches!(
            service.create_user(&who("other"), "u7", "Again", "collector"),
            Err(ContractError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_user_and_asset_share_keyspace() {
        let service = new_service();
        service.create_user(&who("w"), "x1", "X", "r").unwrap();

        // The key is taken by a user record, so it cannot become an asset.
        let err = service
            .create_asset(&who("w"), "x1", "Thing", "", vec![])
            .unwrap_err();
        assert_eq!(err.kind(), "ALREADY_EXISTS");

        let err = service.read_asset("x1").unwrap_err();
        assert!(matches!(err, ContractError::Decode { expected: RecordKind::Asset, .. }));
    }

    // =============================================================================
    // UPDATE
    // =============================================================================

    #[test]
    fn test_sequence_after_n_updates() {
        let service = new_service();
        let alice = who("alice");
        service.create_asset(&alice, "a1", "v0", "", vec![]).unwrap();

        let n = 7;
        for i in 1..=n {
            service
                .update_asset(&alice, "a1", &format!("v{i}"), "", AssetStatus::Active, vec![])
                .unwrap();
        }

        let asset = service.read_asset("a1").unwrap();
        assert_eq!(asset.sequence, 1 + n);
        assert_eq!(asset.name, format!("v{n}"));
    }

    #[test]
    fn test_update_by_non_owner_forbidden() {
        let service = new_service();
        service.create_asset(&who("alice"), "a1", "P", "", vec![]).unwrap();

        let err = service
            .update_asset(&who("bob"), "a1", "Mine", "", AssetStatus::Active, vec![])
            .unwrap_err();
        assert!(matches!(err, ContractError::Forbidden(_)));
        assert_eq!(service.read_asset("a1").unwrap().name, "P");
    }

    #[test]
    fn test_update_locked_asset_fails_for_any_caller() {
        let service = new_service();
        service.create_asset(&who("alice"), "a1", "P", "", vec![]).unwrap();
        service.initiate_transfer(&who("alice"), "a1", "bob").unwrap();

        for caller in ["alice", "bob", "carol"] {
            let err = service
                .update_asset(&who(caller), "a1", "New", "", AssetStatus::Active, vec![])
                .unwrap_err();
            assert!(matches!(err, ContractError::InvalidState(_)), "caller {caller}");
        }
        assert_eq!(service.read_asset("a1").unwrap().sequence, 1);
    }

    #[test]
    fn test_update_can_mark_deleted_status() {
        let service = new_service();
        let alice = who("alice");
        service.create_asset(&alice, "a1", "P", "", vec![]).unwrap();

        let asset = service
            .update_asset(&alice, "a1", "P", "", AssetStatus::Deleted, vec![])
            .unwrap();
        assert_eq!(asset.status, AssetStatus::Deleted);
        assert!(service.asset_exists("a1").unwrap());
    }

    // =============================================================================
    // DELETE / LIST
    // =============================================================================

    #[test]
    fn test_delete_then_read_not_found() {
        let service = new_service();
        service.create_asset(&who("alice"), "a1", "P", "", vec![]).unwrap();

        service.delete_asset(&who("alice"), "a1").unwrap();

        let err = service.read_asset("a1").unwrap_err();
        assert_eq!(err.to_string(), "the asset a1 does not exist");
        assert!(!service.asset_exists("a1").unwrap());
        assert!(matches!(
            service.delete_asset(&who("alice"), "a1"),
            Err(ContractError::NotFound { .. })
        ));
    }

    #[test]
    fn test_get_all_assets_filters_other_records() {
        let service = new_service();
        service.create_user(&who("wa"), "ua", "A", "r").unwrap();
        service.create_user(&who("wb"), "ub", "B", "r").unwrap();
        service.create_asset(&who("wa"), "asset-1", "One", "", vec![]).unwrap();
        service.create_asset(&who("wa"), "asset-2", "Two", "", vec![]).unwrap();
        service.create_asset(&who("wb"), "asset-3", "Three", "", vec![]).unwrap();
        service.initiate_transfer(&who("wa"), "asset-1", "wb").unwrap();

        let assets = service.get_all_assets().unwrap();
        assert_eq!(assets.len(), 3);
        let ids: Vec<&str> = assets.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["asset-1", "asset-2", "asset-3"]);
        assert_eq!(service.state().len(), 6);
    }

    #[test]
    fn test_get_all_assets_empty_ledger() {
        let service = new_service();
        assert!(service.get_all_assets().unwrap().is_empty());
    }
}
