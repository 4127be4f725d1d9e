//! # Transfer Flows
//!
//! Two-phase transfer end to end, including event delivery and the JSON
//! invocation envelope served by the node.

#[cfg(test)]
mod tests {
    use super::super::{new_service, who};
    use ams_contract::prelude::*;
    use ams_node::{NodeConfig, NodeRuntime};
    use serde_json::json;
    use std::time::Duration;
    use tokio::io::BufReader;
    use tokio::time::timeout;

    // =============================================================================
    // STATE MACHINE
    // =============================================================================

    #[test]
    fn test_transfer_happy_path() {
        let service = new_service();
        service.create_asset(&who("A"), "a1", "Painting", "", vec![]).unwrap();

        let request = service.initiate_transfer(&who("A"), "a1", "B").unwrap();
        assert_eq!(request.status, TransferStatus::Pending);
        assert_eq!(service.read_asset("a1").unwrap().status, AssetStatus::Locked);

        let asset = service.complete_transfer(&who("B"), "a1").unwrap();
        assert_eq!(asset.owner, "B");
        assert_eq!(asset.status, AssetStatus::Active);
        assert_eq!(asset.sequence, 2);
        assert_eq!(
            service.read_transfer("a1").unwrap().status,
            TransferStatus::Completed
        );

        // The new owner can now edit; the old one cannot.
        service
            .update_asset(&who("B"), "a1", "Mine now", "", AssetStatus::Active, vec![])
            .unwrap();
        assert!(matches!(
            service.update_asset(&who("A"), "a1", "Back", "", AssetStatus::Active, vec![]),
            Err(ContractError::Forbidden(_))
        ));
    }

    #[test]
    fn test_complete_on_non_pending_fails() {
        let service = new_service();
        service.create_asset(&who("A"), "a1", "P", "", vec![]).unwrap();
        service.initiate_transfer(&who("A"), "a1", "B").unwrap();
        service.reject_transfer(&who("B"), "a1").unwrap();

        let err = service.complete_transfer(&who("B"), "a1").unwrap_err();
        assert!(matches!(err, ContractError::InvalidState(_)));
        assert_eq!(service.read_asset("a1").unwrap().owner, "A");
    }

    #[test]
    fn test_cancel_by_non_seller_forbidden() {
        let service = new_service();
        service.create_asset(&who("A"), "a1", "P", "", vec![]).unwrap();
        service.initiate_transfer(&who("A"), "a1", "B").unwrap();

        let err = service.cancel_transfer(&who("B"), "a1").unwrap_err();
        assert!(matches!(err, ContractError::Forbidden(_)));
        assert_eq!(service.read_transfer("a1").unwrap().status, TransferStatus::Pending);
    }

    #[test]
    fn test_cancel_by_seller_restores_active() {
        let service = new_service();
        service.create_asset(&who("A"), "a1", "P", "", vec![]).unwrap();
        service.initiate_transfer(&who("A"), "a1", "B").unwrap();

        let request = service.cancel_transfer(&who("A"), "a1").unwrap();
        assert_eq!(request.status, TransferStatus::Cancelled);

        let asset = service.read_asset("a1").unwrap();
        assert_eq!(asset.status, AssetStatus::Active);
        assert_eq!(asset.owner, "A");
        assert_eq!(asset.sequence, 1);
    }

    #[test]
    fn test_resolved_transfer_blocks_nothing() {
        let service = new_service();
        service.create_asset(&who("A"), "a1", "P", "", vec![]).unwrap();
        service.initiate_transfer(&who("A"), "a1", "B").unwrap();
        service.complete_transfer(&who("B"), "a1").unwrap();

        // B resells to C over the completed record.
        service.initiate_transfer(&who("B"), "a1", "C").unwrap();
        let asset = service.complete_transfer(&who("C"), "a1").unwrap();
        assert_eq!(asset.owner, "C");
        assert_eq!(asset.sequence, 3);
    }

    // =============================================================================
    // EVENTS
    // =============================================================================

    #[tokio::test]
    async fn test_event_sequence_for_transfer() {
        let service = new_service();
        let mut events = service.events().subscribe_to(&EventName::ALL);

        service.create_asset(&who("A"), "a1", "P", "", vec![]).unwrap();
        service.initiate_transfer(&who("A"), "a1", "B").unwrap();
        // Refused: no event.
        let _ = service.cancel_transfer(&who("B"), "a1");
        service.complete_transfer(&who("B"), "a1").unwrap();

        let mut names = Vec::new();
        for _ in 0..3 {
            let event = timeout(Duration::from_secs(1), events.recv())
                .await
                .unwrap()
                .unwrap();
            names.push(event.name);
        }
        assert_eq!(
            names,
            [
                EventName::AssetCreated,
                EventName::TransferInitiated,
                EventName::AssetTransferred
            ]
        );
        assert!(events.try_recv().is_none());
        assert_eq!(service.stats().events_emitted, 3);
    }

    #[tokio::test]
    async fn test_filtered_subscription_sees_only_transfers() {
        let service = new_service();
        let mut transfers = service
            .events()
            .subscribe_to(&[EventName::AssetTransferred]);

        service.create_asset(&who("A"), "a1", "P", "", vec![]).unwrap();
        service.initiate_transfer(&who("A"), "a1", "B").unwrap();
        let asset = service.complete_transfer(&who("B"), "a1").unwrap();

        let event = timeout(Duration::from_secs(1), transfers.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.tx_id, asset.last_txid);
        assert_eq!(event.payload_json().unwrap()["owner"], "B");
    }

    // =============================================================================
    // INVOCATION ENVELOPE
    // =============================================================================

    #[test]
    fn test_dispatch_json_calls() {
        let service = new_service();
        let call = |caller: &str, value: serde_json::Value| {
            let call: ContractCall = serde_json::from_value(value).unwrap();
            service.dispatch(&who(caller), call)
        };

        call("A", json!({"function": "CreateAsset", "args": {"id": "a1", "name": "P"}})).unwrap();
        let request = call(
            "A",
            json!({"function": "InitiateTransfer", "args": {"assetId": "a1", "buyerWalletId": "B"}}),
        )
        .unwrap();
        assert_eq!(request["status"], "Pending");
        assert_eq!(request["sellerId"], "A");

        let err = call("B", json!({"function": "CancelTransfer", "args": {"assetId": "a1"}}))
            .unwrap_err();
        assert_eq!(err.kind(), "FORBIDDEN");

        let transfer = call("X", json!({"function": "ReadTransfer", "args": {"assetId": "a1"}}))
            .unwrap();
        assert_eq!(transfer["buyerId"], "B");
    }

    #[tokio::test]
    async fn test_node_serves_full_transfer() {
        let runtime = NodeRuntime::new(NodeConfig::default());
        let input = [
            json!({"caller": "A", "function": "CreateUser", "args": {"id": "ua", "name": "A", "role": "seller"}}),
            json!({"caller": "A", "function": "CreateAsset", "args": {"id": "a1", "name": "P", "views": ["public"]}}),
            json!({"caller": "A", "function": "InitiateTransfer", "args": {"assetId": "a1", "buyerWalletId": "B"}}),
            json!({"caller": "B", "function": "UpdateAsset", "args": {"id": "a1", "name": "X"}}),
            json!({"caller": "B", "function": "CompleteTransfer", "args": {"assetId": "a1"}}),
            json!({"function": "GetAllAssets"}),
        ]
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\n");
        let mut output = Vec::new();

        let served = runtime
            .serve(BufReader::new(input.as_bytes()), &mut output)
            .await
            .unwrap();
        assert_eq!(served, 6);

        let responses: Vec<InvocationResponse> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        let oks: Vec<bool> = responses.iter().map(|r| r.ok).collect();
        assert_eq!(oks, [true, true, true, false, true, true]);
        assert_eq!(responses[3].error.as_ref().unwrap().code, "INVALID_STATE");

        let all = responses[5].result.as_ref().unwrap().as_array().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0]["owner"], "B");
    }
}
