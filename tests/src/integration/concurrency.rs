//! # Concurrency and Atomicity
//!
//! Racing transactions over one world state. A commit whose read set went
//! stale is refused with `Conflict` and applies nothing.

#[cfg(test)]
mod tests {
    use super::super::{new_service, who};
    use ams_contract::prelude::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    fn open<'s>(
        state: &'s InMemoryWorldState,
        tx_id: &str,
    ) -> TransactionContext<'s, InMemoryWorldState> {
        TransactionContext::new(state, tx_id, 1_700_000_000)
    }

    fn seed(state: &InMemoryWorldState) {
        let contract = AssetContract::new();
        let alice = who("alice");
        let mut tx = open(state, "seed");
        {
            let mut ctx = InvocationContext::new(&mut tx, &alice);
            contract.create_asset(&mut ctx, "a1", "P", "", vec![]).unwrap();
        }
        tx.commit().unwrap();
    }

    // =============================================================================
    // CONFLICTS
    // =============================================================================

    #[test]
    fn test_racing_initiations_one_wins() {
        let state = InMemoryWorldState::new();
        seed(&state);
        let contract = AssetContract::new();
        let alice = who("alice");

        let mut first = open(&state, "tx-b");
        let mut second = open(&state, "tx-c");
        {
            let mut ctx = InvocationContext::new(&mut first, &alice);
            contract.initiate_transfer(&mut ctx, "a1", "bob").unwrap();
        }
        {
            // Both saw the asset Active, so both pass the lock check.
            let mut ctx = InvocationContext::new(&mut second, &alice);
            contract.initiate_transfer(&mut ctx, "a1", "carol").unwrap();
        }

        first.commit().unwrap();
        let err = second.commit().unwrap_err();
        assert!(matches!(err, LedgerError::Conflict { .. }));

        let mut check = open(&state, "read");
        let mut ctx = InvocationContext::new(&mut check, &alice);
        let request = contract.read_transfer(&mut ctx, "a1").unwrap();
        assert_eq!(request.buyer_id, "bob");
    }

    #[test]
    fn test_conflict_on_absent_key() {
        let state = InMemoryWorldState::new();
        let contract = AssetContract::new();
        let (alice, bob) = (who("alice"), who("bob"));

        let mut first = open(&state, "tx-1");
        let mut second = open(&state, "tx-2");
        {
            let mut ctx = InvocationContext::new(&mut first, &alice);
            contract.create_user(&mut ctx, "u1", "A", "r").unwrap();
        }
        {
            let mut ctx = InvocationContext::new(&mut second, &bob);
            contract.create_user(&mut ctx, "u1", "B", "r").unwrap();
        }

        first.commit().unwrap();
        assert!(matches!(second.commit(), Err(LedgerError::Conflict { .. })));

        let mut check = open(&state, "read");
        let mut ctx = InvocationContext::new(&mut check, &bob);
        assert_eq!(contract.read_user(&mut ctx, "u1").unwrap().wallet_id, "alice");
    }

    #[test]
    fn test_parallel_updates_serialize() {
        let service = Arc::new(new_service());
        service
            .create_asset(&who("alice"), "a1", "v0", "", vec![])
            .unwrap();

        let threads = 8;
        let per_thread = 25;
        let barrier = Arc::new(Barrier::new(threads));
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let service = Arc::clone(&service);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let alice = who("alice");
                    let mut committed = 0u64;
                    for i in 0..per_thread {
                        let name = format!("t{t}-{i}");
                        let result = service.update_asset(
                            &alice,
                            "a1",
                            &name,
                            "",
                            AssetStatus::Active,
                            vec![],
                        );
                        match result {
                            Ok(_) => committed += 1,
                            Err(e) => assert!(e.is_conflict(), "unexpected error: {e}"),
                        }
                    }
                    committed
                })
            })
            .collect();

        let committed: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        let asset = service.read_asset("a1").unwrap();
        let stats = service.stats();

        // No lost updates: every committed update advanced the sequence once.
        assert_eq!(asset.sequence, 1 + committed);
        assert_eq!(stats.committed, 2 + committed);
        assert_eq!(stats.conflicts, (threads * per_thread) as u64 - committed);
        assert_eq!(stats.rejected, stats.conflicts);
    }

    // =============================================================================
    // ATOMICITY
    // =============================================================================

    #[test]
    fn test_failed_commit_applies_no_write() {
        let state = InMemoryWorldState::new();
        seed(&state);
        let contract = AssetContract::new();
        let alice = who("alice");
        let height = state.height();

        let mut tx = open(&state, "tx-down");
        {
            let mut ctx = InvocationContext::new(&mut tx, &alice);
            contract.initiate_transfer(&mut ctx, "a1", "bob").unwrap();
        }
        assert_eq!(tx.staged_writes(), 2);

        state.set_offline(true);
        assert!(matches!(tx.commit(), Err(LedgerError::Unavailable(_))));
        state.set_offline(false);

        assert_eq!(state.height(), height);
        assert_eq!(state.keys(), vec!["a1".to_string()]);
        let mut check = open(&state, "read");
        let mut ctx = InvocationContext::new(&mut check, &alice);
        assert_eq!(contract.read_asset(&mut ctx, "a1").unwrap().status, AssetStatus::Active);
    }

    #[test]
    fn test_rejected_operation_leaves_state_untouched() {
        let service = new_service();
        service.create_asset(&who("alice"), "a1", "P", "", vec![]).unwrap();
        service.initiate_transfer(&who("alice"), "a1", "bob").unwrap();
        let height = service.state().height();
        let mut events = service.events().subscribe();

        assert!(service.cancel_transfer(&who("bob"), "a1").is_err());
        assert!(service.initiate_transfer(&who("alice"), "a1", "carol").is_err());
        assert!(service
            .update_asset(&who("alice"), "a1", "X", "", AssetStatus::Active, vec![])
            .is_err());

        assert_eq!(service.state().height(), height);
        assert!(events.try_recv().is_err());
        assert_eq!(service.read_transfer("a1").unwrap().buyer_id, "bob");
    }
}
