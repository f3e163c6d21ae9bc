//! # Integration Test Flows
//!
//! Tests that fc-mempool, fc-ordering, and fc-packaging work together
//! correctly across full packaging rounds.
//!
//! ## Flows Tested:
//!
//! 1. **Admission → Packaging**: submitted transactions come out of a round
//!    in dependency order, within budget.
//! 2. **Orphan retry cycle**: an orphaned transaction cycles between the
//!    tracker and the pool until its attempt ceiling drops it.
//! 3. **Transient failure isolation**: validator timeouts and errors defer
//!    transactions without losing or misclassifying them.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    // Shared infrastructure
    use shared_types::{TransactionRecord, TxHash};

    // Mempool subsystem
    use fc_mempool::adapters::broadcast::NoopBroadcaster;
    use fc_mempool::adapters::clock::ManualTimeSource;
    use fc_mempool::adapters::memory_store::InMemoryStore;
    use fc_mempool::domain::{OrphanConfig, OrphanTracker, PackablePool, PoolConfig};
    use fc_mempool::ports::inbound::MempoolApi;
    use fc_mempool::ports::outbound::UnconfirmedStore;
    use fc_mempool::service::AdmissionService;

    // Packaging subsystem
    use fc_packaging::adapters::{ScriptedValidator, ValidatorBehavior};
    use fc_packaging::ports::inbound::BlockAssemblyApi;
    use fc_packaging::{LedgerSnapshot, PackagingConfig, PackagingCoordinator, Verdict};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Node {
        pool: Arc<PackablePool>,
        orphans: Arc<Mutex<OrphanTracker>>,
        store: Arc<InMemoryStore>,
        time: Arc<ManualTimeSource>,
        validator: Arc<ScriptedValidator>,
        admission: AdmissionService,
        coordinator: PackagingCoordinator,
    }

    /// Opt-in log output: `RUST_LOG=debug cargo test -p fc-tests`.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn node_with(config: PackagingConfig, validator: ScriptedValidator) -> Node {
        init_tracing();
        let store = Arc::new(InMemoryStore::new());
        let pool = Arc::new(PackablePool::new(PoolConfig::default(), store.clone()));
        let orphans = Arc::new(Mutex::new(OrphanTracker::with_defaults()));
        let time = Arc::new(ManualTimeSource::new(1_000));
        let validator = Arc::new(validator);

        let admission = AdmissionService::new(
            pool.clone(),
            orphans.clone(),
            store.clone(),
            Arc::new(NoopBroadcaster),
        );
        let coordinator = PackagingCoordinator::new(
            pool.clone(),
            orphans.clone(),
            validator.clone(),
            store.clone(),
            time.clone(),
            config,
        )
        .unwrap();

        Node {
            pool,
            orphans,
            store,
            time,
            validator,
            admission,
            coordinator,
        }
    }

    fn node() -> Node {
        node_with(PackagingConfig::default(), ScriptedValidator::accept_all())
    }

    impl Node {
        fn time_now(&self) -> u64 {
            use fc_mempool::ports::outbound::TimeSource;
            self.time.now()
        }
    }

    fn record(tag: u8) -> TransactionRecord {
        TransactionRecord::new(vec![tag; 16], "transfer")
    }

    fn dependent(tag: u8, predecessors: &[TxHash]) -> TransactionRecord {
        TransactionRecord::with_predecessors(vec![tag; 16], "transfer", predecessors.to_vec())
    }

    fn snapshot() -> LedgerSnapshot {
        LedgerSnapshot::new([0u8; 32], 100)
    }

    // =============================================================================
    // INTEGRATION TESTS: ADMISSION → PACKAGING
    // =============================================================================

    /// A full round: submitted transactions are persisted, verified, ordered
    /// by declared dependency, and cleaned up on confirmation.
    #[tokio::test]
    async fn test_admission_to_packaged_block() {
        let n = node();

        let base = record(1);
        let spender = dependent(2, &[base.id]);
        let unrelated = record(3);

        // The dependent transaction arrives first.
        n.admission.submit(spender.clone(), false).await.unwrap();
        n.admission.submit(base.clone(), false).await.unwrap();
        n.admission.submit(unrelated.clone(), false).await.unwrap();

        let outcome = n.coordinator.package_round(&snapshot()).await;

        let ids: Vec<TxHash> = outcome.transactions.iter().map(|r| r.id).collect();
        let base_pos = ids.iter().position(|id| *id == base.id).unwrap();
        let spender_pos = ids.iter().position(|id| *id == spender.id).unwrap();
        assert!(base_pos < spender_pos);
        assert_eq!(ids.len(), 3);
        assert_eq!(outcome.total_bytes, 48);

        // Block confirmed: bulk cleanup leaves only tombstones behind.
        n.admission.remove_confirmed(&ids);
        assert_eq!(n.admission.status().live_records, 0);
    }

    /// Records re-inserted with priority are polled ahead of earlier
    /// arrivals and packaged first.
    #[tokio::test]
    async fn test_priority_reinsertion_packages_first() {
        let n = node();
        let a = record(1);
        let b = record(2);
        let c = record(3);

        n.admission.submit(a.clone(), false).await.unwrap();
        n.admission.submit(b.clone(), false).await.unwrap();
        assert!(n.pool.offer_first(c.clone()));

        let outcome = n.coordinator.package_round(&snapshot()).await;
        let ids: Vec<TxHash> = outcome.transactions.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![c.id, a.id, b.id]);
    }

    /// The byte budget splits a backlog across rounds without losing order.
    #[tokio::test]
    async fn test_budget_splits_backlog_across_rounds() {
        let config = PackagingConfig {
            max_block_bytes: 32, // fits two 16-byte records
            ..Default::default()
        };
        let n = node_with(config, ScriptedValidator::accept_all());

        let records: Vec<TransactionRecord> = (1..=5).map(record).collect();
        for r in &records {
            n.admission.submit(r.clone(), false).await.unwrap();
        }

        let first = n.coordinator.package_round(&snapshot()).await;
        let second = n.coordinator.package_round(&snapshot()).await;
        let third = n.coordinator.package_round(&snapshot()).await;

        assert_eq!(first.transactions.len(), 2);
        assert!(first.total_bytes <= 32);
        assert_eq!(second.transactions.len(), 2);
        assert_eq!(third.transactions.len(), 1);

        let emitted: Vec<TxHash> = first
            .transactions
            .iter()
            .chain(&second.transactions)
            .chain(&third.transactions)
            .map(|r| r.id)
            .collect();
        let expected: Vec<TxHash> = records.iter().map(|r| r.id).collect();
        assert_eq!(emitted, expected);
    }

    // =============================================================================
    // INTEGRATION TESTS: ORPHAN RETRY CYCLE
    // =============================================================================

    /// An orphan cycles pool → tracker → pool for three attempts, then the
    /// attempt ceiling drops it permanently.
    #[tokio::test]
    async fn test_orphan_dropped_after_three_attempts() {
        let n = node();
        let orphan = record(7);
        let mut script = HashMap::new();
        script.insert(orphan.id, Verdict::RejectedOrphan([9u8; 32]));
        n.validator
            .set_module("transfer", ValidatorBehavior::PerRecord(script));

        n.admission.submit(orphan.clone(), false).await.unwrap();

        for round in 1..=2u32 {
            let outcome = n.coordinator.package_round(&snapshot()).await;
            assert_eq!(outcome.orphaned, 1, "round {round}");
            // Loaned back for the next attempt; the tracker keeps the meta.
            assert!(n.pool.exists(&orphan.id));
            assert_eq!(
                n.orphans.lock().unwrap().attempts(&orphan.id),
                Some(round)
            );
        }

        // Third strike: observed at the ceiling, the round-end sweep drops
        // the entry and cleans storage.
        let outcome = n.coordinator.package_round(&snapshot()).await;
        assert_eq!(outcome.orphaned, 1);
        assert!(!n.orphans.lock().unwrap().contains(&orphan.id));
        assert!(!n.store.contains(&orphan.id));

        // Fourth round sees nothing of it.
        let outcome = n.coordinator.package_round(&snapshot()).await;
        assert_eq!(outcome.orphaned, 0);
        assert!(outcome.transactions.is_empty());
    }

    /// A transaction is never live in the pool map and the orphan tracker
    /// at the same time.
    #[tokio::test]
    async fn test_pool_and_tracker_are_exclusive() {
        let n = node();
        let orphan = record(4);
        let mut script = HashMap::new();
        script.insert(orphan.id, Verdict::RejectedOrphan([8u8; 32]));
        n.validator
            .set_module("transfer", ValidatorBehavior::PerRecord(script));

        n.admission.submit(orphan.clone(), false).await.unwrap();
        assert!(n.pool.exists(&orphan.id));
        assert!(!n.orphans.lock().unwrap().contains_live(&orphan.id));

        n.coordinator.package_round(&snapshot()).await;

        // Re-offered to the pool, so the tracker holds only loan metadata.
        assert!(n.pool.exists(&orphan.id));
        assert!(!n.orphans.lock().unwrap().contains_live(&orphan.id));
        assert!(n.orphans.lock().unwrap().contains(&orphan.id));
    }

    /// Age alone expires an orphan even with attempts to spare.
    #[tokio::test]
    async fn test_orphan_expires_by_age() {
        let n = node();
        let orphan = record(5);
        {
            let mut orphans = n.orphans.lock().unwrap();
            assert!(orphans.observe(orphan.clone(), n.time_now()));
        }
        n.store.put(&orphan.id, &orphan.raw).unwrap();

        n.time.advance(OrphanConfig::default().lifetime_ms + 1);
        assert_eq!(n.coordinator.sweep_orphans(), 1);
        assert!(!n.store.contains(&orphan.id));
    }

    /// Promotion pulls an orphan back ahead of fresh arrivals once its
    /// predecessor lands.
    #[tokio::test]
    async fn test_promoted_orphan_packages_ahead() {
        let n = node();
        let orphan = record(6);
        {
            let mut orphans = n.orphans.lock().unwrap();
            assert!(orphans.observe(orphan.clone(), n.time_now()));
        }
        let fresh = record(7);
        n.admission.submit(fresh.clone(), false).await.unwrap();

        assert_eq!(n.coordinator.promote_orphans(&[orphan.id]), 1);
        let outcome = n.coordinator.package_round(&snapshot()).await;

        let ids: Vec<TxHash> = outcome.transactions.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![orphan.id, fresh.id]);
        assert!(!n.orphans.lock().unwrap().contains(&orphan.id));
    }

    // =============================================================================
    // INTEGRATION TESTS: TRANSIENT FAILURE ISOLATION
    // =============================================================================

    /// A validator timeout defers the group; the transactions stay in the
    /// pool, never orphaned, and package once the module recovers.
    #[tokio::test(flavor = "multi_thread")]
    async fn test_timeout_then_recovery() {
        let config = PackagingConfig {
            verify_timeout_ms: 50,
            ..Default::default()
        };
        let n = node_with(config, ScriptedValidator::accept_all());
        n.validator
            .set_module("transfer", ValidatorBehavior::Delay(300));

        let a = record(1);
        n.admission.submit(a.clone(), false).await.unwrap();

        let outcome = n.coordinator.package_round(&snapshot()).await;
        assert!(outcome.transactions.is_empty());
        assert_eq!(outcome.deferred, 1);
        assert!(n.admission.exists(&a.id));
        assert!(n.orphans.lock().unwrap().is_empty());

        // Module recovers; the deferred transaction packages normally.
        n.validator
            .set_module("transfer", ValidatorBehavior::AcceptAll);
        let outcome = n.coordinator.package_round(&snapshot()).await;
        assert_eq!(outcome.transactions.len(), 1);
        assert_eq!(outcome.transactions[0].id, a.id);
    }

    /// A transient error in one module defers only that group; other
    /// modules still package in the same round.
    #[tokio::test]
    async fn test_failing_module_does_not_block_others() {
        let n = node();
        n.validator
            .set_module("staking", ValidatorBehavior::FailTransient);

        let transfer = record(1);
        let stake = TransactionRecord::new(vec![2; 16], "staking");
        n.admission.submit(transfer.clone(), false).await.unwrap();
        n.admission.submit(stake.clone(), false).await.unwrap();

        let outcome = n.coordinator.package_round(&snapshot()).await;

        assert_eq!(outcome.transactions.len(), 1);
        assert_eq!(outcome.transactions[0].id, transfer.id);
        assert_eq!(outcome.deferred, 1);
        assert!(n.pool.exists(&stake.id));
        assert!(n.orphans.lock().unwrap().is_empty());
    }

    /// Invalid and accepted records partition cleanly; the invalid one is
    /// gone from every subsystem after the round.
    #[tokio::test]
    async fn test_invalid_record_fully_purged() {
        let n = node();
        let good = record(1);
        let bad = record(2);
        let mut script = HashMap::new();
        script.insert(bad.id, Verdict::RejectedInvalid("insufficient funds".into()));
        n.validator
            .set_module("transfer", ValidatorBehavior::PerRecord(script));

        n.admission.submit(good.clone(), false).await.unwrap();
        n.admission.submit(bad.clone(), false).await.unwrap();

        let outcome = n.coordinator.package_round(&snapshot()).await;

        assert_eq!(outcome.transactions.len(), 1);
        assert_eq!(
            outcome.discarded,
            vec![(bad.id, "insufficient funds".to_string())]
        );
        assert!(!n.pool.exists(&bad.id));
        assert!(!n.store.contains(&bad.id));
        assert!(!n.orphans.lock().unwrap().contains(&bad.id));
    }
}
