//! Packaging round coordinator.
//!
//! One `package_round` call runs the full state machine: Collecting,
//! Grouping, Verifying, Resolving, Ordering, Done. A round always completes
//! with a partial result; no single transaction or validator module can
//! abort it.

use crate::config::PackagingConfig;
use crate::error::{PackagingError, Result};
use crate::metrics::Metrics;
use crate::ports::inbound::{BlockAssemblyApi, PackagingOutcome};
use crate::ports::outbound::{LedgerSnapshot, ValidationService, Verdict};
use async_trait::async_trait;
use fc_mempool::domain::{OrphanTracker, PackablePool};
use fc_mempool::ports::outbound::{TimeSource, UnconfirmedStore};
use fc_ordering::algorithms::kahns;
use shared_types::{short_id, TransactionRecord, TxHash};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Orchestrates packaging rounds over the pool, the orphan tracker, and the
/// external validator modules.
pub struct PackagingCoordinator {
    pool: Arc<PackablePool>,
    orphans: Arc<Mutex<OrphanTracker>>,
    validator: Arc<dyn ValidationService>,
    store: Arc<dyn UnconfirmedStore>,
    time: Arc<dyn TimeSource>,
    config: PackagingConfig,
    metrics: Metrics,
}

/// A collected record tagged with its poll position, so leftovers can be
/// returned to the pool in reverse poll order.
struct Collected {
    seq: usize,
    record: TransactionRecord,
}

impl PackagingCoordinator {
    pub fn new(
        pool: Arc<PackablePool>,
        orphans: Arc<Mutex<OrphanTracker>>,
        validator: Arc<dyn ValidationService>,
        store: Arc<dyn UnconfirmedStore>,
        time: Arc<dyn TimeSource>,
        config: PackagingConfig,
    ) -> Result<Self> {
        if config.max_block_bytes == 0 {
            return Err(PackagingError::InvalidConfig(
                "max_block_bytes must be positive".into(),
            ));
        }
        if config.round_time_ms == 0 {
            return Err(PackagingError::InvalidConfig(
                "round_time_ms must be positive".into(),
            ));
        }
        Ok(Self {
            pool,
            orphans,
            validator,
            store,
            time,
            config,
            metrics: Metrics::new(),
        })
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Drains the pool until the byte budget or the collection window is
    /// exhausted. A record that does not fit goes straight back to the
    /// front; everything behind it stays in the pool untouched.
    fn collect(&self) -> Vec<Collected> {
        let cutoff = self.time.now() + self.config.collect_window_ms();
        let mut remaining = self.config.max_block_bytes;
        let mut collected = Vec::new();

        loop {
            if self.time.now() >= cutoff {
                debug!(
                    collected = collected.len(),
                    "collection window closed before pool drained"
                );
                break;
            }
            let Some(record) = self.pool.poll() else {
                break;
            };
            if record.byte_size() > remaining {
                self.pool.offer_first(record);
                debug!(collected = collected.len(), "byte budget exhausted");
                break;
            }
            remaining -= record.byte_size();
            collected.push(Collected {
                seq: collected.len(),
                record,
            });
        }
        collected
    }

    /// Partitions by `module_key`, first-appearance order, arrival order
    /// preserved within each group.
    fn group(collected: Vec<Collected>) -> Vec<(String, Vec<Collected>)> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<(String, Vec<Collected>)> = Vec::new();
        for item in collected {
            let key = item.record.module_key.clone();
            match index.get(&key) {
                Some(&i) => groups[i].1.push(item),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push((key, vec![item]));
                }
            }
        }
        groups
    }

    fn remove_from_store(&self, id: &TxHash) {
        if let Err(e) = self.store.remove(id) {
            warn!(id = %short_id(id), error = %e, "store cleanup failed");
        }
    }

    /// Routes a whole group to the orphan tracker. Records the tracker's
    /// byte ceiling rejects are dropped outright, with storage cleanup.
    fn orphan_group(&self, group: Vec<Collected>, now: u64) -> usize {
        let count = group.len();
        let mut orphans = self.orphans.lock().unwrap();
        for item in group {
            let id = item.record.id;
            if !orphans.observe(item.record, now) {
                self.remove_from_store(&id);
            }
        }
        count
    }

    /// Drops expired orphan entries and loans the surviving records back to
    /// the pool at the front, oldest first.
    fn end_of_round_orphan_maintenance(&self, now: u64) -> usize {
        let (expired, reoffered) = {
            let mut orphans = self.orphans.lock().unwrap();
            let expired = orphans.sweep(now);
            let reoffered = orphans.reoffer(now);
            (expired, reoffered)
        };

        for id in &expired {
            self.remove_from_store(id);
        }
        self.metrics.record_orphans_expired(expired.len() as u64);

        for record in reoffered.into_iter().rev() {
            let id = record.id;
            if !self.pool.offer_first(record) {
                warn!(id = %short_id(&id), "pool rejected re-offered orphan");
            }
        }
        expired.len()
    }
}

#[async_trait]
impl BlockAssemblyApi for PackagingCoordinator {
    async fn package_round(&self, snapshot: &LedgerSnapshot) -> PackagingOutcome {
        let round = self.orphans.lock().unwrap().begin_round();
        debug!(round, height = snapshot.height, "packaging round started");

        let collected = self.collect();
        let groups = Self::group(collected);

        let mut accepted: Vec<TransactionRecord> = Vec::new();
        let mut accepted_bytes = 0usize;
        let mut discarded: Vec<(TxHash, String)> = Vec::new();
        let mut orphaned = 0usize;
        let mut deferred: Vec<Collected> = Vec::new();
        let now = self.time.now();
        let verify_timeout = Duration::from_millis(self.config.verify_timeout_ms);

        for (module_key, group) in groups {
            let records: Vec<TransactionRecord> =
                group.iter().map(|item| item.record.clone()).collect();

            let outcome = tokio::time::timeout(
                verify_timeout,
                self.validator.verify_batch(&module_key, &records, snapshot),
            )
            .await;

            let verdicts = match outcome {
                Err(_) => {
                    warn!(module = %module_key, "verification timed out, deferring group");
                    self.metrics.record_deferred_group();
                    deferred.extend(group);
                    continue;
                }
                Ok(Err(e)) => {
                    warn!(module = %module_key, error = %e, "verification failed, deferring group");
                    self.metrics.record_deferred_group();
                    deferred.extend(group);
                    continue;
                }
                Ok(Ok(v)) if v.len() != group.len() => {
                    warn!(
                        module = %module_key,
                        expected = group.len(),
                        got = v.len(),
                        "verdict count mismatch, deferring group"
                    );
                    self.metrics.record_deferred_group();
                    deferred.extend(group);
                    continue;
                }
                Ok(Ok(v)) => v,
            };

            if verdicts.contains(&Verdict::Unavailable) {
                debug!(module = %module_key, count = group.len(), "module unavailable, orphaning group");
                let count = self.orphan_group(group, now);
                orphaned += count;
                self.metrics.record_orphaned(count as u64);
                continue;
            }

            for (item, verdict) in group.into_iter().zip(verdicts) {
                match verdict {
                    Verdict::Accepted => {
                        accepted_bytes += item.record.byte_size();
                        accepted.push(item.record);
                    }
                    Verdict::RejectedInvalid(reason) => {
                        info!(
                            id = %short_id(&item.record.id),
                            module = %module_key,
                            reason = %reason,
                            "transaction discarded as invalid"
                        );
                        self.remove_from_store(&item.record.id);
                        self.metrics.record_discarded(1);
                        discarded.push((item.record.id, reason));
                    }
                    Verdict::RejectedOrphan(missing) => {
                        debug!(
                            id = %short_id(&item.record.id),
                            missing = %short_id(&missing),
                            "transaction orphaned, predecessor unseen"
                        );
                        let id = item.record.id;
                        let tracked = self.orphans.lock().unwrap().observe(item.record, now);
                        if !tracked {
                            self.remove_from_store(&id);
                        }
                        orphaned += 1;
                        self.metrics.record_orphaned(1);
                    }
                    // Handled by the whole-group check above.
                    Verdict::Unavailable => {}
                }
            }
        }

        // The sort never fails and its cost is bounded by what collection
        // already admitted, so a ceiling breach is logged but never allowed
        // to emit a dependency-violating order.
        if let Err(e) = kahns::validate(&accepted, &self.config.ordering) {
            warn!(error = %e, "accepted batch exceeds ordering ceilings");
        }
        let transactions = kahns::sort_by_dependency(accepted);

        // Done: earlier-polled deferrals end up frontmost for the next round.
        deferred.sort_by_key(|item| item.seq);
        let deferred_count = deferred.len();
        for item in deferred.into_iter().rev() {
            let id = item.record.id;
            if !self.pool.offer_first(item.record) {
                warn!(id = %short_id(&id), "pool rejected deferred record");
            }
        }

        self.end_of_round_orphan_maintenance(now);
        self.metrics
            .record_round(transactions.len() as u64, accepted_bytes as u64);
        info!(
            round,
            packaged = transactions.len(),
            bytes = accepted_bytes,
            discarded = discarded.len(),
            orphaned,
            deferred = deferred_count,
            "packaging round complete"
        );

        PackagingOutcome {
            round,
            transactions,
            total_bytes: accepted_bytes,
            discarded,
            orphaned,
            deferred: deferred_count,
        }
    }

    fn promote_orphans(&self, ids: &[TxHash]) -> usize {
        let promoted = self.orphans.lock().unwrap().promote(ids);
        let count = promoted.len();
        for record in promoted.into_iter().rev() {
            let id = record.id;
            if !self.pool.offer_first(record) {
                warn!(id = %short_id(&id), "pool rejected promoted orphan");
            }
        }
        count
    }

    fn sweep_orphans(&self) -> usize {
        let now = self.time.now();
        let expired = self.orphans.lock().unwrap().sweep(now);
        for id in &expired {
            self.remove_from_store(id);
        }
        self.metrics.record_orphans_expired(expired.len() as u64);
        expired.len()
    }
}
