//! Admission service: the inbound face of the pool.
//!
//! Glues the packable pool to the unconfirmed store and the network
//! broadcaster. Validation (signatures, structure) happened upstream;
//! admission only decides pool membership and persistence.

use crate::domain::errors::MempoolError;
use crate::domain::orphans::OrphanTracker;
use crate::domain::pool::PackablePool;
use crate::domain::value_objects::PoolStatus;
use crate::ports::inbound::MempoolApi;
use crate::ports::outbound::{Broadcaster, UnconfirmedStore};
use async_trait::async_trait;
use shared_types::{short_id, TransactionRecord, TxHash};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Concrete implementation of [`MempoolApi`].
pub struct AdmissionService {
    pool: Arc<PackablePool>,
    orphans: Arc<Mutex<OrphanTracker>>,
    store: Arc<dyn UnconfirmedStore>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl AdmissionService {
    pub fn new(
        pool: Arc<PackablePool>,
        orphans: Arc<Mutex<OrphanTracker>>,
        store: Arc<dyn UnconfirmedStore>,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Self {
        Self {
            pool,
            orphans,
            store,
            broadcaster,
        }
    }

    pub fn pool(&self) -> Arc<PackablePool> {
        Arc::clone(&self.pool)
    }
}

#[async_trait]
impl MempoolApi for AdmissionService {
    async fn submit(&self, record: TransactionRecord, local: bool) -> Result<(), MempoolError> {
        let id = record.id;

        // Persist first so a crash between steps leaves at worst a stale
        // storage row, swept later by the tombstone path.
        if let Err(e) = self.store.put(&id, &record.raw) {
            warn!(id = %short_id(&id), error = %e, "unconfirmed store put failed");
        }

        let raw_broadcast = if local { Some(record.clone()) } else { None };

        if let Err(e) = self.pool.try_add(record) {
            // Roll back only for capacity rejects. A duplicate's put landed
            // on the live record's own row (the id is the content hash), so
            // removing it would strip persistence from an admitted record.
            if matches!(e, MempoolError::CapacityExhausted { .. }) {
                if let Err(remove_err) = self.store.remove(&id) {
                    warn!(id = %short_id(&id), error = %remove_err, "store rollback failed");
                }
            }
            return Err(e);
        }

        debug!(id = %short_id(&id), local, "transaction admitted");
        if let Some(record) = raw_broadcast {
            self.broadcaster.broadcast(&record);
        }
        Ok(())
    }

    fn exists(&self, id: &TxHash) -> bool {
        self.pool.exists(id)
    }

    fn remove_confirmed(&self, ids: &[TxHash]) {
        self.pool.remove_ids(ids);
    }

    fn status(&self) -> PoolStatus {
        let orphans = self.orphans.lock().unwrap();
        PoolStatus {
            packable_queue_size: self.pool.packable_queue_size(),
            live_records: self.pool.live_records(),
            orphan_count: orphans.len(),
            orphan_bytes: orphans.total_bytes(),
        }
    }
}
