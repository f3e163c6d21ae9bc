//! # Packable Pool - Pending Order and Striped Record Map
//!
//! The concurrent holding area for transactions eligible for the next
//! packaging attempt.
//!
//! ## Data Structures
//!
//! - `order`: doubly-ended sequence of pending ids (front = next to package)
//! - `stripes`: record map split across fixed-width lock stripes keyed by a
//!   deterministic fold of the id
//!
//! ## Invariants Enforced
//!
//! - INVARIANT-1: duplicate insertion of a live id is rejected in `insert()`
//! - INVARIANT-2: an id in `order` with no map entry is a tombstone; `poll()`
//!   and `poll_last()` skip it and trigger the storage removal side effect
//!
//! Per-id operations are atomic (the order mutex serializes pops, a stripe
//! mutex serializes map access for that id); there is no pool-wide lock, so
//! size queries are approximate under concurrent mutation and must only feed
//! metrics or backpressure heuristics.

use super::entities::PoolConfig;
use super::errors::MempoolError;
use crate::ports::outbound::UnconfirmedStore;
use shared_types::{short_id, TransactionRecord, TxHash};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, warn};

/// Thread-safe pool of transactions awaiting packaging.
pub struct PackablePool {
    config: PoolConfig,
    /// Pending ids in packaging order.
    order: Mutex<VecDeque<TxHash>>,
    /// Record map, lock-striped by id.
    stripes: Box<[Mutex<HashMap<TxHash, TransactionRecord>>]>,
    /// Unconfirmed-transaction storage; removal fires on tombstone sweep.
    store: Arc<dyn UnconfirmedStore>,
}

impl PackablePool {
    /// Creates an empty pool. The stripe count is rounded up to a power of
    /// two so stripe selection is a mask.
    pub fn new(config: PoolConfig, store: Arc<dyn UnconfirmedStore>) -> Self {
        let stripe_count = config.stripes.max(1).next_power_of_two();
        let stripes = (0..stripe_count)
            .map(|_| Mutex::new(HashMap::new()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            config,
            order: Mutex::new(VecDeque::new()),
            stripes,
            store,
        }
    }

    fn stripe_of(&self, id: &TxHash) -> &Mutex<HashMap<TxHash, TransactionRecord>> {
        let mut fold = [0u8; 8];
        fold.copy_from_slice(&id[..8]);
        let slot = u64::from_le_bytes(fold) as usize & (self.stripes.len() - 1);
        &self.stripes[slot]
    }

    /// Inserts at the front of the order: the record is reconsidered ahead
    /// of fresh arrivals. Returns false on rejection; never raises.
    pub fn offer_first(&self, record: TransactionRecord) -> bool {
        self.insert(record, true).is_ok()
    }

    /// Inserts at the back of the order (normal arrival). Returns false on
    /// rejection; never raises.
    pub fn add(&self, record: TransactionRecord) -> bool {
        self.insert(record, false).is_ok()
    }

    /// Back insertion reporting the rejection reason; the admission service
    /// surfaces it to submitters.
    pub fn try_add(&self, record: TransactionRecord) -> Result<(), MempoolError> {
        self.insert(record, false)
    }

    fn insert(&self, record: TransactionRecord, front: bool) -> Result<(), MempoolError> {
        let id = record.id;

        {
            let mut stripe = self.stripe_of(&id).lock().unwrap();
            if stripe.contains_key(&id) {
                // Double insertion is a programming defect upstream; keep
                // the pool consistent and move on.
                error!(id = %short_id(&id), "duplicate insertion into packable pool");
                return Err(MempoolError::DuplicateTransaction(short_id(&id)));
            }
            stripe.insert(id, record);
        }

        {
            let mut order = self.order.lock().unwrap();
            if order.len() >= self.config.capacity {
                drop(order);
                self.stripe_of(&id).lock().unwrap().remove(&id);
                warn!(
                    id = %short_id(&id),
                    capacity = self.config.capacity,
                    "packable order at capacity, rejecting insertion"
                );
                return Err(MempoolError::CapacityExhausted {
                    capacity: self.config.capacity,
                });
            }
            if front {
                order.push_front(id);
            } else {
                order.push_back(id);
            }
        }

        Ok(())
    }

    /// Pops the front record, lazily sweeping tombstones. Each swept
    /// tombstone triggers removal from unconfirmed storage.
    pub fn poll(&self) -> Option<TransactionRecord> {
        self.take(true)
    }

    /// Pops the back record; used when a batch is handed back for
    /// reprocessing in reverse.
    pub fn poll_last(&self) -> Option<TransactionRecord> {
        self.take(false)
    }

    fn take(&self, front: bool) -> Option<TransactionRecord> {
        loop {
            let id = {
                let mut order = self.order.lock().unwrap();
                if front {
                    order.pop_front()?
                } else {
                    order.pop_back()?
                }
            };

            let taken = self.stripe_of(&id).lock().unwrap().remove(&id);
            match taken {
                Some(record) => return Some(record),
                None => {
                    debug!(id = %short_id(&id), "swept tombstone from packable order");
                    if let Err(e) = self.store.remove(&id) {
                        warn!(id = %short_id(&id), error = %e, "unconfirmed store removal failed");
                    }
                }
            }
        }
    }

    /// Membership test against the order sequence only. An id can exist
    /// here as a tombstone with no live record.
    pub fn exists(&self, id: &TxHash) -> bool {
        self.order.lock().unwrap().contains(id)
    }

    /// Deletes the map entries for `ids`, leaving tombstones in the order
    /// for lazy sweep. This is the bulk post-confirmation cleanup path; it
    /// avoids compacting the order sequence.
    pub fn remove_ids(&self, ids: &[TxHash]) {
        for id in ids {
            self.stripe_of(id).lock().unwrap().remove(id);
        }
    }

    /// Deletes a single record's map entry, tombstoning its order slot.
    pub fn remove_record(&self, record: &TransactionRecord) {
        self.remove_ids(std::slice::from_ref(&record.id));
    }

    /// Empties the order sequence. Map entries for cleared ids become
    /// unreachable and are dropped when their stripes next shrink.
    pub fn clear(&self) {
        let mut order = self.order.lock().unwrap();
        debug!(cleared = order.len(), "clearing packable order");
        order.clear();
    }

    /// Approximate pending-order length, tombstones included. Metrics and
    /// backpressure only, never correctness decisions.
    pub fn packable_queue_size(&self) -> usize {
        self.order.lock().unwrap().len()
    }

    /// Approximate count of live records across all stripes.
    pub fn live_records(&self) -> usize {
        self.stripes
            .iter()
            .map(|s| s.lock().unwrap().len())
            .sum()
    }
}
