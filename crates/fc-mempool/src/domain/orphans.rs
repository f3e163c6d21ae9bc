//! # Orphan Tracker - Bounded Retry and Expiry
//!
//! Holds transactions whose referenced inputs are not yet visible locally.
//! Growth is bounded three ways: a per-entry attempt ceiling, an age ceiling,
//! and a total-byte ceiling with oldest-first eviction.
//!
//! An entry's record can be *loaned* back to the packable pool for another
//! packaging attempt (`reoffer`). While loaned, the entry keeps its attempt
//! count but holds no record, so a transaction is never live in the pool and
//! the tracker at the same time. A record observed again after a failed
//! retry returns to its existing entry with `attempts` incremented.

use super::entities::OrphanConfig;
use shared_types::{short_id, Timestamp, TransactionRecord, TxHash};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, warn};

/// One tracked orphan transaction.
#[derive(Debug)]
pub struct OrphanEntry {
    /// The record, or None while loaned to the pool for a retry.
    pub record: Option<TransactionRecord>,
    /// Byte size of the record, kept through loans for accounting.
    pub byte_size: usize,
    /// Packaging round during which the entry was first observed.
    pub added_at_round: u64,
    /// Wall-clock insertion time (ms).
    pub added_at: Timestamp,
    /// Packaging attempts that found this record un-packable.
    pub attempts: u32,
}

impl OrphanEntry {
    fn is_live(&self) -> bool {
        self.record.is_some()
    }
}

/// Bounded container for orphan transactions.
///
/// Not internally synchronized; the owning coordinator serializes access.
pub struct OrphanTracker {
    config: OrphanConfig,
    entries: HashMap<TxHash, OrphanEntry>,
    /// Insertion order, oldest first, for LRU-by-round eviction.
    arrival: VecDeque<TxHash>,
    /// Summed byte size of live (non-loaned) records.
    total_bytes: usize,
    /// Monotonic packaging-round counter.
    round: u64,
}

impl OrphanTracker {
    pub fn new(config: OrphanConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            arrival: VecDeque::new(),
            total_bytes: 0,
            round: 0,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(OrphanConfig::default())
    }

    /// Advances the packaging-round counter and returns the new round.
    pub fn begin_round(&mut self) -> u64 {
        self.round += 1;
        self.round
    }

    pub fn current_round(&self) -> u64 {
        self.round
    }

    /// Records a packaging attempt that found `record` un-packable.
    ///
    /// First observation inserts an entry with `attempts = 1`; a repeat
    /// observation returns the record to its entry and increments the count.
    /// Returns false if the byte ceiling rejects the record even after
    /// evicting older entries.
    pub fn observe(&mut self, record: TransactionRecord, now: Timestamp) -> bool {
        let id = record.id;
        let size = record.byte_size();

        if let Some(entry) = self.entries.get_mut(&id) {
            entry.attempts += 1;
            let attempts = entry.attempts;
            if !entry.is_live() {
                entry.record = Some(record);
                self.total_bytes += size;
            }
            debug!(id = %short_id(&id), attempts, "orphan observed again");
            return true;
        }

        if !self.make_room(size) {
            warn!(
                id = %short_id(&id),
                bytes = size,
                ceiling = self.config.max_total_bytes,
                "orphan rejected, tracker byte ceiling"
            );
            return false;
        }

        self.entries.insert(
            id,
            OrphanEntry {
                record: Some(record),
                byte_size: size,
                added_at_round: self.round,
                added_at: now,
                attempts: 1,
            },
        );
        self.arrival.push_back(id);
        self.total_bytes += size;
        true
    }

    /// Evicts oldest live entries until `incoming` bytes fit under the
    /// ceiling. Returns false if they cannot fit at all.
    fn make_room(&mut self, incoming: usize) -> bool {
        if incoming > self.config.max_total_bytes {
            return false;
        }
        while self.total_bytes + incoming > self.config.max_total_bytes {
            let Some(oldest) = self.oldest_live_id() else {
                return false;
            };
            if let Some(entry) = self.entries.remove(&oldest) {
                self.total_bytes -= entry.byte_size;
                warn!(
                    id = %short_id(&oldest),
                    round = entry.added_at_round,
                    "evicted oldest orphan for space"
                );
            }
        }
        true
    }

    fn oldest_live_id(&mut self) -> Option<TxHash> {
        // Skip ids whose entries were already removed or loaned out; one
        // bounded pass over the arrival order.
        let mut rotated = 0;
        let limit = self.arrival.len();
        while rotated < limit {
            let id = self.arrival.pop_front()?;
            match self.entries.get(&id) {
                Some(entry) if entry.is_live() => {
                    self.arrival.push_front(id);
                    return Some(id);
                }
                Some(_) => {
                    // Loaned; keep the slot for when the record returns.
                    self.arrival.push_back(id);
                    rotated += 1;
                }
                None => {
                    // Stale id, drop it.
                }
            }
        }
        None
    }

    /// True if the entry has exhausted its attempts or outlived its age
    /// ceiling. Either trigger alone expires the entry.
    pub fn is_expired(&self, entry: &OrphanEntry, now: Timestamp) -> bool {
        entry.attempts >= self.config.max_attempts
            || now.saturating_sub(entry.added_at) > self.config.lifetime_ms
    }

    /// Drops expired entries that hold their record. Returns the dropped
    /// ids for storage cleanup and metrics.
    ///
    /// An expired entry whose record is loaned to the pool keeps its
    /// metadata: dropping it would let the next failed retry start a fresh
    /// entry at `attempts = 1`, resetting the retry bound. The entry is
    /// dropped by a later sweep once the loan resolves.
    pub fn sweep(&mut self, now: Timestamp) -> Vec<TxHash> {
        let expired: Vec<TxHash> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_live() && self.is_expired(entry, now))
            .map(|(id, _)| *id)
            .collect();

        let mut dropped = Vec::new();
        for id in expired {
            if let Some(entry) = self.entries.remove(&id) {
                self.total_bytes -= entry.byte_size;
                debug!(id = %short_id(&id), attempts = entry.attempts, "expired orphan dropped");
                dropped.push(id);
            }
        }
        self.arrival.retain(|id| self.entries.contains_key(id));
        dropped
    }

    /// Loans out the records of live, non-expired entries for another
    /// packaging attempt, oldest first. Attempt counts are retained.
    pub fn reoffer(&mut self, now: Timestamp) -> Vec<TransactionRecord> {
        let candidates: Vec<TxHash> = self
            .arrival
            .iter()
            .filter(|id| {
                self.entries
                    .get(*id)
                    .map(|e| e.is_live() && !self.is_expired(e, now))
                    .unwrap_or(false)
            })
            .copied()
            .collect();

        let mut loaned = Vec::with_capacity(candidates.len());
        for id in candidates {
            if let Some(entry) = self.entries.get_mut(&id) {
                if let Some(record) = entry.record.take() {
                    self.total_bytes -= entry.byte_size;
                    loaned.push(record);
                }
            }
        }
        loaned
    }

    /// Removes and returns entries whose dependency the caller has resolved.
    /// Loaned entries are forgotten without a record, since the pool already
    /// holds their transaction.
    pub fn promote(&mut self, ids: &[TxHash]) -> Vec<TransactionRecord> {
        let mut promoted = Vec::new();
        for id in ids {
            if let Some(entry) = self.entries.remove(id) {
                if let Some(record) = entry.record {
                    self.total_bytes -= entry.byte_size;
                    promoted.push(record);
                }
            }
        }
        self.arrival.retain(|id| self.entries.contains_key(id));
        promoted
    }

    /// True if the id has a live (record-holding) entry.
    pub fn contains_live(&self, id: &TxHash) -> bool {
        self.entries.get(id).map(OrphanEntry::is_live).unwrap_or(false)
    }

    /// True if the id is tracked, live or loaned.
    pub fn contains(&self, id: &TxHash) -> bool {
        self.entries.contains_key(id)
    }

    pub fn attempts(&self, id: &TxHash) -> Option<u32> {
        self.entries.get(id).map(|e| e.attempts)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_live()).count()
    }

    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }
}
