//! Metrics collection for the packaging subsystem

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for packaging rounds
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total rounds completed
    pub rounds_completed: AtomicU64,

    /// Total transactions packaged
    pub transactions_packaged: AtomicU64,

    /// Total bytes packaged
    pub bytes_packaged: AtomicU64,

    /// Total transactions discarded as invalid
    pub transactions_discarded: AtomicU64,

    /// Total transactions routed to the orphan tracker
    pub transactions_orphaned: AtomicU64,

    /// Total groups deferred on transient verification failure
    pub groups_deferred: AtomicU64,

    /// Total orphan entries dropped by expiry sweeps
    pub orphans_expired: AtomicU64,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed round
    pub fn record_round(&self, tx_count: u64, bytes: u64) {
        self.rounds_completed.fetch_add(1, Ordering::Relaxed);
        self.transactions_packaged
            .fetch_add(tx_count, Ordering::Relaxed);
        self.bytes_packaged.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_discarded(&self, count: u64) {
        self.transactions_discarded
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_orphaned(&self, count: u64) {
        self.transactions_orphaned
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_deferred_group(&self) {
        self.groups_deferred.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_orphans_expired(&self, count: u64) {
        self.orphans_expired.fetch_add(count, Ordering::Relaxed);
    }

    /// Get rounds completed
    pub fn get_rounds_completed(&self) -> u64 {
        self.rounds_completed.load(Ordering::Relaxed)
    }

    /// Get average transactions per round
    pub fn get_avg_transactions_per_round(&self) -> f64 {
        let rounds = self.rounds_completed.load(Ordering::Relaxed);
        if rounds == 0 {
            return 0.0;
        }
        let txs = self.transactions_packaged.load(Ordering::Relaxed);
        txs as f64 / rounds as f64
    }
}
