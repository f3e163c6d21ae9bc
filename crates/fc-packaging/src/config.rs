//! Configuration types for block packaging

use fc_ordering::config::OrderingConfig;
use serde::Deserialize;

/// Runtime configuration for packaging rounds
#[derive(Clone, Debug, Deserialize)]
pub struct PackagingConfig {
    /// Maximum cumulative byte size of a packaged block
    pub max_block_bytes: usize,

    /// Wall-clock budget for one packaging round (milliseconds)
    pub round_time_ms: u64,

    /// Margin reserved at the end of a round for verification, ordering,
    /// and emission; collection stops at `round_time_ms - finalize_margin_ms`
    pub finalize_margin_ms: u64,

    /// Upper bound on one module verification call (milliseconds)
    pub verify_timeout_ms: u64,

    /// Guards for the dependency sorter
    pub ordering: OrderingConfig,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            max_block_bytes: 2 * 1024 * 1024,
            round_time_ms: 10_000,
            finalize_margin_ms: 800,
            verify_timeout_ms: 3_000,
            ordering: OrderingConfig::default(),
        }
    }
}

impl PackagingConfig {
    /// Collection cutoff relative to the round start, in milliseconds.
    pub fn collect_window_ms(&self) -> u64 {
        self.round_time_ms.saturating_sub(self.finalize_margin_ms)
    }
}
