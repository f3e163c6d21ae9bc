//! Configuration entities for the pool and the orphan tracker.
//!
//! All thresholds are explicit constructor inputs; nothing here is ambient
//! process state.

use serde::{Deserialize, Serialize};

// Re-export from shared-types for convenience
pub use shared_types::{Timestamp, TransactionRecord, TxHash};

/// Packable pool configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Maximum ids held in the pending order (tombstones included).
    pub capacity: usize,
    /// Number of lock stripes for the record map. Rounded up to the next
    /// power of two.
    pub stripes: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: 200_000,
            stripes: 64,
        }
    }
}

/// Orphan tracker configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrphanConfig {
    /// Packaging attempts before an orphan is permanently dropped.
    pub max_attempts: u32,
    /// Age ceiling in milliseconds.
    pub lifetime_ms: u64,
    /// Ceiling on the summed byte size of tracked records.
    pub max_total_bytes: usize,
}

impl Default for OrphanConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            lifetime_ms: 300_000,
            max_total_bytes: 32 * 1024 * 1024,
        }
    }
}
