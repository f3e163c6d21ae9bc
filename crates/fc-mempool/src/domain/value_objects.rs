//! Value objects exposed by the mempool crate.

use serde::Serialize;

/// Point-in-time pool snapshot for metrics and operator queries. Counts are
/// approximate under concurrent mutation.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PoolStatus {
    /// Pending-order length, tombstones included.
    pub packable_queue_size: usize,
    /// Live records in the pool map.
    pub live_records: usize,
    /// Tracked orphan entries (live and loaned).
    pub orphan_count: usize,
    /// Summed byte size of live orphan records.
    pub orphan_bytes: usize,
}
