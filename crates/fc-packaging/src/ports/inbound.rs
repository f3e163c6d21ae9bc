//! Inbound (Driving) ports for the packaging crate.

use crate::ports::outbound::LedgerSnapshot;
use async_trait::async_trait;
use shared_types::{TransactionRecord, TxHash};

/// Everything a round produced, for the block proposer and for accounting.
///
/// The counts partition the collected set: `transactions` plus `discarded`
/// plus `orphaned` plus `deferred` covers every record the round polled.
#[derive(Debug)]
pub struct PackagingOutcome {
    /// Round number assigned by the orphan tracker's counter
    pub round: u64,

    /// Verified records in final block order
    pub transactions: Vec<TransactionRecord>,

    /// Cumulative byte size of `transactions`
    pub total_bytes: usize,

    /// Permanently discarded records with the module's reason
    pub discarded: Vec<(TxHash, String)>,

    /// Records routed to the orphan tracker this round
    pub orphaned: usize,

    /// Records returned to the pool after transient verification failure
    pub deferred: usize,
}

/// Primary block-assembly API.
#[async_trait]
pub trait BlockAssemblyApi: Send + Sync {
    /// Runs one packaging round against `snapshot` and returns the ordered
    /// transaction list with accounting. Never fails; a round with nothing
    /// to package returns an empty outcome.
    async fn package_round(&self, snapshot: &LedgerSnapshot) -> PackagingOutcome;

    /// Promotes orphans whose predecessors the caller has confirmed as
    /// resolved; promoted records re-enter the pool ahead of fresh arrivals.
    fn promote_orphans(&self, ids: &[TxHash]) -> usize;

    /// Drops expired orphan entries outside the round cadence. Returns the
    /// number of entries dropped.
    fn sweep_orphans(&self) -> usize;
}
