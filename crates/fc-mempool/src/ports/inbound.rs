//! Inbound (Driving) ports for the mempool crate.

use crate::domain::errors::MempoolError;
use crate::domain::value_objects::PoolStatus;
use async_trait::async_trait;
use shared_types::{TransactionRecord, TxHash};

/// Primary admission API.
///
/// Callers submit structurally valid, signature-checked transactions; this
/// boundary only decides pool admission and propagation.
#[async_trait]
pub trait MempoolApi: Send + Sync {
    /// Admits a transaction into the packable pool and persists it. When
    /// `local` is set the record is also handed to the broadcaster.
    async fn submit(&self, record: TransactionRecord, local: bool) -> Result<(), MempoolError>;

    /// Membership test against the pending order.
    fn exists(&self, id: &TxHash) -> bool;

    /// Bulk cleanup after a block confirms: map entries are deleted, order
    /// slots decay as tombstones.
    fn remove_confirmed(&self, ids: &[TxHash]);

    /// Approximate pool snapshot for metrics.
    fn status(&self) -> PoolStatus;
}
