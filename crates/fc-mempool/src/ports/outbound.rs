//! Outbound (Driven) ports for the mempool crate.
//!
//! These traits define the external collaborators the pool needs: the
//! unconfirmed-transaction store, a clock, and the network broadcaster.
//! All are synchronous; none of them may block on I/O inside pool
//! operations beyond what the implementation itself guarantees.

use crate::domain::errors::MempoolError;
use shared_types::{Timestamp, TransactionRecord, TxHash};

/// Persistence for unconfirmed transactions.
///
/// Failures on this interface are logged by callers and never propagated as
/// packaging failures.
pub trait UnconfirmedStore: Send + Sync {
    /// Persists a newly admitted transaction payload.
    fn put(&self, id: &TxHash, raw: &[u8]) -> Result<(), MempoolError>;

    /// Removes a transaction that is confirmed, invalid, or expired.
    fn remove(&self, id: &TxHash) -> Result<(), MempoolError>;
}

/// Time source for consistent timestamp handling.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in milliseconds.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Propagates locally originated transactions to peers. Fire-and-forget;
/// the engine expects no response.
pub trait Broadcaster: Send + Sync {
    fn broadcast(&self, record: &TransactionRecord);
}
