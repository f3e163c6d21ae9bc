//! Error types for the mempool crate.

use thiserror::Error;

/// All errors that can occur in the admission path.
#[derive(Debug, Error)]
pub enum MempoolError {
    /// Same id inserted twice; the second insertion is a no-op.
    #[error("Duplicate transaction: {0}")]
    DuplicateTransaction(String),

    /// The pending order is at capacity.
    #[error("Pool capacity exhausted: {capacity}")]
    CapacityExhausted { capacity: usize },

    /// Unconfirmed-transaction storage failed. Logged, never fatal to a
    /// packaging round.
    #[error("Unconfirmed store failure: {0}")]
    Store(String),
}
