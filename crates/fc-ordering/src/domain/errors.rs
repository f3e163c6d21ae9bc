//! Error types for transaction ordering

use thiserror::Error;

/// All errors that can occur while preparing a batch for ordering.
///
/// The sort itself never fails: a cyclic remainder degrades to arrival
/// order. These errors only guard batch admission.
#[derive(Debug, Error)]
pub enum OrderingError {
    /// Batch size exceeded limits
    #[error("Batch size exceeded: {size} > {max}")]
    BatchTooLarge { size: usize, max: usize },

    /// Edge count exceeded limits (anti-DoS)
    #[error("Edge count exceeded: {count} > {max}")]
    TooManyEdges { count: usize, max: usize },
}
