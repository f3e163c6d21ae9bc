//! Outbound (Driven) ports for the packaging crate.
//!
//! The only meaningful suspension point in a packaging round is the call to
//! an external validator module defined here; everything else is in-memory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{TransactionRecord, TxHash};
use thiserror::Error;

/// Per-record outcome of module verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Passed verification; eligible for the block.
    Accepted,
    /// Permanently invalid; discarded and reported with a reason.
    RejectedInvalid(String),
    /// References a predecessor the module cannot see yet; retried later.
    RejectedOrphan(TxHash),
    /// The module could not evaluate the record this round.
    Unavailable,
}

/// Errors from a module verification call. Any error is transient: the
/// whole group returns to the pool unchanged.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Module {module} unreachable: {reason}")]
    Unreachable { module: String, reason: String },

    #[error("Module {module} returned a malformed response")]
    MalformedResponse { module: String },
}

/// Ledger state a round verifies against. All groups in one round see the
/// same snapshot, which makes the per-snapshot verdicts idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Root of the ledger state the snapshot was taken at
    pub state_root: TxHash,
    /// Chain height of the snapshot
    pub height: u64,
}

impl LedgerSnapshot {
    pub fn new(state_root: TxHash, height: u64) -> Self {
        Self { state_root, height }
    }
}

/// External validator module boundary.
///
/// One verdict per input record, in input order. Implementations must be
/// idempotent per snapshot: re-verifying the same batch against the same
/// snapshot yields the same verdicts.
#[async_trait]
pub trait ValidationService: Send + Sync {
    async fn verify_batch(
        &self,
        module_key: &str,
        records: &[TransactionRecord],
        snapshot: &LedgerSnapshot,
    ) -> Result<Vec<Verdict>, ValidationError>;
}
