//! Scripted validator adapter.
//!
//! Stands in for external validator modules in tests and local runs. Each
//! module key can be scripted with its own behavior; unscripted modules
//! follow the default.

use crate::ports::outbound::{LedgerSnapshot, ValidationError, ValidationService, Verdict};
use async_trait::async_trait;
use shared_types::{TransactionRecord, TxHash};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// How a scripted module responds to `verify_batch`.
#[derive(Debug, Clone)]
pub enum ValidatorBehavior {
    /// Accept every record.
    AcceptAll,
    /// Return a transient error for the whole batch.
    FailTransient,
    /// Mark every record `Unavailable`.
    Unavailable,
    /// Sleep for the given milliseconds, then accept everything. Used to
    /// exercise the verification timeout.
    Delay(u64),
    /// Per-record verdicts; records absent from the map are accepted.
    PerRecord(HashMap<TxHash, Verdict>),
}

/// [`ValidationService`] with scripted per-module behavior.
pub struct ScriptedValidator {
    default_behavior: ValidatorBehavior,
    per_module: Mutex<HashMap<String, ValidatorBehavior>>,
    calls: AtomicU64,
}

impl ScriptedValidator {
    pub fn new(default_behavior: ValidatorBehavior) -> Self {
        Self {
            default_behavior,
            per_module: Mutex::new(HashMap::new()),
            calls: AtomicU64::new(0),
        }
    }

    /// Validator that accepts everything.
    pub fn accept_all() -> Self {
        Self::new(ValidatorBehavior::AcceptAll)
    }

    /// Scripts one module key, leaving the rest on the default.
    pub fn set_module(&self, module_key: impl Into<String>, behavior: ValidatorBehavior) {
        self.per_module
            .lock()
            .unwrap()
            .insert(module_key.into(), behavior);
    }

    /// Number of `verify_batch` calls made so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    fn behavior_for(&self, module_key: &str) -> ValidatorBehavior {
        self.per_module
            .lock()
            .unwrap()
            .get(module_key)
            .cloned()
            .unwrap_or_else(|| self.default_behavior.clone())
    }
}

#[async_trait]
impl ValidationService for ScriptedValidator {
    async fn verify_batch(
        &self,
        module_key: &str,
        records: &[TransactionRecord],
        _snapshot: &LedgerSnapshot,
    ) -> Result<Vec<Verdict>, ValidationError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        match self.behavior_for(module_key) {
            ValidatorBehavior::AcceptAll => Ok(vec![Verdict::Accepted; records.len()]),
            ValidatorBehavior::FailTransient => Err(ValidationError::Unreachable {
                module: module_key.to_string(),
                reason: "scripted transient failure".to_string(),
            }),
            ValidatorBehavior::Unavailable => Ok(vec![Verdict::Unavailable; records.len()]),
            ValidatorBehavior::Delay(ms) => {
                tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
                Ok(vec![Verdict::Accepted; records.len()])
            }
            ValidatorBehavior::PerRecord(verdicts) => Ok(records
                .iter()
                .map(|r| verdicts.get(&r.id).cloned().unwrap_or(Verdict::Accepted))
                .collect()),
        }
    }
}
