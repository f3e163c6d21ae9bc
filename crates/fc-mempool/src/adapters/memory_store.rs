//! In-memory unconfirmed-transaction store.
//!
//! Backs single-process deployments and the test suites. Production nodes
//! bind a persistent implementation at the same port.

use crate::domain::errors::MempoolError;
use crate::ports::outbound::UnconfirmedStore;
use shared_types::TxHash;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// HashMap-backed store.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<TxHash, Vec<u8>>>,
    /// When set, every call fails; exercises the log-and-continue paths.
    fail_all: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent store call fail.
    pub fn set_failing(&self, failing: bool) {
        self.fail_all.store(failing, Ordering::SeqCst);
    }

    pub fn contains(&self, id: &TxHash) -> bool {
        self.entries.lock().unwrap().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl UnconfirmedStore for InMemoryStore {
    fn put(&self, id: &TxHash, raw: &[u8]) -> Result<(), MempoolError> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(MempoolError::Store("simulated put failure".into()));
        }
        self.entries.lock().unwrap().insert(*id, raw.to_vec());
        Ok(())
    }

    fn remove(&self, id: &TxHash) -> Result<(), MempoolError> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(MempoolError::Store("simulated remove failure".into()));
        }
        self.entries.lock().unwrap().remove(id);
        Ok(())
    }
}
