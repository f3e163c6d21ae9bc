//! Broadcaster adapters.

use crate::ports::outbound::Broadcaster;
use shared_types::{TransactionRecord, TxHash};
use std::sync::Mutex;

/// Discards every broadcast. For nodes without peers and for tests that do
/// not care about propagation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBroadcaster;

impl Broadcaster for NoopBroadcaster {
    fn broadcast(&self, _record: &TransactionRecord) {}
}

/// Records broadcast ids for assertions.
#[derive(Default)]
pub struct RecordingBroadcaster {
    sent: Mutex<Vec<TxHash>>,
}

impl RecordingBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<TxHash> {
        self.sent.lock().unwrap().clone()
    }
}

impl Broadcaster for RecordingBroadcaster {
    fn broadcast(&self, record: &TransactionRecord) {
        self.sent.lock().unwrap().push(record.id);
    }
}
