//! # Core Domain Entities
//!
//! Defines the entities shared by the admission, ordering, and packaging
//! crates.
//!
//! ## Clusters
//!
//! - **Identity**: `TxHash`, `Timestamp`
//! - **Transactions**: `TransactionRecord`

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A 32-byte SHA-256 content hash.
pub type TxHash = [u8; 32];

/// Timestamp in milliseconds since UNIX epoch.
pub type Timestamp = u64;

/// Renders the first 8 bytes of a hash as hex for log output.
pub fn short_id(id: &TxHash) -> String {
    hex::encode(&id[..8])
}

/// An immutable parsed transaction with derived identifiers.
///
/// Created once on admission and never mutated afterwards. The `id` is the
/// SHA-256 hash of the raw payload; `predecessors` lists the ids of other
/// pending transactions whose outputs this one spends, computed by the ledger
/// before submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Content hash of `raw`, unique per transaction.
    pub id: TxHash,
    /// Opaque serialized payload.
    pub raw: Vec<u8>,
    /// Identifies the validator module that owns this transaction's type.
    pub module_key: String,
    /// Ids of other pending transactions this one depends on. May reference
    /// ids outside any particular batch; consumers treat those as satisfied.
    pub predecessors: Vec<TxHash>,
}

impl TransactionRecord {
    /// Creates a record from a raw payload, deriving the content hash.
    pub fn new(raw: Vec<u8>, module_key: impl Into<String>) -> Self {
        let id = Self::hash_of(&raw);
        Self {
            id,
            raw,
            module_key: module_key.into(),
            predecessors: Vec::new(),
        }
    }

    /// Creates a record with explicit predecessor declarations.
    pub fn with_predecessors(
        raw: Vec<u8>,
        module_key: impl Into<String>,
        predecessors: Vec<TxHash>,
    ) -> Self {
        let mut record = Self::new(raw, module_key);
        record.predecessors = predecessors;
        record
    }

    /// Builds a record from pre-computed parts. Intended for replay and test
    /// paths where the id was derived elsewhere.
    pub fn from_parts(
        id: TxHash,
        raw: Vec<u8>,
        module_key: impl Into<String>,
        predecessors: Vec<TxHash>,
    ) -> Self {
        Self {
            id,
            raw,
            module_key: module_key.into(),
            predecessors,
        }
    }

    /// Serialized size in bytes, used for budget accounting.
    pub fn byte_size(&self) -> usize {
        self.raw.len()
    }

    /// True if this record declares `other` as a predecessor.
    pub fn depends_on(&self, other: &TxHash) -> bool {
        self.predecessors.contains(other)
    }

    /// SHA-256 of a raw payload.
    pub fn hash_of(raw: &[u8]) -> TxHash {
        let digest = Sha256::digest(raw);
        let mut id = [0u8; 32];
        id.copy_from_slice(&digest);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_derived_from_raw() {
        let a = TransactionRecord::new(vec![1, 2, 3], "transfer");
        let b = TransactionRecord::new(vec![1, 2, 3], "transfer");
        let c = TransactionRecord::new(vec![1, 2, 4], "transfer");

        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_byte_size_matches_raw() {
        let record = TransactionRecord::new(vec![0u8; 250], "transfer");
        assert_eq!(record.byte_size(), 250);
    }

    #[test]
    fn test_depends_on() {
        let parent = TransactionRecord::new(vec![1], "transfer");
        let child = TransactionRecord::with_predecessors(vec![2], "transfer", vec![parent.id]);

        assert!(child.depends_on(&parent.id));
        assert!(!parent.depends_on(&child.id));
    }

    #[test]
    fn test_short_id_renders_prefix() {
        let record = TransactionRecord::new(vec![7, 7, 7], "transfer");
        let rendered = short_id(&record.id);
        assert_eq!(rendered.len(), 16);
        assert_eq!(rendered, hex::encode(&record.id[..8]));
    }

    #[test]
    fn test_serde_round_trip() {
        let record =
            TransactionRecord::with_predecessors(vec![9, 9], "contract", vec![[0xAB; 32]]);
        let json = serde_json::to_string(&record).unwrap();
        let back: TransactionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
