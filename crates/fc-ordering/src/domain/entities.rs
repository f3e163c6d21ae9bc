//! Dependency graph arena for batch ordering
//!
//! The graph is index-based: every record gets an arena slot in arrival
//! order, the unmet-predecessor count per slot lives in a flat array, and
//! edges are recorded as a producer-to-consumers adjacency list. An explicit
//! in-degree structure is required here: a comparator-driven sort cannot
//! order transitive dependency chains whose members are not adjacent in the
//! comparison sequence.

use shared_types::{TransactionRecord, TxHash};
use std::collections::HashMap;

/// Dependency graph over one batch of transactions.
///
/// Predecessor ids that do not resolve to a record in the same batch are
/// ignored as already satisfied (confirmed or external).
#[derive(Debug)]
pub struct DependencyGraph {
    /// Records in arrival order. Slot index is the node id.
    pub(crate) records: Vec<TransactionRecord>,
    /// Number of unmet in-batch predecessors per slot.
    pub(crate) blocking: Vec<usize>,
    /// Producer slot -> consumer slots waiting on it.
    pub(crate) dependents: Vec<Vec<usize>>,
    /// Total in-batch predecessor edges.
    pub(crate) edge_count: usize,
}

impl DependencyGraph {
    /// Builds the graph from a batch, keeping arrival order as slot order.
    pub fn build(records: Vec<TransactionRecord>) -> Self {
        let n = records.len();
        let mut index: HashMap<TxHash, usize> = HashMap::with_capacity(n);
        for (i, record) in records.iter().enumerate() {
            // First occurrence wins; a duplicate id in one batch is an
            // upstream defect and its edges resolve to the first slot.
            index.entry(record.id).or_insert(i);
        }

        let mut blocking = vec![0usize; n];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut edge_count = 0usize;

        for (i, record) in records.iter().enumerate() {
            for predecessor in &record.predecessors {
                let Some(&producer) = index.get(predecessor) else {
                    // Out-of-batch predecessor: already satisfied.
                    continue;
                };
                blocking[i] += 1;
                dependents[producer].push(i);
                edge_count += 1;
            }
        }

        Self {
            records,
            blocking,
            dependents,
            edge_count,
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of in-batch predecessor edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
