//! Stable Kahn's topological sort
//!
//! O(n + e) over an index arena. The ready queue is seeded in arrival order
//! and appended FIFO, so records with no unmet dependency keep their relative
//! arrival order and newly unblocked records never jump ahead of records that
//! were already ready.

use crate::config::OrderingConfig;
use crate::domain::entities::DependencyGraph;
use crate::domain::errors::OrderingError;
use shared_types::TransactionRecord;
use std::collections::VecDeque;
use tracing::warn;

/// Checks batch ceilings before a sort. Edge counting uses the declared
/// predecessor lists, which bounds the work `DependencyGraph::build` does.
pub fn validate(
    records: &[TransactionRecord],
    config: &OrderingConfig,
) -> Result<(), OrderingError> {
    if records.len() > config.max_batch_size {
        return Err(OrderingError::BatchTooLarge {
            size: records.len(),
            max: config.max_batch_size,
        });
    }

    let declared_edges: usize = records.iter().map(|r| r.predecessors.len()).sum();
    if declared_edges > config.max_edge_count {
        return Err(OrderingError::TooManyEdges {
            count: declared_edges,
            max: config.max_edge_count,
        });
    }

    Ok(())
}

/// Validates the batch against `config` ceilings, then sorts it.
pub fn sort_batch(
    records: Vec<TransactionRecord>,
    config: &OrderingConfig,
) -> Result<Vec<TransactionRecord>, OrderingError> {
    validate(&records, config)?;
    Ok(sort_by_dependency(records))
}

/// Orders a batch so every in-batch predecessor precedes its consumers.
///
/// Never fails: a remainder that cannot be scheduled (a cycle, or an in-batch
/// predecessor that itself never becomes ready) is appended in arrival order
/// so one malformed chain does not block unrelated transactions.
pub fn sort_by_dependency(records: Vec<TransactionRecord>) -> Vec<TransactionRecord> {
    if records.len() <= 1 {
        return records;
    }

    let graph = DependencyGraph::build(records);
    let n = graph.len();
    let mut blocking = graph.blocking;

    // Seed with unblocked slots in arrival order: the stable tie-break.
    let mut ready: VecDeque<usize> = (0..n).filter(|&i| blocking[i] == 0).collect();
    let mut order: Vec<usize> = Vec::with_capacity(n);
    let mut emitted = vec![false; n];

    while let Some(slot) = ready.pop_front() {
        order.push(slot);
        emitted[slot] = true;

        for &consumer in &graph.dependents[slot] {
            blocking[consumer] -= 1;
            if blocking[consumer] == 0 {
                // FIFO append keeps already-ready records ahead.
                ready.push_back(consumer);
            }
        }
    }

    if order.len() < n {
        warn!(
            remainder = n - order.len(),
            "unsortable dependency remainder, emitting in arrival order"
        );
        order.extend((0..n).filter(|&i| !emitted[i]));
    }

    let mut slots: Vec<Option<TransactionRecord>> =
        graph.records.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}
