//! # Transaction Ordering
//!
//! Orders a batch of transactions so that every transaction spending another
//! in-batch transaction's output is placed strictly after its producer, with
//! stable arrival-order tie-breaking.
//!
//! ## Architecture
//!
//! - **Domain**: `DependencyGraph` arena, `OrderingError`
//! - **Algorithms**: stable Kahn's topological sort
//! - **Config**: batch and edge ceilings
//!
//! The sorter is a pure function over its input: no shared state, no I/O.
//! Predecessor ids pointing outside the batch are treated as already
//! satisfied. A cyclic or unresolvable remainder is emitted best-effort in
//! arrival order so a malformed chain never blocks unrelated transactions.

pub mod algorithms;
pub mod config;
pub mod domain;

pub use algorithms::kahns::{sort_batch, sort_by_dependency};
pub use config::OrderingConfig;
pub use domain::entities::DependencyGraph;
pub use domain::errors::OrderingError;
