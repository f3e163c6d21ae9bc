//! # Packable Transaction Pool
//!
//! Holds verified transactions awaiting inclusion in a block and tracks
//! orphan transactions whose predecessors are not yet visible locally.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | An id in the record map appears at most once in the order | `domain/pool.rs` - duplicate check in `insert()` |
//! | INVARIANT-2 | An id in the order without a map entry is a tombstone, skipped lazily | `domain/pool.rs` - `poll()`/`poll_last()` |
//! | INVARIANT-3 | Orphan attempts never exceed the configured maximum | `domain/orphans.rs` - `observe()` + `sweep()` |
//! | INVARIANT-4 | A record is live in at most one of {pool map, orphan tracker} | `domain/orphans.rs` - loan-out on re-offer |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/ - In-memory store, no-op broadcaster, manual clock   │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - MempoolApi trait                           │
//! │  ports/outbound.rs - UnconfirmedStore, TimeSource, Broadcaster  │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/pool.rs          - PackablePool (deque + striped map)   │
//! │  domain/orphans.rs       - OrphanTracker (bounded retry/age)    │
//! │  domain/entities.rs      - PoolConfig, OrphanConfig             │
//! │  domain/value_objects.rs - PoolStatus                           │
//! │  domain/errors.rs        - MempoolError enum                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::*;
pub use domain::*;
pub use ports::inbound::MempoolApi;
pub use ports::outbound::{Broadcaster, SystemTimeSource, TimeSource, UnconfirmedStore};
pub use service::AdmissionService;
