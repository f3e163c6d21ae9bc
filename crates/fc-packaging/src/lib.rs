//! # Block Packaging
//!
//! Runs packaging rounds: drains the packable pool under a byte budget and a
//! wall-clock deadline, verifies collected records per owning module, routes
//! orphans and failures back into the retry machinery, and emits the final
//! block order via the dependency sorter.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | A round never loses a record: every collected record is emitted, discarded with a reason, orphaned, or back in the pool | `service.rs` - `package_round()` resolve step |
//! | INVARIANT-2 | Emitted bytes never exceed `max_block_bytes` | `service.rs` - collection budget check |
//! | INVARIANT-3 | A transiently failed group returns to the pool unchanged, never orphaned or discarded | `service.rs` - verify step |
//! | INVARIANT-4 | Module verification is bounded by `verify_timeout_ms`; a timeout is a transient failure | `service.rs` - `tokio::time::timeout` |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/ - Scripted validator for tests                       │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - BlockAssemblyApi trait, PackagingOutcome   │
//! │  ports/outbound.rs - ValidationService, Verdict, LedgerSnapshot │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  service.rs - PackagingCoordinator round state machine          │
//! │  config.rs  - PackagingConfig                                   │
//! │  metrics.rs - Round counters                                    │
//! │  error.rs   - PackagingError enum                               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use config::PackagingConfig;
pub use error::{PackagingError, Result};
pub use metrics::Metrics;
pub use ports::inbound::{BlockAssemblyApi, PackagingOutcome};
pub use ports::outbound::{LedgerSnapshot, ValidationError, ValidationService, Verdict};
pub use service::PackagingCoordinator;
