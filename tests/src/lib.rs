//! # ForgeChain Test Suite
//!
//! Unified test crate for cross-subsystem flows: admission through the
//! mempool, packaging rounds, orphan retry cycles, and ordering.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-subsystem packaging flows
//!     └── flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p fc-tests
//!
//! # By category
//! cargo test -p fc-tests integration::
//! ```

#![allow(unused_imports)]

pub mod integration;
