//! # Shared Types Crate
//!
//! Domain entities shared by the ForgeChain engine crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-crate types are defined here, once.
//! - **Immutable records**: a `TransactionRecord` never changes after its
//!   content hash is derived.

pub mod entities;

pub use entities::*;
