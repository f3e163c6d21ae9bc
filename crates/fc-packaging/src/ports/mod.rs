//! Port definitions for the packaging crate.

pub mod inbound;
pub mod outbound;
