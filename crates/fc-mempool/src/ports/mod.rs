//! Port definitions (hexagonal architecture)

pub mod inbound;
pub mod outbound;
