//! Domain layer for transaction ordering

pub mod entities;
pub mod errors;
