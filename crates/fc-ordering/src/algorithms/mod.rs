//! Ordering algorithms

pub mod kahns;
