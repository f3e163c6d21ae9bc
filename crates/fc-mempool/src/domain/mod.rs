//! Domain layer: the pool, the orphan tracker, and their configuration.

pub mod entities;
pub mod errors;
pub mod orphans;
pub mod pool;
pub mod value_objects;

pub use entities::{OrphanConfig, PoolConfig};
pub use errors::MempoolError;
pub use orphans::{OrphanEntry, OrphanTracker};
pub use pool::PackablePool;
pub use value_objects::PoolStatus;
