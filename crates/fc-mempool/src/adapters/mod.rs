//! Adapter implementations of the outbound ports.

pub mod broadcast;
pub mod clock;
pub mod memory_store;

pub use broadcast::{NoopBroadcaster, RecordingBroadcaster};
pub use clock::ManualTimeSource;
pub use memory_store::InMemoryStore;
