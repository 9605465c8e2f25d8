// Port Layer - Interfaces for external dependencies

pub mod snapshot_sink;
pub mod time_provider;

// Re-exports
pub use snapshot_sink::SnapshotSink;
pub use time_provider::{SystemTimeProvider, TimeProvider};
