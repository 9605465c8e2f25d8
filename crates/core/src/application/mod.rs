// Application Layer - Calculator, publishing and scheduling

pub mod calculator;
pub mod constants;
pub mod publisher;
pub mod scheduler;
pub mod shutdown;

// Re-exports
pub use calculator::{compute_progress, life_progress};
pub use publisher::{LatestSnapshot, SnapshotReceiver};
pub use scheduler::{ProgressScheduler, SchedulerHandle};
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};
