// Snapshot Sink Port - where the scheduler publishes each tick's snapshot

use crate::domain::ProgressSnapshot;
use crate::error::Result;
use async_trait::async_trait;

/// Receiver of freshly computed snapshots
///
/// Each published snapshot replaces the previous one wholesale; sinks never
/// see partial updates.
#[async_trait]
pub trait SnapshotSink: Send + Sync {
    /// Publish a snapshot
    ///
    /// # Errors
    /// `AppError::Publish` if the snapshot could not be delivered. The scheduler
    /// logs the failure and carries on with the next tick.
    async fn publish(&self, snapshot: ProgressSnapshot) -> Result<()>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::sync::{Arc, Mutex};

    /// Sink that records everything it receives
    #[derive(Clone, Default)]
    pub struct RecordingSink {
        received: Arc<Mutex<Vec<ProgressSnapshot>>>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn received(&self) -> Vec<ProgressSnapshot> {
            self.received.lock().unwrap().clone()
        }

        pub fn count(&self) -> usize {
            self.received.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SnapshotSink for RecordingSink {
        async fn publish(&self, snapshot: ProgressSnapshot) -> Result<()> {
            self.received.lock().unwrap().push(snapshot);
            Ok(())
        }
    }

    /// Sink that rejects every snapshot
    pub struct FailingSink;

    #[async_trait]
    impl SnapshotSink for FailingSink {
        async fn publish(&self, _snapshot: ProgressSnapshot) -> Result<()> {
            Err(AppError::Publish("sink unavailable".to_string()))
        }
    }
}
