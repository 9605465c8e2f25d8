// Latest Snapshot - single published snapshot, replaced wholesale each tick

use crate::domain::ProgressSnapshot;
use crate::error::Result;
use crate::port::SnapshotSink;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::trace;

pub type SnapshotReceiver = watch::Receiver<Option<Arc<ProgressSnapshot>>>;

/// In-memory sink holding the most recent snapshot
///
/// Readers either poll `latest()` or `subscribe()` to be woken on every
/// publish. Nothing is kept beyond the current snapshot.
pub struct LatestSnapshot {
    tx: watch::Sender<Option<Arc<ProgressSnapshot>>>,
    published: AtomicU64,
}

impl LatestSnapshot {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            tx,
            published: AtomicU64::new(0),
        }
    }

    /// Most recently published snapshot, if any
    pub fn latest(&self) -> Option<Arc<ProgressSnapshot>> {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every publish
    pub fn subscribe(&self) -> SnapshotReceiver {
        self.tx.subscribe()
    }

    /// Number of snapshots published since creation
    pub fn published_count(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}

impl Default for LatestSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotSink for LatestSnapshot {
    async fn publish(&self, snapshot: ProgressSnapshot) -> Result<()> {
        let instant_ms = snapshot.instant_ms;
        // send_replace never fails, even with no subscribers
        self.tx.send_replace(Some(Arc::new(snapshot)));
        let count = self.published.fetch_add(1, Ordering::Relaxed) + 1;

        trace!(instant_ms = instant_ms, published = count, "Snapshot published");
        Ok(())
    }
}
