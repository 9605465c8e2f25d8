//! Progress Scheduler - recomputes the snapshot at a fixed cadence
//!
//! - Reads the wall clock through `TimeProvider`
//! - Runs the pure calculator
//! - Publishes the result to a `SnapshotSink`
//!
//! A missed or failed tick is never fatal: the next tick recomputes from the
//! current clock reading.

use crate::application::calculator::compute_progress;
use crate::application::constants::{MAX_TICK_INTERVAL, MIN_TICK_INTERVAL, STOP_TIMEOUT};
use crate::application::shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};
use crate::domain::{ProgressSnapshot, TrackerSettings};
use crate::error::{AppError, Result};
use crate::port::{SnapshotSink, TimeProvider};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Scheduler owning the tick loop
pub struct ProgressScheduler {
    time_provider: Arc<dyn TimeProvider>,
    settings: Arc<TrackerSettings>,
    sink: Arc<dyn SnapshotSink>,
    tick_interval: Duration,
}

impl ProgressScheduler {
    /// Create a new scheduler
    ///
    /// # Arguments
    /// * `time_provider` - Wall-clock source
    /// * `settings` - Calculator inputs (birth, expectancy, zone)
    /// * `sink` - Where each snapshot is published
    /// * `tick_interval` - Refresh cadence, 100ms..=1000ms
    pub fn new(
        time_provider: Arc<dyn TimeProvider>,
        settings: Arc<TrackerSettings>,
        sink: Arc<dyn SnapshotSink>,
        tick_interval: Duration,
    ) -> Result<Self> {
        if tick_interval < MIN_TICK_INTERVAL || tick_interval > MAX_TICK_INTERVAL {
            return Err(AppError::Config(format!(
                "tick interval {}ms outside {}..={}ms",
                tick_interval.as_millis(),
                MIN_TICK_INTERVAL.as_millis(),
                MAX_TICK_INTERVAL.as_millis()
            )));
        }

        Ok(Self {
            time_provider,
            settings,
            sink,
            tick_interval,
        })
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Compute and publish one snapshot
    pub async fn tick_once(&self) -> Result<ProgressSnapshot> {
        let now = self.time_provider.now();
        let snapshot = compute_progress(now, &self.settings);
        self.sink.publish(snapshot.clone()).await?;
        Ok(snapshot)
    }

    /// Run the tick loop until `shutdown` fires
    ///
    /// Should be spawned in tokio::spawn (see `start`)
    pub async fn run(&self, mut shutdown: ShutdownToken) {
        info!(
            tick_ms = self.tick_interval.as_millis() as u64,
            zone = %self.settings.zone,
            "Progress scheduler started"
        );

        let mut tick = interval(self.tick_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // A pending shutdown wins over a ready tick
                biased;

                _ = shutdown.wait() => break,
                _ = tick.tick() => {
                    match self.tick_once().await {
                        Ok(snapshot) => {
                            debug!(
                                instant_ms = snapshot.instant_ms,
                                day_pct = snapshot.day.percentage,
                                "Tick published"
                            );
                        }
                        Err(e) => {
                            warn!(error = %e, "Tick failed, retrying on next tick");
                        }
                    }
                }
            }
        }

        info!("Progress scheduler stopped");
    }

    /// Spawn the tick loop and hand back its lifecycle handle
    pub fn start(self) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = shutdown_channel();
        let join = tokio::spawn(async move {
            self.run(shutdown_rx).await;
        });

        SchedulerHandle {
            shutdown: shutdown_tx,
            join,
        }
    }
}

/// Handle to a running scheduler
pub struct SchedulerHandle {
    shutdown: ShutdownSender,
    join: JoinHandle<()>,
}

impl SchedulerHandle {
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Signal shutdown and wait for the loop to exit
    pub async fn stop(self) -> Result<()> {
        self.shutdown.shutdown();

        match tokio::time::timeout(STOP_TIMEOUT, self.join).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(join_err)) => Err(AppError::Internal(format!(
                "scheduler task failed: {}",
                join_err
            ))),
            Err(_) => Err(AppError::Internal(format!(
                "scheduler did not stop within {}s",
                STOP_TIMEOUT.as_secs()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::publisher::LatestSnapshot;
    use crate::port::snapshot_sink::mocks::{FailingSink, RecordingSink};
    use crate::port::time_provider::mocks::MockTimeProvider;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;
    use tokio::time::Instant;

    /// Sink whose first publish blocks for `stall`; records when each publish began
    struct StallingSink {
        stall: Duration,
        started: Mutex<Vec<Instant>>,
    }

    #[async_trait]
    impl SnapshotSink for StallingSink {
        async fn publish(&self, _snapshot: ProgressSnapshot) -> Result<()> {
            let first = {
                let mut started = self.started.lock().unwrap();
                started.push(Instant::now());
                started.len() == 1
            };
            if first {
                tokio::time::sleep(self.stall).await;
            }
            Ok(())
        }
    }

    fn clock() -> Arc<MockTimeProvider> {
        Arc::new(MockTimeProvider::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap(),
        ))
    }

    fn scheduler(sink: Arc<dyn SnapshotSink>, tick: Duration) -> Result<ProgressScheduler> {
        ProgressScheduler::new(clock(), Arc::new(TrackerSettings::default()), sink, tick)
    }

    #[test]
    fn test_rejects_interval_out_of_range() {
        let sink: Arc<dyn SnapshotSink> = Arc::new(RecordingSink::new());

        assert!(matches!(
            scheduler(sink.clone(), Duration::from_millis(0)),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            scheduler(sink.clone(), Duration::from_millis(99)),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            scheduler(sink.clone(), Duration::from_millis(1001)),
            Err(AppError::Config(_))
        ));
        assert!(scheduler(sink.clone(), Duration::from_millis(100)).is_ok());
        assert!(scheduler(sink, Duration::from_millis(1000)).is_ok());
    }

    #[tokio::test]
    async fn test_tick_once_publishes_clock_reading() {
        let sink = Arc::new(RecordingSink::new());
        let scheduler = scheduler(sink.clone(), Duration::from_millis(100)).unwrap();

        let snapshot = scheduler.tick_once().await.unwrap();

        // 06:00Z == 12:00 in Dhaka
        assert_eq!(snapshot.clock.hour, 12);
        assert_eq!(sink.count(), 1);
        assert_eq!(sink.received()[0], snapshot);
    }

    #[tokio::test]
    async fn test_tick_once_surfaces_publish_failure() {
        let scheduler = scheduler(Arc::new(FailingSink), Duration::from_millis(100)).unwrap();

        let result = scheduler.tick_once().await;
        assert!(matches!(result, Err(AppError::Publish(_))));
    }

    #[tokio::test]
    async fn test_start_and_stop_lifecycle() {
        let latest = Arc::new(LatestSnapshot::new());
        let scheduler = scheduler(latest.clone(), Duration::from_millis(100)).unwrap();

        let handle = scheduler.start();
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert!(!handle.is_finished());

        tokio_test::assert_ok!(handle.stop().await);

        // First tick fires immediately, then every 100ms
        let published = latest.published_count();
        assert!(published >= 2, "published {} snapshots", published);
        assert!(latest.latest().is_some());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(latest.published_count(), published);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missed_ticks_are_skipped_not_burst() {
        let sink = Arc::new(StallingSink {
            stall: Duration::from_millis(450),
            started: Mutex::new(Vec::new()),
        });
        let scheduler = scheduler(sink.clone(), Duration::from_millis(100)).unwrap();

        let base = Instant::now();
        let handle = scheduler.start();
        tokio::time::sleep(Duration::from_millis(820)).await;
        tokio_test::assert_ok!(handle.stop().await);

        let offsets: Vec<u128> = sink
            .started
            .lock()
            .unwrap()
            .iter()
            .map(|at| at.duration_since(base).as_millis())
            .collect();

        // The overdue tick fires once when the stall ends (450ms); the others
        // due inside the stall are dropped and the 100ms grid resumes at 500ms.
        assert_eq!(offsets, vec![0, 450, 500, 600, 700, 800]);
    }

    #[tokio::test]
    async fn test_run_exits_without_ticking_once_shut_down() {
        let sink = Arc::new(RecordingSink::new());
        let scheduler = scheduler(sink.clone(), Duration::from_millis(100)).unwrap();

        let (tx, token) = shutdown_channel();
        tx.shutdown();

        tokio::time::timeout(Duration::from_secs(1), scheduler.run(token))
            .await
            .expect("run should return once shutdown is signalled");
        assert_eq!(sink.count(), 0);
    }

    #[tokio::test]
    async fn test_failing_sink_does_not_stop_loop() {
        let scheduler = scheduler(Arc::new(FailingSink), Duration::from_millis(100)).unwrap();

        let handle = scheduler.start();
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(!handle.is_finished());

        tokio_test::assert_ok!(handle.stop().await);
    }
}
