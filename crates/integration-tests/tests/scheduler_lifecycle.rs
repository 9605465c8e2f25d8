//! Scheduler Lifecycle Tests
//!
//! Scheduler + LatestSnapshot wired the way the daemon wires them.

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use lifeclock_core::application::{LatestSnapshot, ProgressScheduler};
use lifeclock_core::domain::TrackerSettings;
use lifeclock_core::port::time_provider::mocks::MockTimeProvider;
use lifeclock_core::port::{SnapshotSink, SystemTimeProvider, TimeProvider};
use lifeclock_core::AppError;
use std::sync::Arc;
use std::time::Duration;

fn start(
    time_provider: Arc<dyn TimeProvider>,
    tick: Duration,
) -> (Arc<LatestSnapshot>, lifeclock_core::application::SchedulerHandle) {
    let latest = Arc::new(LatestSnapshot::new());
    let sink: Arc<dyn SnapshotSink> = latest.clone();
    let scheduler = ProgressScheduler::new(
        time_provider,
        Arc::new(TrackerSettings::default()),
        sink,
        tick,
    )
    .unwrap();

    (latest, scheduler.start())
}

#[tokio::test]
async fn test_subscribers_see_fresh_snapshots() {
    let (latest, handle) = start(Arc::new(SystemTimeProvider), Duration::from_millis(100));
    let mut rx = latest.subscribe();

    let mut seen = Vec::new();
    for _ in 0..3 {
        tokio::time::timeout(Duration::from_secs(2), rx.changed())
            .await
            .expect("no snapshot within 2s")
            .unwrap();
        let snapshot = rx.borrow_and_update().clone().unwrap();
        seen.push(snapshot.instant_ms);
    }

    tokio_test::assert_ok!(handle.stop().await);

    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{:?}", seen);
    assert!(latest.published_count() >= 3);
}

#[tokio::test]
async fn test_snapshots_follow_the_clock() {
    // Each clock read moves 45 minutes forward
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let clock = Arc::new(MockTimeProvider::stepping(
        base,
        ChronoDuration::minutes(45),
    ));

    let (latest, handle) = start(clock, Duration::from_millis(100));
    tokio::time::sleep(Duration::from_millis(450)).await;
    tokio_test::assert_ok!(handle.stop().await);

    let count = latest.published_count() as i64;
    let snapshot = latest.latest().unwrap();
    assert!(count >= 2);
    assert_eq!(
        snapshot.instant_ms,
        (base + ChronoDuration::minutes(45 * (count - 1))).timestamp_millis()
    );
}

#[tokio::test]
async fn test_stop_is_prompt_at_slowest_tick() {
    let (_latest, handle) = start(Arc::new(SystemTimeProvider), Duration::from_millis(1000));
    tokio::time::sleep(Duration::from_millis(50)).await;

    let started = std::time::Instant::now();
    tokio_test::assert_ok!(handle.stop().await);

    // Shutdown interrupts the pending tick instead of waiting it out
    assert!(started.elapsed() < Duration::from_millis(500));
}

#[test]
fn test_out_of_range_interval_is_config_error() {
    let result = ProgressScheduler::new(
        Arc::new(SystemTimeProvider),
        Arc::new(TrackerSettings::default()),
        Arc::new(LatestSnapshot::new()),
        Duration::from_millis(5000),
    );

    assert!(matches!(result, Err(AppError::Config(_))));
}
