// Scheduler constants (no magic values)
use std::time::Duration;

/// Fastest allowed refresh (smooth animations)
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Slowest allowed refresh (second-level stepping)
pub const MAX_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Default refresh cadence (100ms)
pub const DEFAULT_TICK_INTERVAL: Duration = MIN_TICK_INTERVAL;

/// How long `SchedulerHandle::stop` waits for the loop to exit
pub const STOP_TIMEOUT: Duration = Duration::from_secs(5);
