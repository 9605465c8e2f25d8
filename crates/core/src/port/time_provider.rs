// Time Provider Port (for testability)

use chrono::{DateTime, Utc};

/// Wall-clock source (allows a fixed or stepping clock in tests)
pub trait TimeProvider: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Current time in milliseconds since epoch
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// System time provider (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use chrono::Duration;
    use std::sync::{Arc, Mutex};

    /// Clock that only moves when told to
    #[derive(Clone)]
    pub struct MockTimeProvider {
        current: Arc<Mutex<DateTime<Utc>>>,
        step: Duration,
    }

    impl MockTimeProvider {
        pub fn new(at: DateTime<Utc>) -> Self {
            Self {
                current: Arc::new(Mutex::new(at)),
                step: Duration::zero(),
            }
        }

        /// Clock that advances by `step` after every read
        pub fn stepping(at: DateTime<Utc>, step: Duration) -> Self {
            Self {
                current: Arc::new(Mutex::new(at)),
                step,
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut current = self.current.lock().unwrap();
            *current += by;
        }
    }

    impl TimeProvider for MockTimeProvider {
        fn now(&self) -> DateTime<Utc> {
            let mut current = self.current.lock().unwrap();
            let now = *current;
            *current += self.step;
            now
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::MockTimeProvider;
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_mock_clock_is_fixed_until_moved() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = MockTimeProvider::new(at);

        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), at);

        clock.advance(Duration::milliseconds(250));
        assert_eq!(clock.now_millis(), at.timestamp_millis() + 250);
    }

    #[test]
    fn test_stepping_clock_advances_per_read() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = MockTimeProvider::stepping(at, Duration::seconds(1));

        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), at + Duration::seconds(1));
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        let floor = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert!(SystemTimeProvider.now() > floor);
    }
}
