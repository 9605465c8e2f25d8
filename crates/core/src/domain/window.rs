// Period Window - a half-open [start, end) range in epoch milliseconds

use serde::{Deserialize, Serialize};

/// Time range used as the denominator of a progress percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl PeriodWindow {
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    /// Zero-length window at `at_ms` (always reports 0% progress)
    pub fn empty(at_ms: i64) -> Self {
        Self::new(at_ms, at_ms)
    }

    pub fn length_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// Raw elapsed fraction, unclamped
    ///
    /// Returns 0.0 for zero-length or inverted windows instead of dividing by zero.
    pub fn fraction(&self, instant_ms: i64) -> f64 {
        let length = self.length_ms();
        if length <= 0 {
            return 0.0;
        }
        (instant_ms - self.start_ms) as f64 / length as f64
    }

    /// Progress percentage clamped to [0, 100]
    pub fn percentage(&self, instant_ms: i64) -> f64 {
        self.fraction(instant_ms).clamp(0.0, 1.0) * 100.0
    }

    /// Progress percentage floored at 0 but allowed to exceed 100
    pub fn percentage_floored(&self, instant_ms: i64) -> f64 {
        (self.fraction(instant_ms) * 100.0).max(0.0)
    }
}
