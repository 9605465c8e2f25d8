// Progress Snapshot - one fully computed set of progress values for a single instant

use super::subday::SubDayProgress;
use super::window::PeriodWindow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hours in a day, as shown by the "hours remaining today" countdown
pub const HOURS_PER_DAY: f64 = 24.0;
pub const DAYS_PER_WEEK: f64 = 7.0;
/// Nominal quarter length used by the countdown (not the calendar length)
pub const WEEKS_PER_QUARTER: f64 = 13.0;
pub const QUARTERS_PER_YEAR: f64 = 4.0;
pub const YEARS_PER_CENTURY: f64 = 100.0;

/// Calendar/clock period tracked by a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
    Century,
}

impl PeriodKind {
    pub const ALL: [PeriodKind; 7] = [
        PeriodKind::Hour,
        PeriodKind::Day,
        PeriodKind::Week,
        PeriodKind::Month,
        PeriodKind::Quarter,
        PeriodKind::Year,
        PeriodKind::Century,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::Hour => "hour",
            PeriodKind::Day => "day",
            PeriodKind::Week => "week",
            PeriodKind::Month => "month",
            PeriodKind::Quarter => "quarter",
            PeriodKind::Year => "year",
            PeriodKind::Century => "century",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress through one period window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodProgress {
    pub kind: PeriodKind,
    pub window: PeriodWindow,
    /// In [0, 100] for every period except the century, which is only floored at 0
    pub percentage: f64,
    /// Position of the period in its parent (weekday 0-6, quarter 1-4, month 1-12, ...)
    pub ordinal: Option<i64>,
    pub label: String,
}

/// Local wall-clock time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
    /// 12-hour clock hour (1-12)
    pub hour12: u32,
    pub meridiem: String,
    /// e.g. "3:04:05 PM"
    pub label: String,
}

/// Local calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Monday = 0 .. Sunday = 6
    pub weekday: u32,
    /// e.g. "Monday, January 1, 2024"
    pub label: String,
}

/// Progress through the life-expectancy span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeProgress {
    pub birth_ms: i64,
    pub life_expectancy_years: f64,
    /// Unrounded age; negative if birth lies in the future
    pub age_years: f64,
    /// Unbounded: exceeds 100 past the expectancy, negative before birth
    pub percentage: f64,
    pub years_remaining: f64,
}

impl LifeProgress {
    /// Percentage clamped to [0, 100] for progress bars
    pub fn display_percentage(&self) -> f64 {
        clamp_for_display(self.percentage)
    }
}

/// "Time remaining" figures derived from the period percentages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    pub hours_remaining_today: f64,
    pub days_remaining_in_week: f64,
    pub weeks_remaining_in_quarter: f64,
    pub quarters_remaining_in_year: f64,
    /// Goes negative after the century window closes
    pub years_remaining_in_century: f64,
    pub years_remaining_in_life: f64,
}

impl Countdown {
    pub fn from_percentages(
        day: f64,
        week: f64,
        quarter: f64,
        year: f64,
        century: f64,
        life: &LifeProgress,
    ) -> Self {
        Self {
            hours_remaining_today: remaining(HOURS_PER_DAY, day),
            days_remaining_in_week: remaining(DAYS_PER_WEEK, week),
            weeks_remaining_in_quarter: remaining(WEEKS_PER_QUARTER, quarter),
            quarters_remaining_in_year: remaining(QUARTERS_PER_YEAR, year),
            years_remaining_in_century: remaining(YEARS_PER_CENTURY, century),
            years_remaining_in_life: life.years_remaining,
        }
    }
}

fn remaining(units: f64, percentage: f64) -> f64 {
    units - percentage / 100.0 * units
}

/// Clamp any percentage to [0, 100] for rendering
pub fn clamp_for_display(percentage: f64) -> f64 {
    percentage.clamp(0.0, 100.0)
}

/// Immutable snapshot, recomputed from scratch each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Absolute instant, epoch milliseconds (UTC)
    pub instant_ms: i64,
    pub utc_offset_seconds: i32,
    pub clock: ClockTime,
    pub date: CalendarDate,
    pub hour: PeriodProgress,
    pub day: PeriodProgress,
    pub week: PeriodProgress,
    pub month: PeriodProgress,
    pub quarter: PeriodProgress,
    pub year: PeriodProgress,
    pub century: PeriodProgress,
    pub sub_day: SubDayProgress,
    pub life: LifeProgress,
    pub countdown: Countdown,
}

impl ProgressSnapshot {
    pub fn period(&self, kind: PeriodKind) -> &PeriodProgress {
        match kind {
            PeriodKind::Hour => &self.hour,
            PeriodKind::Day => &self.day,
            PeriodKind::Week => &self.week,
            PeriodKind::Month => &self.month,
            PeriodKind::Quarter => &self.quarter,
            PeriodKind::Year => &self.year,
            PeriodKind::Century => &self.century,
        }
    }

    /// All calendar periods, shortest first
    pub fn periods(&self) -> impl Iterator<Item = &PeriodProgress> {
        PeriodKind::ALL.into_iter().map(move |kind| self.period(kind))
    }
}
