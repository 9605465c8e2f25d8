// Calendar constants and boundary helpers (no magic values)

use chrono::{Datelike, Months, NaiveDate};

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
pub const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;

/// Average year length used for age (accounts for leap years)
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;
pub const MS_PER_JULIAN_YEAR: f64 = DAYS_PER_JULIAN_YEAR * MS_PER_DAY as f64;

pub const MONTHS_PER_QUARTER: u32 = 3;

/// Fixed century window: 2001-01-01 (inclusive) to 2101-01-01 (exclusive)
pub const CENTURY_START_YEAR: i32 = 2001;
pub const CENTURY_END_YEAR: i32 = 2101;
pub const CENTURY_ORDINAL: u32 = 21;
pub const CENTURY_LABEL: &str = "21st Century";

/// Monday-first day names
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const QUARTER_NAMES: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];

/// Remap a Sunday-first weekday (Sunday = 0) to Monday-first (Monday = 0, Sunday = 6)
pub fn monday_first_index(sunday_first: u32) -> u32 {
    (sunday_first + 6) % 7
}

pub fn day_name(monday_first: u32) -> &'static str {
    DAY_NAMES[(monday_first % 7) as usize]
}

/// Name of a 1-based month
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}

/// Quarter (1-4) containing a 1-based month
pub fn quarter_of(month: u32) -> u32 {
    (month.clamp(1, 12) - 1) / MONTHS_PER_QUARTER + 1
}

pub fn quarter_name(quarter: u32) -> &'static str {
    QUARTER_NAMES[(quarter.clamp(1, 4) - 1) as usize]
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)
}

/// First day of the quarter containing `date`
pub fn quarter_start(date: NaiveDate) -> Option<NaiveDate> {
    let first_month = (quarter_of(date.month()) - 1) * MONTHS_PER_QUARTER + 1;
    NaiveDate::from_ymd_opt(date.year(), first_month, 1)
}

pub fn year_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Calendar arithmetic for exclusive period ends (no hardcoded month lengths)
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}
