//! Time progress calculator
//!
//! Pure function of (instant, settings): derives every period window in the
//! reference zone and the progress fraction through it. No clock reads, no
//! shared state; two calls with the same inputs return identical snapshots.

use crate::domain::calendar::{
    self, CENTURY_END_YEAR, CENTURY_LABEL, CENTURY_ORDINAL, CENTURY_START_YEAR, MS_PER_DAY,
    MS_PER_HOUR, MS_PER_JULIAN_YEAR, MS_PER_WEEK,
};
use crate::domain::{
    CalendarDate, ClockTime, Countdown, LifeProgress, PeriodKind, PeriodProgress, PeriodWindow,
    ProgressSnapshot, ReferenceZone, SubDayProgress, TrackerSettings,
};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};

/// Compute the progress snapshot for `now`
///
/// # Arguments
/// * `now` - Absolute instant; interpreted in `settings.zone`
/// * `settings` - Birth instant, life expectancy, reference zone and sub-day layout
///
/// # Example
/// ```text
/// let snapshot = compute_progress(Utc::now(), &TrackerSettings::default());
/// println!("{:.2}% of the year gone", snapshot.year.percentage);
/// ```
pub fn compute_progress(now: DateTime<Utc>, settings: &TrackerSettings) -> ProgressSnapshot {
    let zone = settings.zone;
    let instant_ms = now.timestamp_millis();
    let local = zone.local(now);
    let today = local.date();

    let day_start_ms = zone.midnight_ms(today);
    let elapsed_day_ms = instant_ms - day_start_ms;

    let clock = clock_time(&local);
    let weekday = calendar::monday_first_index(local.weekday().num_days_from_sunday());
    let date = CalendarDate {
        year: today.year(),
        month: today.month(),
        day: today.day(),
        weekday,
        label: local.format("%A, %B %-d, %Y").to_string(),
    };

    let hour_start_ms = day_start_ms + clock.hour as i64 * MS_PER_HOUR;
    let hour = bounded(
        PeriodKind::Hour,
        PeriodWindow::new(hour_start_ms, hour_start_ms + MS_PER_HOUR),
        instant_ms,
        Some(clock.hour as i64),
        format!("{:02}:00", clock.hour),
    );

    let day = bounded(
        PeriodKind::Day,
        PeriodWindow::new(day_start_ms, day_start_ms + MS_PER_DAY),
        instant_ms,
        Some(date.day as i64),
        calendar::day_name(weekday).to_string(),
    );

    let week_start_ms = day_start_ms - weekday as i64 * MS_PER_DAY;
    let week = bounded(
        PeriodKind::Week,
        PeriodWindow::new(week_start_ms, week_start_ms + MS_PER_WEEK),
        instant_ms,
        Some(weekday as i64),
        calendar::day_name(weekday).to_string(),
    );

    let month_start = calendar::month_start(today);
    let month = bounded(
        PeriodKind::Month,
        date_window(
            zone,
            month_start,
            month_start.and_then(|d| calendar::add_months(d, 1)),
            instant_ms,
        ),
        instant_ms,
        Some(date.month as i64),
        calendar::month_name(date.month).to_string(),
    );

    let quarter_number = calendar::quarter_of(date.month);
    let quarter_start = calendar::quarter_start(today);
    let quarter = bounded(
        PeriodKind::Quarter,
        date_window(
            zone,
            quarter_start,
            quarter_start.and_then(|d| calendar::add_months(d, calendar::MONTHS_PER_QUARTER)),
            instant_ms,
        ),
        instant_ms,
        Some(quarter_number as i64),
        calendar::quarter_name(quarter_number).to_string(),
    );

    let year = bounded(
        PeriodKind::Year,
        date_window(
            zone,
            calendar::year_start(date.year),
            date.year.checked_add(1).and_then(calendar::year_start),
            instant_ms,
        ),
        instant_ms,
        Some(date.year as i64),
        date.year.to_string(),
    );

    // Lower bound clamped, upper bound deliberately left open
    let century_window = date_window(
        zone,
        calendar::year_start(CENTURY_START_YEAR),
        calendar::year_start(CENTURY_END_YEAR),
        instant_ms,
    );
    let century = PeriodProgress {
        kind: PeriodKind::Century,
        window: century_window,
        percentage: century_window.percentage_floored(instant_ms),
        ordinal: Some(CENTURY_ORDINAL as i64),
        label: CENTURY_LABEL.to_string(),
    };

    let sub_day = SubDayProgress::compute(settings.layout, day_start_ms, elapsed_day_ms);
    let life = life_progress(instant_ms, settings);
    let countdown = Countdown::from_percentages(
        day.percentage,
        week.percentage,
        quarter.percentage,
        year.percentage,
        century.percentage,
        &life,
    );

    ProgressSnapshot {
        instant_ms,
        utc_offset_seconds: zone.offset_seconds(),
        clock,
        date,
        hour,
        day,
        week,
        month,
        quarter,
        year,
        century,
        sub_day,
        life,
        countdown,
    }
}

/// Age and life percentage; neither is clamped
pub fn life_progress(instant_ms: i64, settings: &TrackerSettings) -> LifeProgress {
    let birth_ms = settings.birth_ms();
    let age_years = (instant_ms - birth_ms) as f64 / MS_PER_JULIAN_YEAR;
    let expectancy = settings.life_expectancy_years;

    let percentage = if expectancy > 0.0 {
        age_years / expectancy * 100.0
    } else {
        0.0
    };

    LifeProgress {
        birth_ms,
        life_expectancy_years: expectancy,
        age_years,
        percentage,
        years_remaining: expectancy - age_years,
    }
}

fn clock_time(local: &NaiveDateTime) -> ClockTime {
    let hour = local.hour();
    let (is_pm, hour12) = local.hour12();
    let meridiem = if is_pm { "PM" } else { "AM" };

    ClockTime {
        hour,
        minute: local.minute(),
        second: local.second(),
        // Leap-second nanos can exceed one second
        millisecond: (local.nanosecond() / 1_000_000).min(999),
        hour12,
        meridiem: meridiem.to_string(),
        label: format!(
            "{}:{:02}:{:02} {}",
            hour12,
            local.minute(),
            local.second(),
            meridiem
        ),
    }
}

fn bounded(
    kind: PeriodKind,
    window: PeriodWindow,
    instant_ms: i64,
    ordinal: Option<i64>,
    label: String,
) -> PeriodProgress {
    PeriodProgress {
        kind,
        window,
        percentage: window.percentage(instant_ms),
        ordinal,
        label,
    }
}

/// Window between two local midnights
///
/// Falls back to a zero-length window (0% progress) when a boundary date is
/// outside chrono's representable range.
fn date_window(
    zone: ReferenceZone,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    instant_ms: i64,
) -> PeriodWindow {
    match (start, end) {
        (Some(start), Some(end)) => PeriodWindow::new(zone.midnight_ms(start), zone.midnight_ms(end)),
        (Some(start), None) => PeriodWindow::empty(zone.midnight_ms(start)),
        _ => PeriodWindow::empty(instant_ms),
    }
}
