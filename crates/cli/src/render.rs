// Text rendering of progress snapshots

use lifeclock_core::domain::snapshot::clamp_for_display;
use lifeclock_core::domain::{Partition, ProgressSnapshot, SubDayProgress};
use tabled::Tabled;

pub const BAR_WIDTH: usize = 30;

#[derive(Debug, Tabled)]
pub struct PeriodRow {
    #[tabled(rename = "Period")]
    pub period: String,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Progress")]
    pub progress: String,
    #[tabled(rename = "")]
    pub bar: String,
}

#[derive(Debug, Tabled)]
pub struct CountdownRow {
    #[tabled(rename = "Remaining")]
    pub what: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// Fixed-width bar; the percentage is clamped to [0, 100] first
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((clamp_for_display(percentage) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn format_percentage(percentage: f64) -> String {
    format!("{:.2}%", percentage)
}

/// `+06:00` style offset
pub fn format_offset(offset_seconds: i32) -> String {
    let sign = if offset_seconds < 0 { '-' } else { '+' };
    let abs = offset_seconds.unsigned_abs();
    format!("{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

pub fn header(snapshot: &ProgressSnapshot) -> String {
    format!(
        "{}  {}  (UTC{})",
        snapshot.clock.label,
        snapshot.date.label,
        format_offset(snapshot.utc_offset_seconds)
    )
}

pub fn period_rows(snapshot: &ProgressSnapshot) -> Vec<PeriodRow> {
    snapshot
        .periods()
        .map(|period| PeriodRow {
            period: period.kind.to_string(),
            label: period.label.clone(),
            progress: format_percentage(period.percentage),
            bar: progress_bar(period.percentage, BAR_WIDTH),
        })
        .collect()
}

fn partition_line(name: &str, partition: &Partition) -> String {
    format!(
        "{} {}/{}  {}",
        name,
        partition.index,
        partition.count,
        format_percentage(partition.percentage)
    )
}

pub fn subday_lines(sub_day: &SubDayProgress) -> Vec<String> {
    let mut lines = vec![partition_line("Block", &sub_day.block)];
    if let Some(phase) = &sub_day.phase {
        lines.push(partition_line("Phase", phase));
    }
    lines.push(partition_line("Session", &sub_day.session));
    lines
}

/// Life line with the raw (possibly >100) percentage and a clamped bar
pub fn life_line(snapshot: &ProgressSnapshot) -> String {
    let life = &snapshot.life;
    format!(
        "Age {:.2} of {} years  {}  {}",
        life.age_years,
        life.life_expectancy_years,
        format_percentage(life.percentage),
        progress_bar(life.display_percentage(), BAR_WIDTH)
    )
}

pub fn countdown_rows(snapshot: &ProgressSnapshot) -> Vec<CountdownRow> {
    let c = &snapshot.countdown;
    vec![
        row("Hours today", c.hours_remaining_today),
        row("Days this week", c.days_remaining_in_week),
        row("Weeks this quarter", c.weeks_remaining_in_quarter),
        row("Quarters this year", c.quarters_remaining_in_year),
        row("Years this century", c.years_remaining_in_century),
        row("Years of life", c.years_remaining_in_life),
    ]
}

fn row(what: &str, value: f64) -> CountdownRow {
    CountdownRow {
        what: what.to_string(),
        value: format!("{:.2}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use lifeclock_core::compute_progress;
    use lifeclock_core::domain::TrackerSettings;

    fn snapshot() -> ProgressSnapshot {
        // 2024-01-01 12:00 in Dhaka
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();
        compute_progress(now, &TrackerSettings::default())
    }

    #[test]
    fn test_progress_bar_clamps() {
        assert_eq!(progress_bar(0.0, 4), "░░░░");
        assert_eq!(progress_bar(50.0, 4), "██░░");
        assert_eq!(progress_bar(100.0, 4), "████");
        assert_eq!(progress_bar(250.0, 4), "████");
        assert_eq!(progress_bar(-5.0, 4), "░░░░");
    }

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(6 * 3600), "+06:00");
        assert_eq!(format_offset(-(5 * 3600 + 30 * 60)), "-05:30");
        assert_eq!(format_offset(0), "+00:00");
    }

    #[test]
    fn test_period_rows_in_order_with_two_decimals() {
        let rows = period_rows(&snapshot());

        let names: Vec<&str> = rows.iter().map(|r| r.period.as_str()).collect();
        assert_eq!(
            names,
            vec!["hour", "day", "week", "month", "quarter", "year", "century"]
        );
        assert_eq!(rows[0].progress, "0.00%");
        assert_eq!(rows[1].progress, "50.00%");
    }

    #[test]
    fn test_header_and_subday() {
        let snapshot = snapshot();

        assert_eq!(
            header(&snapshot),
            "12:00:00 PM  Monday, January 1, 2024  (UTC+06:00)"
        );
        // 12:00 is the start of block 5, phase 1, session 1
        assert_eq!(
            subday_lines(&snapshot.sub_day),
            vec!["Block 5/8  0.00%", "Phase 1/2  0.00%", "Session 1/2  0.00%"]
        );
    }

    #[test]
    fn test_countdown_rows() {
        let rows = countdown_rows(&snapshot());

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].value, "12.00");
        // Monday noon: half a day of the week gone
        assert_eq!(rows[1].value, "6.50");
    }
}
