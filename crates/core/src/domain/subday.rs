// Sub-day partitions: 3-hour blocks split into phases and sessions

use super::calendar::{MS_PER_HOUR, MS_PER_MINUTE};
use super::window::PeriodWindow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const BLOCK_MS: i64 = 3 * MS_PER_HOUR;
pub const BLOCKS_PER_DAY: u32 = 8;

pub const PHASE_MS: i64 = 90 * MS_PER_MINUTE;
pub const PHASES_PER_BLOCK: u32 = 2;

pub const FOCUS_SESSION_MS: i64 = 45 * MS_PER_MINUTE;
pub const FOCUS_SESSIONS_PER_PHASE: u32 = 2;

pub const HOURLY_SESSION_MS: i64 = MS_PER_HOUR;
pub const HOURLY_SESSIONS_PER_BLOCK: u32 = 3;

/// How a 3-hour block is subdivided
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubDayLayout {
    /// Block -> two 90-minute phases -> two 45-minute sessions each
    #[default]
    Phased,
    /// Block -> three 1-hour sessions
    Hourly,
}

impl fmt::Display for SubDayLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubDayLayout::Phased => write!(f, "phased"),
            SubDayLayout::Hourly => write!(f, "hourly"),
        }
    }
}

impl FromStr for SubDayLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phased" => Ok(SubDayLayout::Phased),
            "hourly" => Ok(SubDayLayout::Hourly),
            other => Err(format!("unknown sub-day layout '{}'", other)),
        }
    }
}

/// Position inside one fixed-size slice of a parent window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    /// 1-based slice index
    pub index: u32,
    /// Number of slices in the parent
    pub count: u32,
    pub window: PeriodWindow,
    /// Milliseconds elapsed since the slice started
    pub offset_ms: i64,
    pub percentage: f64,
}

impl Partition {
    /// Locate `elapsed_ms` (measured from `parent_start_ms`) among `count` slices of `slice_ms`
    ///
    /// Elapsed time past the last slice stays in the last slice.
    pub fn locate(parent_start_ms: i64, elapsed_ms: i64, slice_ms: i64, count: u32) -> Self {
        let last = count.saturating_sub(1) as i64;
        let index0 = if slice_ms > 0 {
            (elapsed_ms.max(0) / slice_ms).min(last)
        } else {
            0
        };

        let start_ms = parent_start_ms + index0 * slice_ms;
        let window = PeriodWindow::new(start_ms, start_ms + slice_ms);
        let instant_ms = parent_start_ms + elapsed_ms;

        Self {
            index: index0 as u32 + 1,
            count,
            window,
            offset_ms: elapsed_ms - index0 * slice_ms,
            percentage: window.percentage(instant_ms),
        }
    }
}

/// Sub-day breakdown of one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubDayProgress {
    pub layout: SubDayLayout,
    pub block: Partition,
    /// Present only for the phased layout
    pub phase: Option<Partition>,
    pub session: Partition,
}

impl SubDayProgress {
    /// Break down `elapsed_day_ms` (time since local midnight at `day_start_ms`)
    pub fn compute(layout: SubDayLayout, day_start_ms: i64, elapsed_day_ms: i64) -> Self {
        let block = Partition::locate(day_start_ms, elapsed_day_ms, BLOCK_MS, BLOCKS_PER_DAY);

        match layout {
            SubDayLayout::Phased => {
                let phase = Partition::locate(
                    block.window.start_ms,
                    block.offset_ms,
                    PHASE_MS,
                    PHASES_PER_BLOCK,
                );
                let session = Partition::locate(
                    phase.window.start_ms,
                    phase.offset_ms,
                    FOCUS_SESSION_MS,
                    FOCUS_SESSIONS_PER_PHASE,
                );
                Self {
                    layout,
                    block,
                    phase: Some(phase),
                    session,
                }
            }
            SubDayLayout::Hourly => {
                let session = Partition::locate(
                    block.window.start_ms,
                    block.offset_ms,
                    HOURLY_SESSION_MS,
                    HOURLY_SESSIONS_PER_BLOCK,
                );
                Self {
                    layout,
                    block,
                    phase: None,
                    session,
                }
            }
        }
    }
}
