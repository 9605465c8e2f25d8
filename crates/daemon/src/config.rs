//! Daemon configuration, read from `LIFECLOCK_*` environment variables
//!
//! Every variable has a default; a present but malformed value is a startup
//! error rather than a silent fallback.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use lifeclock_api_rpc::server::{RpcServerConfig, DEFAULT_RPC_PORT};
use lifeclock_core::application::constants::DEFAULT_TICK_INTERVAL;
use lifeclock_core::domain::settings::{DEFAULT_BIRTH_DATE, DEFAULT_LIFE_EXPECTANCY_YEARS};
use lifeclock_core::domain::{ReferenceZone, SubDayLayout, TrackerSettings};
use std::time::Duration;

pub const ENV_BIRTH_DATE: &str = "LIFECLOCK_BIRTH_DATE";
pub const ENV_LIFE_EXPECTANCY: &str = "LIFECLOCK_LIFE_EXPECTANCY";
pub const ENV_UTC_OFFSET: &str = "LIFECLOCK_UTC_OFFSET";
pub const ENV_SUBDAY_LAYOUT: &str = "LIFECLOCK_SUBDAY_LAYOUT";
pub const ENV_TICK_MS: &str = "LIFECLOCK_TICK_MS";
pub const ENV_RPC_HOST: &str = "LIFECLOCK_RPC_HOST";
pub const ENV_RPC_PORT: &str = "LIFECLOCK_RPC_PORT";
pub const ENV_LOG_FORMAT: &str = "LIFECLOCK_LOG_FORMAT";

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Development: human readable, coloured
    Pretty,
    /// Production: one JSON object per line
    Json,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub settings: TrackerSettings,
    pub tick_interval: Duration,
    pub rpc: RpcServerConfig,
    pub log_format: LogFormat,
}

impl DaemonConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (used by tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let zone = match lookup(ENV_UTC_OFFSET) {
            Some(raw) => raw
                .parse::<ReferenceZone>()
                .with_context(|| format!("{} is not a valid UTC offset", ENV_UTC_OFFSET))?,
            None => ReferenceZone::dhaka(),
        };

        let birth_date = match lookup(ENV_BIRTH_DATE) {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .with_context(|| format!("{} must be YYYY-MM-DD, got {:?}", ENV_BIRTH_DATE, raw))?,
            None => {
                let (year, month, day) = DEFAULT_BIRTH_DATE;
                NaiveDate::from_ymd_opt(year, month, day)
                    .ok_or_else(|| anyhow!("default birth date is not a calendar date"))?
            }
        };

        let life_expectancy = match lookup(ENV_LIFE_EXPECTANCY) {
            Some(raw) => raw.trim().parse::<f64>().with_context(|| {
                format!("{} must be a number of years, got {:?}", ENV_LIFE_EXPECTANCY, raw)
            })?,
            None => DEFAULT_LIFE_EXPECTANCY_YEARS,
        };

        let layout = match lookup(ENV_SUBDAY_LAYOUT) {
            Some(raw) => raw
                .parse::<SubDayLayout>()
                .map_err(|e| anyhow!("{}: {}", ENV_SUBDAY_LAYOUT, e))?,
            None => SubDayLayout::default(),
        };

        let settings = TrackerSettings::from_birth_date(birth_date, life_expectancy, zone, layout)
            .context("invalid tracker settings")?;

        let tick_interval = match lookup(ENV_TICK_MS) {
            Some(raw) => Duration::from_millis(raw.trim().parse::<u64>().with_context(|| {
                format!("{} must be milliseconds, got {:?}", ENV_TICK_MS, raw)
            })?),
            None => DEFAULT_TICK_INTERVAL,
        };

        let defaults = RpcServerConfig::default();
        let rpc = RpcServerConfig {
            host: lookup(ENV_RPC_HOST).unwrap_or(defaults.host),
            port: match lookup(ENV_RPC_PORT) {
                Some(raw) => raw
                    .trim()
                    .parse::<u16>()
                    .with_context(|| format!("{} must be a port number, got {:?}", ENV_RPC_PORT, raw))?,
                None => DEFAULT_RPC_PORT,
            },
        };

        let log_format = match lookup(ENV_LOG_FORMAT).as_deref().map(str::trim) {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(anyhow!(
                    "{} must be 'pretty' or 'json', got {:?}",
                    ENV_LOG_FORMAT,
                    other
                ))
            }
        };

        Ok(Self {
            settings,
            tick_interval,
            rpc,
            log_format,
        })
    }
}
