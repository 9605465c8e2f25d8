//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results.

use lifeclock_core::domain::{ReferenceZone, SubDayLayout};
use serde::{Deserialize, Serialize};

/// progress.compute.v1 - Snapshot for an arbitrary instant
///
/// Exactly one of `instant_ms` or `instant` (RFC 3339) must be given.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ComputeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instant_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instant: Option<String>,
}

/// admin.stats.v1 - Daemon statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub version: String,
    pub uptime_seconds: u64,
    pub snapshots_published: u64,
    pub tick_interval_ms: u64,
    pub zone: ReferenceZone,
    pub layout: SubDayLayout,
    pub birth_ms: i64,
    pub life_expectancy_years: f64,
}
