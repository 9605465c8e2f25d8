//! RPC Method Handlers
//!
//! Implements the logic behind each JSON-RPC method.

use crate::error::to_rpc_error;
use crate::types::{ComputeRequest, StatsResponse};
use chrono::{DateTime, Utc};
use jsonrpsee::types::ErrorObjectOwned;
use lifeclock_core::application::{compute_progress, LatestSnapshot};
use lifeclock_core::domain::{DomainError, ProgressSnapshot, TrackerSettings};
use lifeclock_core::error::AppError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    latest: Arc<LatestSnapshot>,
    settings: Arc<TrackerSettings>,
    tick_interval: Duration,
    start_time: Instant,
}

impl RpcHandler {
    pub fn new(
        latest: Arc<LatestSnapshot>,
        settings: Arc<TrackerSettings>,
        tick_interval: Duration,
    ) -> Self {
        Self {
            latest,
            settings,
            tick_interval,
            start_time: Instant::now(),
        }
    }

    /// progress.snapshot.v1
    pub async fn snapshot(&self) -> Result<ProgressSnapshot, ErrorObjectOwned> {
        self.latest
            .latest()
            .map(|snapshot| snapshot.as_ref().clone())
            .ok_or_else(|| {
                to_rpc_error(AppError::NotFound(
                    "No snapshot published yet".to_string(),
                ))
            })
    }

    /// progress.compute.v1
    pub async fn compute(
        &self,
        params: ComputeRequest,
    ) -> Result<ProgressSnapshot, ErrorObjectOwned> {
        let instant = resolve_instant(&params).map_err(to_rpc_error)?;
        debug!(instant = %instant, "Computing snapshot on request");
        Ok(compute_progress(instant, &self.settings))
    }

    /// admin.stats.v1
    pub async fn stats(&self) -> Result<StatsResponse, ErrorObjectOwned> {
        Ok(StatsResponse {
            version: lifeclock_core::VERSION.to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            snapshots_published: self.latest.published_count(),
            tick_interval_ms: self.tick_interval.as_millis() as u64,
            zone: self.settings.zone,
            layout: self.settings.layout,
            birth_ms: self.settings.birth_ms(),
            life_expectancy_years: self.settings.life_expectancy_years,
        })
    }
}

/// Turn the request's instant into a `DateTime<Utc>`
fn resolve_instant(params: &ComputeRequest) -> Result<DateTime<Utc>, AppError> {
    match (params.instant_ms, params.instant.as_deref()) {
        (Some(millis), None) => DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| AppError::Domain(DomainError::InstantOutOfRange(millis))),
        (None, Some(text)) => DateTime::parse_from_rfc3339(text)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|e| AppError::Validation(format!("invalid RFC 3339 instant '{}': {}", text, e))),
        (Some(_), Some(_)) => Err(AppError::Validation(
            "give either instant_ms or instant, not both".to_string(),
        )),
        (None, None) => Err(AppError::Validation(
            "missing instant_ms or instant".to_string(),
        )),
    }
}
