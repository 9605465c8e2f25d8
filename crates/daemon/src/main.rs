//! Lifeclock Daemon - Main Entry Point
//! Wires clock -> scheduler -> latest snapshot -> JSON-RPC server

mod config;
mod telemetry;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{DaemonConfig, LogFormat};
use lifeclock_api_rpc::{RpcHandler, RpcServer};
use lifeclock_core::application::{LatestSnapshot, ProgressScheduler};
use lifeclock_core::port::{SnapshotSink, SystemTimeProvider, TimeProvider};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_LOG_FILTER: &str = "lifeclock=info";

fn init_logging(format: LogFormat) -> Result<bool> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .context("Failed to create env filter")?;

    let otel = match telemetry::layer() {
        Ok(layer) => layer,
        Err(e) => {
            eprintln!("Failed to initialize OpenTelemetry (continuing without it): {e:#}");
            None
        }
    };
    let otel_enabled = otel.is_some();

    let registry = tracing_subscriber::registry().with(otel).with(env_filter);

    match format {
        LogFormat::Json => {
            // Production: JSON structured logging
            registry.with(fmt::layer().json()).init();
        }
        LogFormat::Pretty => {
            // Development: Pretty formatting with colors
            registry.with(fmt::layer().pretty()).init();
        }
    }

    Ok(otel_enabled)
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration (needed before logging for the format)
    let config = DaemonConfig::from_env().context("Invalid configuration")?;

    // 2. Initialize logging
    let otel_enabled = init_logging(config.log_format)?;
    telemetry::log_status(otel_enabled);

    info!("Lifeclock daemon v{} starting...", VERSION);
    info!(
        zone = %config.settings.zone,
        birth = %config.settings.birth,
        life_expectancy_years = config.settings.life_expectancy_years,
        layout = %config.settings.layout,
        tick_ms = config.tick_interval.as_millis() as u64,
        "Configuration loaded"
    );

    // 3. Setup dependencies (DI wiring)
    let settings = Arc::new(config.settings);
    let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);
    let latest = Arc::new(LatestSnapshot::new());
    let sink: Arc<dyn SnapshotSink> = latest.clone();

    // 4. Start the progress scheduler
    let scheduler = ProgressScheduler::new(
        time_provider,
        settings.clone(),
        sink,
        config.tick_interval,
    )
    .context("Scheduler configuration rejected")?;
    let scheduler_handle = scheduler.start();

    // 5. Start JSON-RPC server
    let handler = RpcHandler::new(latest, settings, config.tick_interval);
    let (rpc_handle, rpc_addr) = RpcServer::new(config.rpc, handler)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!(addr = %rpc_addr, "System ready");
    info!("Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown
    if let Err(e) = scheduler_handle.stop().await {
        tracing::error!(error = %e, "Scheduler did not stop cleanly");
    }
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;

    telemetry::shutdown();
    info!("Shutdown complete.");

    Ok(())
}
