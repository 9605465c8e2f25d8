//! Optional OpenTelemetry trace export
//!
//! Compiled in with the `telemetry` feature and switched on at runtime by
//! `OTEL_EXPORTER_OTLP_ENDPOINT`.

use anyhow::Result;
use tracing_subscriber::{Layer, Registry};

pub const DEFAULT_SERVICE_NAME: &str = "lifeclockd";

/// Layer stacked directly on the registry, below the filter and formatter
pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn endpoint() -> Option<String> {
    std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok()
}

/// Build the OpenTelemetry layer if it is enabled
///
/// # Environment Variables
///
/// - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP endpoint (e.g., http://localhost:4317)
/// - `OTEL_SERVICE_NAME`: Service name (default: lifeclockd)
///
/// # Example
///
/// ```text
/// OTEL_EXPORTER_OTLP_ENDPOINT=http://localhost:4317 \
/// OTEL_SERVICE_NAME=lifeclock-dev \
///     ./lifeclockd
/// ```
pub fn layer() -> Result<Option<BoxedLayer>> {
    let Some(endpoint) = endpoint() else {
        return Ok(None);
    };

    #[cfg(feature = "telemetry")]
    {
        otel_layer(&endpoint).map(Some)
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = endpoint;
        Ok(None)
    }
}

/// Report the telemetry state once the subscriber is installed
pub fn log_status(enabled: bool) {
    match (endpoint(), enabled) {
        (None, _) => {
            tracing::debug!("OpenTelemetry not configured (OTEL_EXPORTER_OTLP_ENDPOINT not set)");
        }
        (Some(endpoint), true) => {
            tracing::info!(endpoint = %endpoint, "OpenTelemetry export enabled");
        }
        (Some(_), false) => {
            tracing::warn!("OpenTelemetry endpoint set but feature 'telemetry' not enabled");
            tracing::warn!("Rebuild with: cargo build --features telemetry");
        }
    }
}

/// Flush pending spans before exit
pub fn shutdown() {
    #[cfg(feature = "telemetry")]
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(feature = "telemetry")]
fn otel_layer(endpoint: &str) -> Result<BoxedLayer> {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::{runtime, trace::TracerProvider, Resource};

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_resource(Resource::new(vec![KeyValue::new(
            "service.name",
            service_name.clone(),
        )]))
        .build();

    let tracer = provider.tracer(service_name);
    opentelemetry::global::set_tracer_provider(provider);

    Ok(Box::new(
        tracing_opentelemetry::layer::<Registry>().with_tracer(tracer),
    ))
}
