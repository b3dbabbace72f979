mod config;
mod shutdown;

pub use config::TelemetryConfig;
pub use shutdown::TelemetryGuard;

use crate::error::{PerfScriptError, Result};
use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::{WithExportConfig, WithHttpConfig};
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_FILTER: &str = "perfscript=info,tower_http=debug";

pub fn init_telemetry() -> Result<TelemetryGuard> {
    let config = TelemetryConfig::from_env();

    if config.enabled {
        // Try to initialize with OpenTelemetry, but fall back to stdout-only if it fails
        match init_with_otel(&config) {
            Ok(provider) => return Ok(TelemetryGuard::new(Some(provider))),
            Err(e) => eprintln!(
                "Failed to initialize OpenTelemetry: {}. Falling back to stdout-only logging.",
                e
            ),
        }
    }

    init_stdout_only(&config);
    Ok(TelemetryGuard::default())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn fmt_layer<S>(json: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    if json { layer.json().boxed() } else { layer.boxed() }
}

fn init_with_otel(config: &TelemetryConfig) -> Result<SdkTracerProvider> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .map_err(|e| PerfScriptError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_http_client(client)
        .with_endpoint(&config.endpoint)
        .with_protocol(opentelemetry_otlp::Protocol::HttpBinary)
        .with_timeout(std::time::Duration::from_secs(5))
        .with_headers(config.headers.clone())
        .build()
        .map_err(|e| PerfScriptError::ConfigError(format!("Failed to build OTLP exporter: {}", e)))?;

    let resource = opentelemetry_sdk::Resource::builder_empty()
        .with_service_name(config.service_name.clone())
        .with_attributes([KeyValue::new("service.version", env!("CARGO_PKG_VERSION"))])
        .build();

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build();

    // Get tracer before setting as global provider
    let tracer = provider.tracer("perfscript");
    opentelemetry::global::set_tracer_provider(provider.clone());

    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer(config.json_logs))
        .with(otel_layer)
        .try_init()
        .map_err(|e| PerfScriptError::ConfigError(format!("Failed to install subscriber: {}", e)))?;

    tracing::info!(endpoint = %config.endpoint, "OpenTelemetry initialized");
    Ok(provider)
}

fn init_stdout_only(config: &TelemetryConfig) {
    let initialized = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer(config.json_logs))
        .try_init();

    if initialized.is_ok() {
        tracing::info!("Tracing initialized (stdout only, OpenTelemetry disabled)");
    }
}
