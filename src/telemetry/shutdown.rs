use opentelemetry_sdk::trace::SdkTracerProvider;

/// Flushes and shuts down the tracer provider when dropped
#[derive(Default)]
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    pub fn new(provider: Option<SdkTracerProvider>) -> Self {
        Self { provider }
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        let Some(provider) = self.provider.take() else {
            return;
        };

        tracing::info!("Shutting down telemetry...");
        if let Err(e) = provider.shutdown() {
            eprintln!("Failed to shut down tracer provider: {}", e);
        }
    }
}
