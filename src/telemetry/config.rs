use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub headers: HashMap<String, String>,
    pub service_name: String,
    /// `LOG_FORMAT=json` switches stdout logs to one JSON object per line
    pub json_logs: bool,
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup("OTEL_ENABLED")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(false);

        let endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT")
            .unwrap_or_else(|| "http://localhost:4318/v1/traces".to_string());

        let service_name = lookup("OTEL_SERVICE_NAME").unwrap_or_else(|| "perfscript".to_string());

        let headers = lookup("OTEL_EXPORTER_OTLP_HEADERS")
            .map(|raw| parse_headers(&raw))
            .unwrap_or_default();

        let json_logs = lookup("LOG_FORMAT").is_some_and(|v| v.trim().eq_ignore_ascii_case("json"));

        Self {
            enabled,
            endpoint,
            headers,
            service_name,
            json_logs,
        }
    }
}

/// "key=value,key2=value2"
fn parse_headers(raw: &str) -> HashMap<String, String> {
    raw.split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}
