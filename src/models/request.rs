use indexmap::IndexMap;
use serde::Deserialize;

use super::scenario::{ApiRef, ScenarioSpec, TimeValue};

/// Request-level settings shared by every scenario of one generation call
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    #[serde(default)]
    pub test_name: Option<String>,

    /// metric name -> condition (e.g. "http_req_duration" -> "p(95)<2000")
    #[serde(default)]
    pub thresholds: IndexMap<String, String>,

    #[serde(default)]
    pub html_report_file_path: Option<String>,

    #[serde(default)]
    pub html_report_name: Option<String>,

    /// "k6" or "jmeter"
    #[serde(default)]
    pub tool: Option<String>,

    /// k6 target language; overrides K6_LANGUAGE
    #[serde(default)]
    pub language: Option<String>,
}

/// Body of `POST /api/scenarios/`
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioRequest {
    pub config: RunConfig,
    pub scenarios: Vec<ScenarioSpec>,
}

/// Body of `POST /api/scenarios/load`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadRequest {
    pub common_fields: CommonFields,
    #[serde(default)]
    pub scenarios: Vec<LoadScenario>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonFields {
    #[serde(flatten)]
    pub run: RunConfig,

    #[serde(default)]
    pub swagger_file: Option<String>,

    /// Endpoints in the order the iteration should call them
    #[serde(default)]
    pub apis: Vec<ApiRef>,

    #[serde(default)]
    pub duration: Option<DurationSpec>,

    /// Executor applied to every load stage (k6 only)
    #[serde(default)]
    pub executor: Option<String>,

    #[serde(default)]
    pub iteration_definition: Option<String>,

    #[serde(default)]
    pub user_instructions: Option<String>,
}

impl CommonFields {
    /// Flow description handed to the model
    pub fn flow_description(&self) -> String {
        self.iteration_definition
            .as_deref()
            .or(self.user_instructions.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}

/// One staggered group of virtual users in a load-mode request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadScenario {
    pub name: String,

    /// k6 sends `virtualUser`, JMeter payloads send `threads`
    #[serde(default, alias = "threads")]
    pub virtual_user: Option<u64>,

    #[serde(default)]
    pub start_time: Option<String>,

    #[serde(default)]
    pub ramp_up: Option<TimeValue>,

    #[serde(default)]
    pub duration: Option<TimeValue>,

    #[serde(default)]
    pub delay: Option<TimeValue>,
}

/// Test duration, either split into parts or as a literal k6 duration string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DurationSpec {
    Parts {
        #[serde(default)]
        hours: Option<u64>,
        #[serde(default)]
        minutes: Option<u64>,
        #[serde(default)]
        seconds: Option<u64>,
    },
    Text(String),
}

impl DurationSpec {
    /// k6 duration string; zero or empty parts fall back to "1m"
    pub fn format(&self) -> String {
        match self {
            DurationSpec::Text(text) if !text.trim().is_empty() => text.trim().to_string(),
            DurationSpec::Text(_) => "1m".to_string(),
            DurationSpec::Parts {
                hours,
                minutes,
                seconds,
            } => {
                let mut out = String::new();
                for (value, unit) in [(hours, "h"), (minutes, "m"), (seconds, "s")] {
                    if let Some(v) = (*value).filter(|v| *v > 0) {
                        out.push_str(&format!("{v}{unit}"));
                    }
                }
                if out.is_empty() { "1m".to_string() } else { out }
            }
        }
    }
}
