use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One simulated user journey in a scenario-mode request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSpec {
    /// Scenario name (unique within a request)
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Swagger/OpenAPI file, relative to the configured base path
    #[serde(default)]
    pub swagger_file: Option<String>,

    /// k6 executor name (e.g. "constant-vus")
    #[serde(default)]
    pub executor: Option<String>,

    /// Name of the exported function the scenario runs
    #[serde(default)]
    pub exec: Option<String>,

    #[serde(default)]
    pub vus: Option<u64>,

    #[serde(default)]
    pub iterations: Option<u64>,

    /// k6 duration string, or seconds for JMeter thread groups
    #[serde(default)]
    pub duration: Option<TimeValue>,

    #[serde(default)]
    pub rate: Option<u64>,

    #[serde(default)]
    pub time_unit: Option<String>,

    #[serde(default, rename = "preAllocatedVUs")]
    pub pre_allocated_vus: Option<u64>,

    #[serde(default, rename = "maxVUs")]
    pub max_vus: Option<u64>,

    #[serde(default, rename = "startVUs")]
    pub start_vus: Option<u64>,

    #[serde(default)]
    pub graceful_ramp_down: Option<String>,

    #[serde(default)]
    pub stages: Option<Vec<Stage>>,

    #[serde(default)]
    pub start_rate: Option<u64>,

    #[serde(default)]
    pub start_time: Option<String>,

    #[serde(default)]
    pub graceful_stop: Option<String>,

    /// Endpoint (or ordered endpoints) the scenario exercises
    #[serde(default)]
    pub api: Option<ApiSelection>,

    /// Free text appended to the flow description
    #[serde(default)]
    pub user_instructions: Option<String>,

    /// JMeter thread count
    #[serde(default)]
    pub threads: Option<u64>,

    /// JMeter ramp-up
    #[serde(default)]
    pub ramp_up: Option<TimeValue>,

    /// JMeter start delay
    #[serde(default)]
    pub delay: Option<TimeValue>,
}

impl ScenarioSpec {
    /// Whether a field (by its wire name) carries a value
    pub fn has_field(&self, field: &str) -> bool {
        match field {
            "executor" => self.executor.is_some(),
            "exec" => self.exec.is_some(),
            "vus" => self.vus.is_some(),
            "iterations" => self.iterations.is_some(),
            "duration" => self.duration.is_some(),
            "rate" => self.rate.is_some(),
            "timeUnit" => self.time_unit.is_some(),
            "preAllocatedVUs" => self.pre_allocated_vus.is_some(),
            "maxVUs" => self.max_vus.is_some(),
            "startVUs" => self.start_vus.is_some(),
            "gracefulRampDown" => self.graceful_ramp_down.is_some(),
            "stages" => self.stages.is_some(),
            "startRate" => self.start_rate.is_some(),
            "startTime" => self.start_time.is_some(),
            "gracefulStop" => self.graceful_stop.is_some(),
            "threads" => self.threads.is_some(),
            "rampUp" => self.ramp_up.is_some(),
            "delay" => self.delay.is_some(),
            _ => false,
        }
    }

    /// Endpoints in declaration order
    pub fn apis(&self) -> &[ApiRef] {
        match &self.api {
            Some(ApiSelection::Many(apis)) => apis,
            Some(ApiSelection::One(api)) => std::slice::from_ref(api),
            None => &[],
        }
    }
}

/// A ramping stage (`{duration, target}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub duration: String,
    pub target: u64,
}

/// HTTP method + path reference into a Swagger document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRef {
    pub method: String,

    /// Load-mode payloads send this as `pathName`
    #[serde(alias = "pathName")]
    pub path: String,
}

/// `api` accepts either a single reference or an ordered list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ApiSelection {
    Many(Vec<ApiRef>),
    One(ApiRef),
}

/// A time value given either as seconds or as a k6-style string ("30s", "5m")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    Seconds(u64),
    Text(String),
}

impl TimeValue {
    /// k6 duration string (`300` becomes `"300s"`)
    pub fn to_duration_string(&self) -> String {
        match self {
            TimeValue::Seconds(seconds) => format!("{seconds}s"),
            TimeValue::Text(text) => text.clone(),
        }
    }
}

/// The seven k6 execution models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Executor {
    SharedIterations,
    PerVuIterations,
    ConstantVus,
    RampingVus,
    ConstantArrivalRate,
    RampingArrivalRate,
    ExternallyControlled,
}

impl Executor {
    pub const ALL: [Executor; 7] = [
        Executor::SharedIterations,
        Executor::PerVuIterations,
        Executor::ConstantVus,
        Executor::RampingVus,
        Executor::ConstantArrivalRate,
        Executor::RampingArrivalRate,
        Executor::ExternallyControlled,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Executor::SharedIterations => "shared-iterations",
            Executor::PerVuIterations => "per-vu-iterations",
            Executor::ConstantVus => "constant-vus",
            Executor::RampingVus => "ramping-vus",
            Executor::ConstantArrivalRate => "constant-arrival-rate",
            Executor::RampingArrivalRate => "ramping-arrival-rate",
            Executor::ExternallyControlled => "externally-controlled",
        }
    }

    /// Fields that must be present for this executor
    pub fn mandatory_fields(&self) -> &'static [&'static str] {
        match self {
            Executor::SharedIterations | Executor::PerVuIterations => {
                &["exec", "vus", "iterations"]
            }
            Executor::ConstantVus => &["exec", "vus", "duration"],
            Executor::RampingVus => &["exec", "stages"],
            Executor::ConstantArrivalRate => &[
                "exec",
                "rate",
                "timeUnit",
                "duration",
                "preAllocatedVUs",
                "maxVUs",
            ],
            Executor::RampingArrivalRate => &[
                "exec",
                "startRate",
                "timeUnit",
                "stages",
                "preAllocatedVUs",
                "maxVUs",
            ],
            Executor::ExternallyControlled => &["exec", "maxVUs"],
        }
    }
}

impl FromStr for Executor {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Executor::ALL
            .into_iter()
            .find(|executor| executor.name() == s)
            .ok_or(())
    }
}

impl fmt::Display for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executor_round_trips_through_name() {
        for executor in Executor::ALL {
            assert_eq!(executor.name().parse::<Executor>(), Ok(executor));
            assert!(executor.mandatory_fields().contains(&"exec"));
        }
        assert!("constant_vus".parse::<Executor>().is_err());
    }

    #[test]
    fn test_api_accepts_single_or_list() {
        let single: ScenarioSpec = serde_json::from_value(serde_json::json!({
            "name": "one",
            "api": { "method": "GET", "path": "/pets" }
        }))
        .unwrap();
        assert_eq!(single.apis().len(), 1);
        assert_eq!(single.apis()[0].path, "/pets");

        let many: ScenarioSpec = serde_json::from_value(serde_json::json!({
            "name": "many",
            "api": [
                { "method": "POST", "path": "/login" },
                { "method": "GET", "path": "/profile" }
            ]
        }))
        .unwrap();
        let paths: Vec<_> = many.apis().iter().map(|a| a.path.as_str()).collect();
        assert_eq!(paths, vec!["/login", "/profile"]);
    }

    #[test]
    fn test_k6_field_names_deserialize() {
        let spec: ScenarioSpec = serde_json::from_value(serde_json::json!({
            "name": "arrival",
            "executor": "constant-arrival-rate",
            "exec": "browse",
            "rate": 10,
            "timeUnit": "1s",
            "duration": "1m",
            "preAllocatedVUs": 5,
            "maxVUs": 20
        }))
        .unwrap();
        assert!(spec.has_field("preAllocatedVUs"));
        assert!(spec.has_field("maxVUs"));
        assert!(spec.has_field("timeUnit"));
        assert!(!spec.has_field("startVUs"));
    }

    #[test]
    fn test_duration_accepts_seconds_or_text() {
        let seconds: ScenarioSpec =
            serde_json::from_value(serde_json::json!({ "name": "jmeter", "duration": 300 })).unwrap();
        assert_eq!(seconds.duration, Some(TimeValue::Seconds(300)));
        assert_eq!(seconds.duration.unwrap().to_duration_string(), "300s");

        let text: ScenarioSpec =
            serde_json::from_value(serde_json::json!({ "name": "k6", "duration": "5m" })).unwrap();
        assert_eq!(text.duration.unwrap().to_duration_string(), "5m");
    }
}
