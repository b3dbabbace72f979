//! k6 prompt compilers (scenario and load modes)

use super::{SwaggerPath, iteration_definition, pretty_json, render, scenario_swagger_paths, test_name, wrap_thresholds};
use crate::error::Result;
use crate::loader::SwaggerDocument;
use crate::models::{CommonFields, K6Language, LoadScenario, RunConfig, ScenarioSpec, Stage, TimeValue};
use indexmap::IndexMap;
use serde::Serialize;

const SCENARIO_TEMPLATE: &str = include_str!("../../templates/prompts/k6_scenario.txt.j2");
const LOAD_TEMPLATE: &str = include_str!("../../templates/prompts/k6_load.txt.j2");

/// k6 default for `gracefulStop`
const DEFAULT_GRACEFUL_STOP: &str = "30s";
/// Executor used for load stages when the request does not pick one
const DEFAULT_LOAD_EXECUTOR: &str = "constant-vus";

/// One entry of `options.scenarios`
///
/// `executor`, `exec` and `gracefulStop` are always present; every other field
/// appears only when the request defined it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct K6ScenarioDefinition {
    pub executor: String,
    pub exec: String,
    pub graceful_stop: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vus: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<String>,
    #[serde(rename = "preAllocatedVUs", skip_serializing_if = "Option::is_none")]
    pub pre_allocated_vus: Option<u64>,
    #[serde(rename = "maxVUs", skip_serializing_if = "Option::is_none")]
    pub max_vus: Option<u64>,
    #[serde(rename = "startVUs", skip_serializing_if = "Option::is_none")]
    pub start_vus: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graceful_ramp_down: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<Stage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_rate: Option<u64>,
}

impl From<&ScenarioSpec> for K6ScenarioDefinition {
    fn from(spec: &ScenarioSpec) -> Self {
        Self {
            executor: spec.executor.clone().unwrap_or_default(),
            exec: spec.exec.clone().unwrap_or_default(),
            graceful_stop: spec
                .graceful_stop
                .clone()
                .unwrap_or_else(|| DEFAULT_GRACEFUL_STOP.to_string()),
            vus: spec.vus,
            iterations: spec.iterations,
            start_time: spec.start_time.clone(),
            duration: spec.duration.as_ref().map(TimeValue::to_duration_string),
            rate: spec.rate,
            time_unit: spec.time_unit.clone(),
            pre_allocated_vus: spec.pre_allocated_vus,
            max_vus: spec.max_vus,
            start_vus: spec.start_vus,
            graceful_ramp_down: spec.graceful_ramp_down.clone(),
            stages: spec.stages.clone(),
            start_rate: spec.start_rate,
        }
    }
}

/// Scenario blocks keyed by scenario name, in request order
pub fn scenario_definitions(scenarios: &[ScenarioSpec]) -> IndexMap<String, K6ScenarioDefinition> {
    scenarios
        .iter()
        .map(|spec| (spec.name.clone(), K6ScenarioDefinition::from(spec)))
        .collect()
}

/// One load stage of a load-mode request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadStage {
    pub executor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vus: Option<u64>,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
}

pub fn load_stages(common: &CommonFields, scenarios: &[LoadScenario]) -> IndexMap<String, LoadStage> {
    let executor = common
        .executor
        .clone()
        .unwrap_or_else(|| DEFAULT_LOAD_EXECUTOR.to_string());
    let duration = common
        .duration
        .as_ref()
        .map(|d| d.format())
        .unwrap_or_else(|| "1m".to_string());

    scenarios
        .iter()
        .map(|sc| {
            (
                sc.name.clone(),
                LoadStage {
                    executor: executor.clone(),
                    vus: sc.virtual_user,
                    duration: duration.clone(),
                    start_time: sc.start_time.clone(),
                },
            )
        })
        .collect()
}

#[derive(Debug, Default, Serialize)]
pub struct K6ScenarioContext {
    pub test_name: String,
    pub scenarios: String,
    pub thresholds: String,
    pub swagger_paths: String,
    pub swagger_docs: String,
    pub html_report_path: String,
    pub html_report_name: String,
    pub iteration_definition: String,
    pub language: String,
}

#[derive(Debug, Default, Serialize)]
pub struct K6LoadContext {
    pub test_name: String,
    pub stages: String,
    pub thresholds: String,
    pub swagger_paths: String,
    pub swagger_json: String,
    pub html_report_path: String,
    pub html_report_name: String,
    pub iteration_definition: String,
    pub language: String,
}

fn report_path(config: &RunConfig) -> String {
    config
        .html_report_file_path
        .clone()
        .unwrap_or_else(|| "reports".to_string())
}

fn report_name(config: &RunConfig) -> String {
    config
        .html_report_name
        .clone()
        .unwrap_or_else(|| "summary.html".to_string())
}

/// Compile the multi-scenario k6 prompt
pub fn compile_scenario_prompt(
    config: &RunConfig,
    scenarios: &[ScenarioSpec],
    documents: &[SwaggerDocument],
    language: K6Language,
) -> Result<String> {
    let context = K6ScenarioContext {
        test_name: test_name(config),
        scenarios: pretty_json(&scenario_definitions(scenarios))?,
        thresholds: pretty_json(&wrap_thresholds(config))?,
        swagger_paths: pretty_json(&scenario_swagger_paths(scenarios))?,
        swagger_docs: pretty_json(documents)?,
        html_report_path: report_path(config),
        html_report_name: report_name(config),
        iteration_definition: iteration_definition(scenarios),
        language: language.name().to_string(),
    };

    render("k6_scenario.txt", SCENARIO_TEMPLATE, &context)
}

/// Compile the single-profile k6 load prompt
pub fn compile_load_prompt(
    common: &CommonFields,
    scenarios: &[LoadScenario],
    document: &SwaggerDocument,
    language: K6Language,
) -> Result<String> {
    let swagger_paths: Vec<SwaggerPath> = common
        .apis
        .iter()
        .map(|api| SwaggerPath {
            method: api.method.clone(),
            path: api.path.clone(),
            swagger_file: None,
        })
        .collect();

    let context = K6LoadContext {
        test_name: test_name(&common.run),
        stages: pretty_json(&load_stages(common, scenarios))?,
        thresholds: pretty_json(&wrap_thresholds(&common.run))?,
        swagger_paths: pretty_json(&swagger_paths)?,
        swagger_json: pretty_json(&document.content)?,
        html_report_path: report_path(&common.run),
        html_report_name: report_name(&common.run),
        iteration_definition: common.flow_description(),
        language: language.name().to_string(),
    };

    render("k6_load.txt", LOAD_TEMPLATE, &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApiRef, ApiSelection, DurationSpec};
    use crate::prompts::test_support::assert_context_matches_template;
    use serde_json::json;
    use std::path::PathBuf;

    fn login_scenario() -> ScenarioSpec {
        ScenarioSpec {
            name: "login".to_string(),
            description: Some("User logs in".to_string()),
            swagger_file: Some("petstore.yaml".to_string()),
            executor: Some("constant-vus".to_string()),
            exec: Some("login".to_string()),
            vus: Some(5),
            duration: Some(TimeValue::Text("30s".to_string())),
            api: Some(ApiSelection::One(ApiRef {
                method: "POST".to_string(),
                path: "/login".to_string(),
            })),
            ..Default::default()
        }
    }

    fn document() -> SwaggerDocument {
        SwaggerDocument {
            file: PathBuf::from("/specs/petstore.yaml"),
            content: json!({"openapi": "3.0.0", "paths": {"/login": {}}}),
        }
    }

    #[test]
    fn test_templates_match_contexts() {
        assert_context_matches_template::<K6ScenarioContext>(SCENARIO_TEMPLATE);
        assert_context_matches_template::<K6LoadContext>(LOAD_TEMPLATE);
    }

    #[test]
    fn test_definitions_only_carry_defined_fields() {
        let ramping = ScenarioSpec {
            name: "ramp".to_string(),
            executor: Some("ramping-vus".to_string()),
            exec: Some("browse".to_string()),
            graceful_stop: Some("10s".to_string()),
            stages: Some(vec![Stage {
                duration: "1m".to_string(),
                target: 20,
            }]),
            ..Default::default()
        };

        let defs = scenario_definitions(&[login_scenario(), ramping]);
        let json = serde_json::to_value(&defs).unwrap();

        assert_eq!(
            json,
            json!({
                "login": {
                    "executor": "constant-vus",
                    "exec": "login",
                    "gracefulStop": "30s",
                    "vus": 5,
                    "duration": "30s"
                },
                "ramp": {
                    "executor": "ramping-vus",
                    "exec": "browse",
                    "gracefulStop": "10s",
                    "stages": [{ "duration": "1m", "target": 20 }]
                }
            })
        );
        let names: Vec<_> = defs.keys().cloned().collect();
        assert_eq!(names, vec!["login", "ramp"]);
    }

    #[test]
    fn test_compile_is_deterministic() {
        let config = RunConfig {
            test_name: Some("Checkout".to_string()),
            ..Default::default()
        };
        let scenarios = vec![login_scenario()];
        let docs = vec![document()];

        let first = compile_scenario_prompt(&config, &scenarios, &docs, K6Language::JavaScript).unwrap();
        let second = compile_scenario_prompt(&config, &scenarios, &docs, K6Language::JavaScript).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("Test name: Checkout"));
        assert!(first.contains("k6 javascript script"));
        assert!(first.contains("\"exec\": \"login\""));
        assert!(first.contains("/specs/petstore.yaml"));
        assert!(first.contains("Instruction: N/A"));
    }

    #[test]
    fn test_load_prompt() {
        let common = CommonFields {
            run: RunConfig {
                thresholds: [("http_req_duration".to_string(), "p(95)<2000".to_string())]
                    .into_iter()
                    .collect(),
                ..Default::default()
            },
            swagger_file: Some("petstore.yaml".to_string()),
            apis: vec![ApiRef {
                method: "GET".to_string(),
                path: "/pets".to_string(),
            }],
            duration: Some(DurationSpec::Parts {
                hours: None,
                minutes: Some(2),
                seconds: None,
            }),
            iteration_definition: Some("List pets then sleep".to_string()),
            ..Default::default()
        };
        let scenarios = vec![LoadScenario {
            name: "warmup".to_string(),
            virtual_user: Some(3),
            start_time: Some("0s".to_string()),
            ..Default::default()
        }];

        let stages = serde_json::to_value(load_stages(&common, &scenarios)).unwrap();
        assert_eq!(
            stages,
            json!({"warmup": {"executor": "constant-vus", "vus": 3, "duration": "2m", "startTime": "0s"}})
        );

        let prompt = compile_load_prompt(&common, &scenarios, &document(), K6Language::TypeScript).unwrap();
        assert!(prompt.contains("k6 typescript script"));
        assert!(prompt.contains("\"p(95)<2000\""));
        assert!(prompt.contains("List pets then sleep"));
        assert!(!prompt.contains("swaggerFile"));
    }
}
