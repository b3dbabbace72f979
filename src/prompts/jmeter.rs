//! JMeter prompt compilers
//!
//! The model answers with a Java class that builds the test plan through the
//! JMeter API, so the class name has to follow the output file stem.

use super::{SwaggerPath, iteration_definition, pretty_json, render, scenario_swagger_paths, test_name};
use crate::error::Result;
use crate::loader::SwaggerDocument;
use crate::models::{CommonFields, LoadScenario, RunConfig, ScenarioSpec, TimeValue};
use indexmap::IndexMap;
use serde::Serialize;

const SCENARIO_TEMPLATE: &str = include_str!("../../templates/prompts/jmeter_scenario.txt.j2");
const LOAD_TEMPLATE: &str = include_str!("../../templates/prompts/jmeter_load.txt.j2");

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ramp_up: Option<TimeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<TimeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<TimeValue>,
}

pub fn scenario_thread_groups(scenarios: &[ScenarioSpec]) -> IndexMap<String, ThreadGroup> {
    scenarios
        .iter()
        .map(|sc| {
            (
                sc.name.clone(),
                ThreadGroup {
                    threads: sc.threads,
                    ramp_up: sc.ramp_up.clone(),
                    duration: sc.duration.clone(),
                    delay: sc.delay.clone(),
                },
            )
        })
        .collect()
}

pub fn load_thread_groups(common: &CommonFields, scenarios: &[LoadScenario]) -> IndexMap<String, ThreadGroup> {
    let shared_duration = common
        .duration
        .as_ref()
        .map(|d| TimeValue::Text(d.format()));

    scenarios
        .iter()
        .map(|sc| {
            (
                sc.name.clone(),
                ThreadGroup {
                    threads: sc.virtual_user,
                    ramp_up: sc.ramp_up.clone(),
                    duration: sc.duration.clone().or_else(|| shared_duration.clone()),
                    delay: sc.delay.clone(),
                },
            )
        })
        .collect()
}

/// A valid Java identifier derived from a file stem
pub fn java_class_name(stem: &str) -> String {
    let mut name: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

#[derive(Debug, Default, Serialize)]
pub struct JMeterScenarioContext {
    pub class_name: String,
    pub test_name: String,
    pub scenarios: String,
    pub swagger_paths: String,
    pub swagger_docs: String,
    pub iteration_definition: String,
}

#[derive(Debug, Default, Serialize)]
pub struct JMeterLoadContext {
    pub class_name: String,
    pub test_name: String,
    pub swagger_json: String,
    pub swagger_paths: String,
    pub thread_groups: String,
    pub iteration_definition: String,
}

pub fn compile_scenario_prompt(
    config: &RunConfig,
    scenarios: &[ScenarioSpec],
    documents: &[SwaggerDocument],
    class_name: &str,
) -> Result<String> {
    let context = JMeterScenarioContext {
        class_name: class_name.to_string(),
        test_name: test_name(config),
        scenarios: pretty_json(&scenario_thread_groups(scenarios))?,
        swagger_paths: pretty_json(&scenario_swagger_paths(scenarios))?,
        swagger_docs: pretty_json(documents)?,
        iteration_definition: iteration_definition(scenarios),
    };

    render("jmeter_scenario.txt", SCENARIO_TEMPLATE, &context)
}

pub fn compile_load_prompt(
    common: &CommonFields,
    scenarios: &[LoadScenario],
    document: &SwaggerDocument,
    class_name: &str,
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

    let context = JMeterLoadContext {
        class_name: class_name.to_string(),
        test_name: test_name(&common.run),
        swagger_json: pretty_json(&document.content)?,
        swagger_paths: pretty_json(&swagger_paths)?,
        thread_groups: pretty_json(&load_thread_groups(common, scenarios))?,
        iteration_definition: common.flow_description(),
    };

    render("jmeter_load.txt", LOAD_TEMPLATE, &context)
}
