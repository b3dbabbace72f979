//! Prompt compilers
//!
//! Each compiler turns a validated request plus its Swagger documents into a
//! single prompt string. Compilation is pure: JSON serialization of the inputs
//! in declaration order, then substitution into a fixed template. Templates
//! render with strict undefined behaviour, so a variable missing from the
//! context is an error instead of an empty string.

pub mod jmeter;
pub mod k6;
pub mod system;

pub use system::system_instruction;

use crate::error::Result;
use crate::models::{RunConfig, ScenarioSpec};
use indexmap::IndexMap;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;

/// Render a prompt template with a typed context
pub(crate) fn render<C: Serialize>(name: &'static str, source: &'static str, context: &C) -> Result<String> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template(name, source)?;

    let template = env.get_template(name)?;
    Ok(template.render(context)?)
}

/// Two-space indented JSON, the format the prompts embed
pub(crate) fn pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// One endpoint reference as it appears in the prompt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwaggerPath {
    pub method: String,
    pub path: String,
    #[serde(rename = "swaggerFile", skip_serializing_if = "Option::is_none")]
    pub swagger_file: Option<String>,
}

/// Endpoints of every scenario, flattened in declaration order (never reordered or deduplicated)
pub fn scenario_swagger_paths(scenarios: &[ScenarioSpec]) -> Vec<SwaggerPath> {
    scenarios
        .iter()
        .flat_map(|scenario| {
            scenario.apis().iter().map(move |api| SwaggerPath {
                method: api.method.clone(),
                path: api.path.clone(),
                swagger_file: scenario.swagger_file.clone(),
            })
        })
        .collect()
}

/// Each threshold condition wrapped in a single-element list, as k6 expects
pub fn wrap_thresholds(config: &RunConfig) -> IndexMap<String, Vec<String>> {
    config
        .thresholds
        .iter()
        .map(|(metric, condition)| (metric.clone(), vec![condition.clone()]))
        .collect()
}

/// Free-text flow description built from every scenario
pub fn iteration_definition(scenarios: &[ScenarioSpec]) -> String {
    scenarios
        .iter()
        .map(|scenario| {
            format!(
                "Scenario: {}\nDescription: {}\nSwagger: {}\nInstruction: {}",
                scenario.name,
                scenario.description.as_deref().unwrap_or_default(),
                scenario.swagger_file.as_deref().unwrap_or_default(),
                scenario.user_instructions.as_deref().unwrap_or("N/A"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub(crate) fn test_name(config: &RunConfig) -> String {
    config
        .test_name
        .clone()
        .unwrap_or_else(|| "Generated Load Test".to_string())
}
