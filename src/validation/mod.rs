//! Request validation that runs before any prompt is compiled

mod executor;

pub use executor::validate_executor_fields;

use crate::error::{PerfScriptError, Result};
use crate::models::{CommonFields, LoadScenario, ScenarioSpec};
use std::collections::HashSet;

/// Thread-group fields a JMeter scenario must carry
const THREAD_GROUP_FIELDS: [&str; 2] = ["threads", "duration"];

/// k6 scenario mode: every scenario must satisfy its executor's field table
pub fn validate_k6_scenarios(scenarios: &[ScenarioSpec]) -> Result<()> {
    ensure_scenarios(scenarios.iter().map(|s| s.name.as_str()))?;

    for scenario in scenarios {
        validate_executor_fields(scenario)?;
    }
    Ok(())
}

/// JMeter scenario mode: every scenario must describe a thread group
pub fn validate_thread_groups(scenarios: &[ScenarioSpec]) -> Result<()> {
    ensure_scenarios(scenarios.iter().map(|s| s.name.as_str()))?;

    for scenario in scenarios {
        let missing: Vec<&'static str> = THREAD_GROUP_FIELDS
            .into_iter()
            .filter(|field| !scenario.has_field(field))
            .collect();

        if !missing.is_empty() {
            return Err(PerfScriptError::MissingFields {
                scenario: scenario.name.clone(),
                kind: "thread group".to_string(),
                fields: missing,
            });
        }
    }
    Ok(())
}

/// Load mode: structural presence checks on `commonFields`
pub fn validate_load_request(common: &CommonFields, scenarios: &[LoadScenario]) -> Result<()> {
    if common
        .swagger_file
        .as_deref()
        .is_none_or(|file| file.trim().is_empty())
    {
        return Err(PerfScriptError::SwaggerFileMissing);
    }

    if common.apis.is_empty() {
        return Err(PerfScriptError::InvalidRequest(
            "commonFields.apis must list at least one endpoint".to_string(),
        ));
    }

    ensure_scenarios(scenarios.iter().map(|s| s.name.as_str()))
}

/// At least one scenario, and no name used twice
fn ensure_scenarios<'a>(names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(PerfScriptError::DuplicateScenario(name.to_string()));
        }
    }

    if seen.is_empty() {
        return Err(PerfScriptError::InvalidRequest(
            "At least one scenario is required".to_string(),
        ));
    }
    Ok(())
}
