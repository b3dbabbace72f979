use crate::error::{PerfScriptError, Result};
use crate::models::{Executor, ScenarioSpec};

/// Check that a scenario names a known executor and carries every field it requires
pub fn validate_executor_fields(scenario: &ScenarioSpec) -> Result<Executor> {
    let Some(name) = scenario.executor.as_deref() else {
        return Err(PerfScriptError::MissingFields {
            scenario: scenario.name.clone(),
            kind: "executor: <none>".to_string(),
            fields: vec!["executor"],
        });
    };

    let executor: Executor = name
        .parse()
        .map_err(|_| PerfScriptError::InvalidExecutor {
            scenario: scenario.name.clone(),
            executor: name.to_string(),
        })?;

    let missing: Vec<&'static str> = executor
        .mandatory_fields()
        .iter()
        .copied()
        .filter(|field| !scenario.has_field(field))
        .collect();

    if !missing.is_empty() {
        return Err(PerfScriptError::MissingFields {
            scenario: scenario.name.clone(),
            kind: format!("executor: {}", executor),
            fields: missing,
        });
    }

    Ok(executor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Stage, TimeValue};

    /// A scenario with every executor-related field populated
    fn full_scenario(executor: Executor) -> ScenarioSpec {
        ScenarioSpec {
            name: format!("{}-scenario", executor),
            executor: Some(executor.name().to_string()),
            exec: Some("run".to_string()),
            vus: Some(5),
            iterations: Some(10),
            duration: Some(TimeValue::Text("30s".to_string())),
            rate: Some(10),
            time_unit: Some("1s".to_string()),
            pre_allocated_vus: Some(5),
            max_vus: Some(20),
            stages: Some(vec![Stage {
                duration: "30s".to_string(),
                target: 10,
            }]),
            start_rate: Some(1),
            ..Default::default()
        }
    }

    fn clear(scenario: &mut ScenarioSpec, field: &str) {
        match field {
            "exec" => scenario.exec = None,
            "vus" => scenario.vus = None,
            "iterations" => scenario.iterations = None,
            "duration" => scenario.duration = None,
            "rate" => scenario.rate = None,
            "timeUnit" => scenario.time_unit = None,
            "preAllocatedVUs" => scenario.pre_allocated_vus = None,
            "maxVUs" => scenario.max_vus = None,
            "stages" => scenario.stages = None,
            "startRate" => scenario.start_rate = None,
            other => panic!("unexpected mandatory field {other}"),
        }
    }

    #[test]
    fn test_complete_scenarios_pass() {
        for executor in Executor::ALL {
            assert_eq!(
                validate_executor_fields(&full_scenario(executor)).unwrap(),
                executor
            );
        }
    }

    #[test]
    fn test_each_missing_mandatory_field_is_rejected() {
        for executor in Executor::ALL {
            for field in executor.mandatory_fields() {
                let mut scenario = full_scenario(executor);
                clear(&mut scenario, field);

                match validate_executor_fields(&scenario) {
                    Err(PerfScriptError::MissingFields { fields, .. }) => {
                        assert_eq!(fields, vec![*field], "executor {executor}");
                    }
                    other => panic!("expected MissingFields for {executor}/{field}, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_all_missing_fields_are_named() {
        let scenario = ScenarioSpec {
            name: "arrival".to_string(),
            executor: Some("constant-arrival-rate".to_string()),
            exec: Some("browse".to_string()),
            ..Default::default()
        };

        let err = validate_executor_fields(&scenario).unwrap_err();
        let message = err.to_string();
        for field in ["rate", "timeUnit", "duration", "preAllocatedVUs", "maxVUs"] {
            assert!(message.contains(field), "missing {field} in: {message}");
        }
    }

    #[test]
    fn test_unknown_executor() {
        let scenario = ScenarioSpec {
            name: "weird".to_string(),
            executor: Some("open-model".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            validate_executor_fields(&scenario),
            Err(PerfScriptError::InvalidExecutor { executor, .. }) if executor == "open-model"
        ));
    }

    #[test]
    fn test_missing_executor_is_reported_as_missing_field() {
        let scenario = ScenarioSpec {
            name: "bare".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            validate_executor_fields(&scenario),
            Err(PerfScriptError::MissingFields { fields, .. }) if fields == vec!["executor"]
        ));
    }
}
