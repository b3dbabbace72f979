use super::{OutputTarget, ScriptGenerator};
use crate::config::OutputConfig;
use crate::error::Result;
use crate::loader::SwaggerDocument;
use crate::models::{CommonFields, K6Language, LoadScenario, Mode, RunConfig, ScenarioSpec, Tool};
use crate::output::{WorkflowFile, workflow::JMETER_WORKFLOW};
use crate::prompts::{jmeter, system_instruction};
use crate::validation::validate_thread_groups;

const SCENARIO_STEM: &str = "generated_jmeter_script";
const LOAD_STEM: &str = "generated_jmeter_load_script";

/// Java programs that build and run a JMeter test plan
#[derive(Debug, Clone, Copy, Default)]
pub struct JMeterGenerator;

impl ScriptGenerator for JMeterGenerator {
    fn tool(&self) -> Tool {
        Tool::JMeter
    }

    fn validate_scenarios(&self, scenarios: &[ScenarioSpec]) -> Result<()> {
        validate_thread_groups(scenarios)
    }

    fn compile_scenario_prompt(
        &self,
        config: &RunConfig,
        scenarios: &[ScenarioSpec],
        documents: &[SwaggerDocument],
        target: &OutputTarget,
    ) -> Result<String> {
        let class_name = jmeter::java_class_name(&target.stem);
        jmeter::compile_scenario_prompt(config, scenarios, documents, &class_name)
    }

    fn compile_load_prompt(
        &self,
        common: &CommonFields,
        scenarios: &[LoadScenario],
        document: &SwaggerDocument,
        target: &OutputTarget,
    ) -> Result<String> {
        let class_name = jmeter::java_class_name(&target.stem);
        jmeter::compile_load_prompt(common, scenarios, document, &class_name)
    }

    fn system_instruction(&self, mode: Mode) -> String {
        system_instruction(Tool::JMeter, mode, K6Language::default())
    }

    fn output_target(&self, mode: Mode, output: &OutputConfig) -> OutputTarget {
        let stem = match mode {
            Mode::Scenario => output.scenario_file.as_deref().unwrap_or(SCENARIO_STEM),
            Mode::Load => output.load_file.as_deref().unwrap_or(LOAD_STEM),
        };

        OutputTarget {
            dir: output.output_dir.clone(),
            stem: stem.to_string(),
            extension: "java",
            workflow_root: output.output_dir.clone(),
        }
    }

    fn prepare_output(&self, _target: &OutputTarget, _output: &OutputConfig) -> Result<()> {
        Ok(())
    }

    fn workflow(&self) -> &'static WorkflowFile {
        &JMETER_WORKFLOW
    }
}
