use super::{OutputTarget, ScriptGenerator};
use crate::config::OutputConfig;
use crate::error::Result;
use crate::loader::SwaggerDocument;
use crate::models::{CommonFields, K6Language, LoadScenario, Mode, RunConfig, ScenarioSpec, Tool};
use crate::output::{WorkflowFile, ensure_project_layout, workflow::K6_WORKFLOW};
use crate::prompts::{k6, system_instruction};
use crate::validation::validate_k6_scenarios;

const SCENARIO_STEM: &str = "generated_script";
const LOAD_STEM: &str = "generated_k6_load_script";

/// k6 scripts in JavaScript or TypeScript
#[derive(Debug, Clone, Copy)]
pub struct K6Generator {
    language: K6Language,
}

impl K6Generator {
    pub fn new(language: K6Language) -> Self {
        Self { language }
    }
}

impl ScriptGenerator for K6Generator {
    fn tool(&self) -> Tool {
        Tool::K6
    }

    fn validate_scenarios(&self, scenarios: &[ScenarioSpec]) -> Result<()> {
        validate_k6_scenarios(scenarios)
    }

    fn compile_scenario_prompt(
        &self,
        config: &RunConfig,
        scenarios: &[ScenarioSpec],
        documents: &[SwaggerDocument],
        _target: &OutputTarget,
    ) -> Result<String> {
        k6::compile_scenario_prompt(config, scenarios, documents, self.language)
    }

    fn compile_load_prompt(
        &self,
        common: &CommonFields,
        scenarios: &[LoadScenario],
        document: &SwaggerDocument,
        _target: &OutputTarget,
    ) -> Result<String> {
        k6::compile_load_prompt(common, scenarios, document, self.language)
    }

    fn system_instruction(&self, mode: Mode) -> String {
        system_instruction(Tool::K6, mode, self.language)
    }

    fn output_target(&self, mode: Mode, output: &OutputConfig) -> OutputTarget {
        let stem = match mode {
            Mode::Scenario => output.scenario_file.as_deref().unwrap_or(SCENARIO_STEM),
            Mode::Load => output.load_file.as_deref().unwrap_or(LOAD_STEM),
        };

        // プロジェクト指定時は <project>/src/ に出力
        let (dir, workflow_root) = match &output.project_dir {
            Some(project) => (project.join("src"), project.clone()),
            None => (output.output_dir.clone(), output.output_dir.clone()),
        };

        OutputTarget {
            dir,
            stem: stem.to_string(),
            extension: self.language.extension(),
            workflow_root,
        }
    }

    fn prepare_output(&self, _target: &OutputTarget, output: &OutputConfig) -> Result<()> {
        if let Some(project) = &output.project_dir {
            ensure_project_layout(project, self.language)?;
        }
        Ok(())
    }

    fn workflow(&self) -> &'static WorkflowFile {
        &K6_WORKFLOW
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn output(project_dir: Option<&str>) -> OutputConfig {
        OutputConfig {
            output_dir: PathBuf::from("/out"),
            scenario_file: None,
            load_file: None,
            project_dir: project_dir.map(PathBuf::from),
        }
    }

    #[test]
    fn test_target_without_project() {
        let generator = K6Generator::new(K6Language::JavaScript);
        let target = generator.output_target(Mode::Scenario, &output(None));
        assert_eq!(target.path(), PathBuf::from("/out/generated_script.js"));
        assert_eq!(target.workflow_root, PathBuf::from("/out"));

        let load = generator.output_target(Mode::Load, &output(None));
        assert_eq!(load.file_name(), "generated_k6_load_script.js");
    }

    #[test]
    fn test_target_inside_project() {
        let generator = K6Generator::new(K6Language::TypeScript);
        let target = generator.output_target(Mode::Scenario, &output(Some("/work/shop")));
        assert_eq!(target.path(), PathBuf::from("/work/shop/src/generated_script.ts"));
        assert_eq!(target.workflow_root, PathBuf::from("/work/shop"));
    }

    #[test]
    fn test_configured_stems_win() {
        let mut config = output(None);
        config.scenario_file = Some("checkout_flow".to_string());
        config.load_file = Some("checkout_load".to_string());

        let generator = K6Generator::new(K6Language::JavaScript);
        assert_eq!(generator.output_target(Mode::Scenario, &config).stem, "checkout_flow");
        assert_eq!(generator.output_target(Mode::Load, &config).stem, "checkout_load");
    }
}
