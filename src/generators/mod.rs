//! Tool-specific generation strategies
//!
//! `ScriptGenerator` covers everything that differs between k6 and JMeter:
//! validation rules, prompt compilers, the system instruction, where the
//! artifact goes and which CI workflow accompanies it. The shared pipeline
//! lives in `service::GenerationService`.

mod jmeter;
mod k6;

pub use jmeter::JMeterGenerator;
pub use k6::K6Generator;

use crate::config::OutputConfig;
use crate::error::Result;
use crate::loader::SwaggerDocument;
use crate::models::{CommonFields, K6Language, LoadScenario, Mode, RunConfig, ScenarioSpec, Tool};
use crate::output::WorkflowFile;
use std::path::PathBuf;

/// Where an artifact is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Directory the script lands in (and the sanitizer scans)
    pub dir: PathBuf,
    /// File name without extension
    pub stem: String,
    pub extension: &'static str,
    /// Directory that receives `.github/workflows/`
    pub workflow_root: PathBuf,
}

impl OutputTarget {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.stem, self.extension)
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(self.file_name())
    }
}

pub trait ScriptGenerator: Send + Sync {
    fn tool(&self) -> Tool;

    /// Scenario-mode validation, run before any file is touched
    fn validate_scenarios(&self, scenarios: &[ScenarioSpec]) -> Result<()>;

    fn compile_scenario_prompt(
        &self,
        config: &RunConfig,
        scenarios: &[ScenarioSpec],
        documents: &[SwaggerDocument],
        target: &OutputTarget,
    ) -> Result<String>;

    fn compile_load_prompt(
        &self,
        common: &CommonFields,
        scenarios: &[LoadScenario],
        document: &SwaggerDocument,
        target: &OutputTarget,
    ) -> Result<String>;

    fn system_instruction(&self, mode: Mode) -> String;

    /// Resolve the output location for `mode`
    fn output_target(&self, mode: Mode, output: &OutputConfig) -> OutputTarget;

    /// Create whatever directory layout the target needs
    fn prepare_output(&self, target: &OutputTarget, output: &OutputConfig) -> Result<()>;

    fn workflow(&self) -> &'static WorkflowFile;
}

/// Generator for the tool a request names
///
/// `language` is read only for k6; JMeter output is always Java.
pub fn generator_for(run: &RunConfig, default_language: K6Language) -> Result<Box<dyn ScriptGenerator>> {
    let generator: Box<dyn ScriptGenerator> = match Tool::from_request(run.tool.as_deref())? {
        Tool::K6 => Box::new(K6Generator::new(resolve_language(run, default_language)?)),
        Tool::JMeter => Box::new(JMeterGenerator),
    };
    Ok(generator)
}

/// k6 language a request resolves to; a request-level value overrides the default
pub fn resolve_language(run: &RunConfig, default: K6Language) -> Result<K6Language> {
    match run.language.as_deref() {
        Some(language) if !language.trim().is_empty() => language.parse(),
        _ => Ok(default),
    }
}
