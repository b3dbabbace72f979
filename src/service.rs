//! Script generation pipeline
//!
//! validate → resolve + dedup Swagger paths → load → compile prompt → invoke
//! model → reject empty output → write + sanitize → provision workflow.
//! Steps run strictly in sequence; a failure stops the run and leaves files
//! already written in place.

use crate::config::AppConfig;
use crate::error::{PerfScriptError, Result};
use crate::generators::{ScriptGenerator, generator_for};
use crate::llm::ChatModel;
use crate::loader::{SwaggerSource, load_documents, resolve_swagger_paths};
use crate::models::{LoadRequest, Mode, RunConfig, ScenarioRequest};
use crate::output::{ArtifactWriter, provision_workflow};
use crate::validation::validate_load_request;
use std::path::PathBuf;
use std::sync::Arc;

/// Result of one successful generation
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedScript {
    /// Raw model output, before fence removal
    pub content: String,
    pub output_path: PathBuf,
}

pub struct GenerationService {
    config: AppConfig,
    chat: Arc<dyn ChatModel>,
    swagger: Arc<dyn SwaggerSource>,
    writer: ArtifactWriter,
}

impl GenerationService {
    pub fn new(config: AppConfig, chat: Arc<dyn ChatModel>, swagger: Arc<dyn SwaggerSource>) -> Self {
        Self {
            config,
            chat,
            swagger,
            writer: ArtifactWriter::default(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn generator(&self, run: &RunConfig) -> Result<Box<dyn ScriptGenerator>> {
        generator_for(run, self.config.k6_language)
    }

    /// Multi-scenario generation (`POST /api/scenarios/`)
    #[tracing::instrument(skip_all, fields(scenarios = request.scenarios.len()))]
    pub async fn generate_scenarios(&self, request: &ScenarioRequest) -> Result<GeneratedScript> {
        let generator = self.generator(&request.config)?;
        generator.validate_scenarios(&request.scenarios)?;

        let paths = resolve_swagger_paths(
            &self.config.swagger_base_path,
            request
                .scenarios
                .iter()
                .filter_map(|s| s.swagger_file.as_deref())
                .filter(|file| !file.trim().is_empty()),
        )?;
        let documents = load_documents(self.swagger.as_ref(), &paths)?;
        tracing::info!(tool = %generator.tool(), documents = documents.len(), "Swagger documents loaded");

        let target = generator.output_target(Mode::Scenario, &self.config.output);
        let prompt =
            generator.compile_scenario_prompt(&request.config, &request.scenarios, &documents, &target)?;

        self.complete(generator.as_ref(), Mode::Scenario, &prompt).await
    }

    /// Single load-profile generation (`POST /api/scenarios/load`)
    #[tracing::instrument(skip_all, fields(scenarios = request.scenarios.len()))]
    pub async fn generate_load(&self, request: &LoadRequest) -> Result<GeneratedScript> {
        let common = &request.common_fields;
        let generator = self.generator(&common.run)?;
        validate_load_request(common, &request.scenarios)?;

        let paths = resolve_swagger_paths(
            &self.config.swagger_base_path,
            common.swagger_file.as_deref(),
        )?;
        let documents = load_documents(self.swagger.as_ref(), &paths)?;
        let document = documents.first().ok_or(PerfScriptError::SwaggerFileMissing)?;
        tracing::info!(tool = %generator.tool(), swagger = %document.file.display(), "Swagger document loaded");

        let target = generator.output_target(Mode::Load, &self.config.output);
        let prompt = generator.compile_load_prompt(common, &request.scenarios, document, &target)?;

        self.complete(generator.as_ref(), Mode::Load, &prompt).await
    }

    /// Shared tail: invoke the model, write the artifact, add the workflow
    async fn complete(
        &self,
        generator: &dyn ScriptGenerator,
        mode: Mode,
        prompt: &str,
    ) -> Result<GeneratedScript> {
        let system = generator.system_instruction(mode);
        tracing::info!(tool = %generator.tool(), mode = %mode, prompt_len = prompt.len(), "Invoking language model");

        let response = self.chat.invoke(&system, prompt).await?;
        let content = response
            .content
            .filter(|text| !text.trim().is_empty())
            .ok_or(PerfScriptError::GenerationError)?;
        tracing::debug!(content = %content, "Model output");

        let target = generator.output_target(mode, &self.config.output);
        generator.prepare_output(&target, &self.config.output)?;
        let output_path = self
            .writer
            .write(&target.dir, &target.file_name(), &content)?;

        provision_workflow(&target.workflow_root, generator.workflow())?;

        Ok(GeneratedScript {
            content,
            output_path,
        })
    }
}
