use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PerfScriptError {
    #[error("Swagger file path is missing in the input JSON.")]
    SwaggerFileMissing,

    #[error("Swagger file is invalid or not found: {}", .0.display())]
    SwaggerNotFound(PathBuf),

    #[error("Unsupported Swagger file type: {0}. Use .yaml, .yml, or .json")]
    UnsupportedSwaggerFormat(String),

    #[error("Failed to parse Swagger file {}: {message}", path.display())]
    SwaggerParse { path: PathBuf, message: String },

    #[error("Invalid executor type \"{executor}\" in scenario \"{scenario}\"")]
    InvalidExecutor { scenario: String, executor: String },

    #[error(
        "Scenario \"{scenario}\" ({kind}) is missing required fields: {}",
        fields.join(", ")
    )]
    MissingFields {
        scenario: String,
        kind: String,
        fields: Vec<&'static str>,
    },

    #[error("Duplicate scenario name: {0}")]
    DuplicateScenario(String),

    #[error("Unsupported tool: {0}. Supported: k6, jmeter")]
    UnsupportedTool(String),

    #[error("Unsupported k6 language: {0}. Supported: javascript, typescript")]
    UnsupportedLanguage(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Language model returned no content")]
    GenerationError,

    #[error("LLM request failed: {0}")]
    LlmError(String),

    #[error("Prompt template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    #[error("Project layout conflict: {0}")]
    LayoutConflict(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl PerfScriptError {
    /// 呼び出し側の入力に起因するエラーかどうか (HTTP 4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PerfScriptError::SwaggerFileMissing
                | PerfScriptError::SwaggerNotFound(_)
                | PerfScriptError::UnsupportedSwaggerFormat(_)
                | PerfScriptError::SwaggerParse { .. }
                | PerfScriptError::InvalidExecutor { .. }
                | PerfScriptError::MissingFields { .. }
                | PerfScriptError::DuplicateScenario(_)
                | PerfScriptError::UnsupportedTool(_)
                | PerfScriptError::UnsupportedLanguage(_)
                | PerfScriptError::InvalidRequest(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PerfScriptError>;
