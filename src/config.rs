//! Process-wide configuration, read once from the environment at startup

use crate::error::{PerfScriptError, Result};
use crate::llm::LlmProvider;
use crate::models::K6Language;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Swagger references are resolved against this directory
    pub swagger_base_path: PathBuf,
    pub output: OutputConfig,
    /// Default k6 language when the request does not name one
    pub k6_language: K6Language,
    pub llm: LlmConfig,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    pub scenario_file: Option<String>,
    pub load_file: Option<String>,
    /// `<PROJECT_BASE_PATH>/<PROJECT_NAME>` when both are set
    pub project_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: Option<String>,
    pub google_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub ollama_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let swagger_base_path = get("SWAGGER_BASE_PATH")
            .or_else(|| get("BASE_PATH"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let project_dir = match (get("PROJECT_BASE_PATH"), get("PROJECT_NAME")) {
            (Some(base), Some(name)) => Some(PathBuf::from(base).join(name)),
            _ => None,
        };

        let output = OutputConfig {
            output_dir: get("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./generated")),
            scenario_file: get("OUTPUT_SCENARIO_FILE"),
            load_file: get("OUTPUT_LOAD_FILE_NAME"),
            project_dir,
        };

        let k6_language = match get("K6_LANGUAGE") {
            Some(lang) => lang.parse().map_err(|_| {
                PerfScriptError::ConfigError(format!("Unsupported K6_LANGUAGE: {}", lang))
            })?,
            None => K6Language::default(),
        };

        let provider = match get("LLM_PROVIDER") {
            Some(name) => name.parse()?,
            None => LlmProvider::Google,
        };

        let llm = LlmConfig {
            provider,
            model: get("LLM_MODEL"),
            google_api_key: get("GOOGLE_API_KEY"),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            ollama_base_url: get("OLLAMA_BASE_URL")
                .unwrap_or_else(|| "http://localhost:11434".to_string()),
        };

        let port = match get("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| PerfScriptError::ConfigError(format!("Invalid PORT: {}", port)))?,
            None => 3000,
        };

        Ok(Self {
            swagger_base_path,
            output,
            k6_language,
            llm,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.swagger_base_path, PathBuf::from("."));
        assert_eq!(config.output.output_dir, PathBuf::from("./generated"));
        assert!(config.output.project_dir.is_none());
        assert_eq!(config.k6_language, K6Language::JavaScript);
        assert_eq!(config.llm.provider, LlmProvider::Google);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_base_path_fallback_and_project_dir() {
        let config = config_from(&[
            ("BASE_PATH", "/srv/swagger"),
            ("PROJECT_BASE_PATH", "/work"),
            ("PROJECT_NAME", "shop-perf"),
            ("K6_LANGUAGE", "ts"),
            ("LLM_PROVIDER", "ollama"),
        ])
        .unwrap();
        assert_eq!(config.swagger_base_path, PathBuf::from("/srv/swagger"));
        assert_eq!(
            config.output.project_dir,
            Some(PathBuf::from("/work/shop-perf"))
        );
        assert_eq!(config.k6_language, K6Language::TypeScript);
        assert_eq!(config.llm.provider, LlmProvider::Ollama);
    }

    #[test]
    fn test_swagger_base_path_wins_over_base_path() {
        let config = config_from(&[("BASE_PATH", "/a"), ("SWAGGER_BASE_PATH", "/b")]).unwrap();
        assert_eq!(config.swagger_base_path, PathBuf::from("/b"));
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        assert!(matches!(
            config_from(&[("LLM_PROVIDER", "bedrock")]),
            Err(PerfScriptError::ConfigError(_))
        ));
        assert!(matches!(
            config_from(&[("K6_LANGUAGE", "lua")]),
            Err(PerfScriptError::ConfigError(_))
        ));
        assert!(matches!(
            config_from(&[("PORT", "http")]),
            Err(PerfScriptError::ConfigError(_))
        ));
    }
}
