//! Language-model clients
//!
//! One `ChatModel` call per generation: a system instruction plus a single
//! user prompt, no retries and no streaming.

mod google;
mod ollama;
mod openai;

pub use google::GoogleChatModel;
pub use ollama::OllamaChatModel;
pub use openai::OpenAiChatModel;

use crate::config::LlmConfig;
use crate::error::{PerfScriptError, Result};
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Text returned by a provider. `content` is `None` when the response carried no text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatResponse {
    pub content: Option<String>,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn invoke(&self, system: &str, prompt: &str) -> Result<ChatResponse>;
}

/// Supported providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Google,
    OpenAi,
    Ollama,
}

impl LlmProvider {
    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::Google => "google",
            LlmProvider::OpenAi => "openai",
            LlmProvider::Ollama => "ollama",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Google => "gemini-2.5-flash",
            LlmProvider::OpenAi => "gpt-4o",
            LlmProvider::Ollama => "llama3",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = PerfScriptError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "google" | "gemini" => Ok(LlmProvider::Google),
            "openai" => Ok(LlmProvider::OpenAi),
            "ollama" => Ok(LlmProvider::Ollama),
            other => Err(PerfScriptError::ConfigError(format!(
                "Unsupported LLM_PROVIDER: {}. Supported: google, openai, ollama",
                other
            ))),
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build the configured chat model. Missing credentials are a startup error.
pub fn create_chat_model(config: &LlmConfig) -> Result<Arc<dyn ChatModel>> {
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| config.provider.default_model().to_string());

    let client = reqwest::Client::builder()
        .build()
        .map_err(|e| PerfScriptError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

    tracing::info!(provider = %config.provider, model = %model, "Language model configured");

    Ok(match config.provider {
        LlmProvider::Google => {
            let api_key = config.google_api_key.clone().ok_or_else(|| {
                PerfScriptError::ConfigError("GOOGLE_API_KEY is required for provider google".to_string())
            })?;
            Arc::new(GoogleChatModel::new(client, api_key, model))
        }
        LlmProvider::OpenAi => {
            let api_key = config.openai_api_key.clone().ok_or_else(|| {
                PerfScriptError::ConfigError("OPENAI_API_KEY is required for provider openai".to_string())
            })?;
            Arc::new(OpenAiChatModel::new(
                client,
                config.openai_base_url.clone(),
                api_key,
                model,
            ))
        }
        LlmProvider::Ollama => Arc::new(OllamaChatModel::new(
            client,
            config.ollama_base_url.clone(),
            model,
        )),
    })
}

/// Turn a non-success HTTP status into an `LlmError` carrying the body
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PerfScriptError::LlmError(format!("{}: {}", status, body)))
}

pub(crate) fn transport_error(err: reqwest::Error) -> PerfScriptError {
    PerfScriptError::LlmError(err.to_string())
}
