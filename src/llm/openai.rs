use super::{ChatModel, ChatResponse, check_status, transport_error};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// OpenAI-compatible `chat/completions`
pub struct OpenAiChatModel {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiChatModel {
    pub fn new(client: reqwest::Client, base_url: String, api_key: String, model: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
            model,
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn extract_text(response: CompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()?
        .message
        .content
        .filter(|text| !text.is_empty())
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn invoke(&self, system: &str, prompt: &str) -> Result<ChatResponse> {
        let body = CompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.0,
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let parsed: CompletionResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(transport_error)?;

        Ok(ChatResponse {
            content: extract_text(parsed),
        })
    }
}
