use super::{ChatModel, ChatResponse, check_status, transport_error};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Local Ollama server, non-streaming `/api/chat`
pub struct OllamaChatModel {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaChatModel {
    pub fn new(client: reqwest::Client, base_url: String, model: String) -> Self {
        Self {
            client,
            base_url,
            model,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
    options: Options,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct Options {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    message: Option<ReplyMessage>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: String,
}

fn extract_text(reply: ChatReply) -> Option<String> {
    reply.message.map(|m| m.content).filter(|text| !text.is_empty())
}

#[async_trait]
impl ChatModel for OllamaChatModel {
    async fn invoke(&self, system: &str, prompt: &str) -> Result<ChatResponse> {
        let body = ChatRequest {
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
            stream: false,
            options: Options { temperature: 0.0 },
        };

        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let parsed: ChatReply = check_status(response)
            .await?
            .json()
            .await
            .map_err(transport_error)?;

        Ok(ChatResponse {
            content: extract_text(parsed),
        })
    }
}
