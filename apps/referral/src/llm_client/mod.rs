//! LLM Client: the single point of entry for all model calls in Referral.
//!
//! ARCHITECTURAL RULE: No other module may talk to the model server directly.
//! Pipeline steps depend on the `ChatModel` trait only; `OllamaClient` is the
//! production implementation.
//!
//! Model: llama3 (hardcoded, not configurable)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

#[cfg(test)]
pub mod stub;

/// The model used for all LLM calls in Referral.
pub const MODEL: &str = "llama3";
const CHAT_PATH: &str = "/api/chat";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged message in an ordered chat exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Send ordered role-tagged messages, get back free text.
///
/// The returned text is opaque: callers store it as-is.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct OllamaResponse {
    pub message: OllamaMessage,
    pub prompt_eval_count: Option<u32>,
    pub eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct OllamaMessage {
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaError {
    error: String,
}

/// Chat client for an Ollama server.
///
/// No request timeout is set; a slow model blocks the run until the server answers.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn chat_url(&self) -> String {
        format!("{}{}", self.base_url, CHAT_PATH)
    }
}

#[async_trait]
impl ChatModel for OllamaClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let request_body = OllamaRequest {
            model: MODEL,
            messages,
            stream: false,
        };

        let response = self
            .client
            .post(self.chat_url())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<OllamaError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: OllamaResponse = serde_json::from_str(&body)?;

        debug!(
            "LLM call succeeded: prompt_tokens={:?}, completion_tokens={:?}",
            reply.prompt_eval_count, reply.eval_count
        );

        Ok(reply.message.content)
    }
}
