//! Deterministic `ChatModel` for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{ChatMessage, ChatModel, LlmError};

/// Returns `responses[i]` for the i-th call and records every exchange it receives.
/// Calls past the end of `responses` fail with a 503 `LlmError::Api`.
pub struct StubModel {
    responses: Vec<String>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl StubModel {
    pub fn new<S: Into<String>>(responses: impl IntoIterator<Item = S>) -> Self {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A backend that rejects every call.
    pub fn failing() -> Self {
        Self::new(Vec::<String>::new())
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatModel for StubModel {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        calls.push(messages.to_vec());

        self.responses
            .get(index)
            .cloned()
            .ok_or_else(|| LlmError::Api {
                status: 503,
                message: "stub backend unavailable".to_string(),
            })
    }
}
