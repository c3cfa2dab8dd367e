// HTTP client for the chat-completions endpoint

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::config::Config;

use super::types::{ChatMessage, ChatRequest, ChatResponse};
use super::{CompletionBackend, CompletionError};

/// Thin transport over `POST {base_url}/chat/completions` with a bearer
/// credential and a bounded request timeout. The credential is held here
/// only; it is never logged.
pub struct CompletionClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: Option<f32>,
    max_completion_tokens: Option<u32>,
}

impl CompletionClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_completion_tokens: config.max_completion_tokens,
        })
    }

    async fn send(&self, messages: Vec<ChatMessage>) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            max_completion_tokens: self.max_completion_tokens,
        };
        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Transport(format!(
                "status {status}: {body}"
            )));
        }

        let decoded: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;
        tracing::debug!(choices = decoded.choices.len(), "received completion response");

        match decoded.reply_text() {
            Some(text) => Ok(text.to_string()),
            None => Err(CompletionError::MalformedReply),
        }
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, CompletionError> {
        self.send(messages).await
    }

    fn name(&self) -> &str {
        "chat-completions"
    }
}
