//! OpenAI-compatible completion client
//!
//! Single-shot, non-streaming chat completions against any provider that
//! speaks the `/chat/completions` wire format (OpenRouter, OpenAI, local
//! servers). Every call carries a bounded timeout and the attribution
//! headers the provider expects.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use uuid::Uuid;

use crate::config::LlmConfig;

use super::models::{
    ChatMessage, CompletionRequest, CompletionResponse, LlmError, ProviderErrorBody,
};

/// Seam between the dispatcher and the provider, so orchestration logic can
/// be tested against a scripted backend.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError>;
}

pub struct CompletionClient {
    http_client: Client,
    config: LlmConfig,
}

impl CompletionClient {
    pub fn new(config: LlmConfig) -> Self {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self { http_client, config }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        let request_id = Uuid::new_v4();
        let body = CompletionRequest {
            model: self.config.model.clone(),
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(
            "Completion request {} -> {} ({} messages)",
            request_id,
            self.config.model,
            body.messages.len()
        );

        let response = self
            .http_client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.app_title)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.config.timeout_secs)
                } else {
                    LlmError::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderErrorBody>(&text)
                .ok()
                .and_then(|b| b.error)
                .map(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or(text);
            tracing::warn!("Completion request {} failed: {} {}", request_id, status, message);
            return Err(LlmError::Provider { status: status.as_u16(), message });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Malformed(format!("invalid JSON body: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::Malformed("response contained no choices".to_string()))?;

        tracing::debug!("Completion request {} ok ({} chars)", request_id, content.len());
        Ok(content)
    }
}
