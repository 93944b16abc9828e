//! Wire types for the OpenAI-compatible chat-completion API

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Typed failures from the completion provider
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("completion request timed out after {0}s")]
    Timeout(u64),

    #[error("provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("malformed completion response: {0}")]
    Malformed(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl LlmError {
    /// Whether a retry could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Timeout(_) => true,
            LlmError::Provider { status, .. } => *status == 429 || *status >= 500,
            LlmError::Malformed(_) => false,
            LlmError::Transport(_) => true,
        }
    }
}

/// One message in a completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".to_string(), content: content.into() }
    }
}

/// Request body for POST {api_base}/chat/completions
#[derive(Debug, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Response body from the provider
#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub content: Option<String>,
}

/// Error body some providers return alongside non-2xx statuses
#[derive(Debug, Deserialize)]
pub struct ProviderErrorBody {
    #[serde(default)]
    pub error: Option<ProviderErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderErrorDetail {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        assert_eq!(ChatMessage::system("x").role, "system");
        assert_eq!(ChatMessage::user("x").role, "user");
        assert_eq!(ChatMessage::assistant("x").role, "assistant");
    }

    #[test]
    fn test_error_retryability() {
        assert!(LlmError::Timeout(30).is_retryable());
        assert!(LlmError::Provider { status: 429, message: String::new() }.is_retryable());
        assert!(LlmError::Provider { status: 503, message: String::new() }.is_retryable());
        assert!(!LlmError::Provider { status: 401, message: String::new() }.is_retryable());
        assert!(!LlmError::Malformed("empty".into()).is_retryable());
    }

    #[test]
    fn test_completion_response_parsing() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"hi"}}]}"#;
        let resp: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.choices[0].message.content.as_deref(), Some("hi"));
    }
}
