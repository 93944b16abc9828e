use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;

use super::i18n::get_locale;
use crate::services::llm::LlmError;

/// API Error with rich context and automatic error trait implementations
///
/// Design: Uses thiserror for ergonomic error handling with context.
/// Each variant carries meaningful context to help with debugging.
#[derive(Error, Debug)]
pub enum ApiError {
    // Validation errors 4xxx
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // System errors 5xxx
    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Dataset error: {0}")]
    DatasetError(String),

    // Upstream service errors 7xxx (completion provider, plan generator)
    #[error("Upstream request timed out after {0}s")]
    UpstreamTimeout(u64),

    #[error("Upstream service error (status {status}): {message}")]
    UpstreamError { status: u16, message: String },

    #[error("Malformed upstream response: {0}")]
    UpstreamMalformed(String),

    // Generic wrapper for other errors - auto-convert from anyhow::Error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Helper to create validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Helper to create invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Helper to create internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    /// Helper to create dataset error
    pub fn dataset_error(message: impl Into<String>) -> Self {
        Self::DatasetError(message.into())
    }

    /// Stable numeric error code per variant
    pub fn error_code(&self) -> i32 {
        match self {
            // Validation errors 4xxx
            Self::ValidationError(_) => 4001,
            Self::InvalidInput(_) => 4002,

            // System errors 5xxx
            Self::InternalError(_) => 5001,
            Self::DatasetError(_) => 5002,
            Self::Other(_) => 5001,

            // Upstream provider errors 7xxx
            Self::UpstreamTimeout(_) => 7001,
            Self::UpstreamError { .. } => 7002,
            Self::UpstreamMalformed(_) => 7003,
        }
    }

    /// Whether a retry against the provider could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamTimeout(_) | Self::UpstreamError { .. })
    }
}

/// Error response body returned to the client
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get localized error message based on current locale
    ///
    /// Internal detail (provider messages, dataset paths) is logged
    /// server-side and never leaked here.
    pub fn localized_message(&self) -> String {
        let locale = get_locale();
        match self {
            Self::ValidationError(details) => {
                t!("validation.failed", locale = &locale, details = details).to_string()
            }
            Self::InvalidInput(msg) => msg.clone(),
            Self::InternalError(_) | Self::DatasetError(_) | Self::Other(_) => {
                t!("internal.error", locale = &locale).to_string()
            }
            Self::UpstreamTimeout(_) => t!("upstream.timeout", locale = &locale).to_string(),
            Self::UpstreamError { .. } => t!("upstream.error", locale = &locale).to_string(),
            Self::UpstreamMalformed(_) => t!("upstream.malformed", locale = &locale).to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log the real error server-side; the client only sees the
        // localized generic message.
        tracing::error!("API error ({}): {}", self.error_code(), self);

        let code = self.error_code();
        let message = self.localized_message();

        let status = match &self {
            Self::ValidationError(_) | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::UpstreamError { .. } | Self::UpstreamMalformed(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let response = ApiErrorResponse { code, message, details: None };

        (status, Json(response)).into_response()
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Timeout(secs) => ApiError::UpstreamTimeout(secs),
            LlmError::Provider { status, message } => ApiError::UpstreamError { status, message },
            LlmError::Malformed(msg) => ApiError::UpstreamMalformed(msg),
            LlmError::Transport(e) => ApiError::UpstreamError {
                status: 0,
                message: e.to_string(),
            },
        }
    }
}

/// Implement From for serde_json::Error
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal_error(format!("JSON serialization error: {}", err))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::validation_error("bad").error_code(), 4001);
        assert_eq!(ApiError::internal_error("boom").error_code(), 5001);
        assert_eq!(ApiError::UpstreamTimeout(30).error_code(), 7001);
        assert_eq!(
            ApiError::UpstreamError { status: 500, message: "x".into() }.error_code(),
            7002
        );
    }

    #[test]
    fn test_retryable() {
        assert!(ApiError::UpstreamTimeout(30).is_retryable());
        assert!(ApiError::UpstreamError { status: 429, message: "slow down".into() }.is_retryable());
        assert!(!ApiError::validation_error("bad").is_retryable());
        assert!(!ApiError::UpstreamMalformed("no choices".into()).is_retryable());
    }

    #[test]
    fn test_llm_error_conversion() {
        let err: ApiError = LlmError::Timeout(60).into();
        assert!(matches!(err, ApiError::UpstreamTimeout(60)));

        let err: ApiError = LlmError::Malformed("empty choices".into()).into();
        assert!(matches!(err, ApiError::UpstreamMalformed(_)));
    }
}
