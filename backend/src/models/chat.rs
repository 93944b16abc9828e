//! Chat API request/response models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Conversational intent of a request. The wire value is a free string;
/// unknown values fall back to the general assistant persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMode {
    Symptom,
    Qa,
    Food,
    Explore,
    General,
}

impl ChatMode {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "symptom" => ChatMode::Symptom,
            "qa" => ChatMode::Qa,
            "food" => ChatMode::Food,
            "explore" => ChatMode::Explore,
            _ => ChatMode::General,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChatMode::Symptom => "symptom",
            ChatMode::Qa => "qa",
            ChatMode::Food => "food",
            ChatMode::Explore => "explore",
            ChatMode::General => "general",
        }
    }
}

/// Body of POST /api/chat
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChatRequest {
    /// Client-chosen conversation identifier
    #[validate(length(min = 1, max = 128, message = "session_id must be 1-128 characters"))]
    pub session_id: String,

    /// The user's message
    #[validate(length(min = 1, max = 4000, message = "prompt must be 1-4000 characters"))]
    pub prompt: String,

    /// One of "symptom", "qa", "food", "explore"; anything else is treated
    /// as a general chat
    pub chat_type: String,
}

impl ChatRequest {
    pub fn mode(&self) -> ChatMode {
        ChatMode::parse(&self.chat_type)
    }
}

/// Body of the chat response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!(ChatMode::parse("symptom"), ChatMode::Symptom);
        assert_eq!(ChatMode::parse("QA"), ChatMode::Qa);
        assert_eq!(ChatMode::parse(" food "), ChatMode::Food);
        assert_eq!(ChatMode::parse("explore"), ChatMode::Explore);
    }

    #[test]
    fn test_unknown_mode_falls_back_to_general() {
        assert_eq!(ChatMode::parse(""), ChatMode::General);
        assert_eq!(ChatMode::parse("workout"), ChatMode::General);
        assert_eq!(ChatMode::parse("default"), ChatMode::General);
    }

    #[test]
    fn test_request_validation() {
        use validator::Validate;

        let ok = ChatRequest {
            session_id: "s1".into(),
            prompt: "hello".into(),
            chat_type: "qa".into(),
        };
        assert!(ok.validate().is_ok());

        let empty_prompt = ChatRequest {
            session_id: "s1".into(),
            prompt: String::new(),
            chat_type: "qa".into(),
        };
        assert!(empty_prompt.validate().is_err());
    }
}
