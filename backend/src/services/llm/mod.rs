//! Completion-provider integration
//!
//! The dispatcher only depends on the [`CompletionBackend`] trait; the
//! concrete [`CompletionClient`] speaks the OpenAI-compatible wire format
//! used by OpenRouter and most hosted or local providers.

mod client;
mod models;
pub mod prompts;

pub use client::{CompletionBackend, CompletionClient};
pub use models::{ChatMessage, LlmError};
