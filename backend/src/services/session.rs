//! Per-session conversation history
//!
//! Shared state for the completion dispatcher. Storage grows for the
//! process lifetime, but only the most recent window of turns is ever read
//! per request. Access to one session is serialized behind an async mutex;
//! different sessions proceed fully in parallel.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;

/// How many recent turns enter a completion request
pub const RECENT_WINDOW: usize = 6;

/// Role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One message in a session's history
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into(), created_at: Utc::now() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into(), created_at: Utc::now() }
    }
}

/// Handle to one session's serialized history
pub type SessionHandle = Arc<Mutex<Vec<Turn>>>;

/// Process-wide session map. Sessions are created on first reference and
/// never destroyed; history is in-memory only and does not survive restart.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, SessionHandle>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the handle for `session_id`.
    pub fn session(&self, session_id: &str) -> SessionHandle {
        self.sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Vec::new())))
            .clone()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

/// The most recent `RECENT_WINDOW` turns, oldest first.
pub fn recent_turns(history: &[Turn]) -> &[Turn] {
    let start = history.len().saturating_sub(RECENT_WINDOW);
    &history[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_created_on_first_reference() {
        let store = SessionStore::new();
        assert_eq!(store.session_count(), 0);

        let handle = store.session("abc");
        assert_eq!(store.session_count(), 1);
        assert!(handle.lock().await.is_empty());

        // Same id returns the same underlying history
        let again = store.session("abc");
        again.lock().await.push(Turn::user("hello"));
        assert_eq!(handle.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_recent_window_bounds_reads() {
        let store = SessionStore::new();
        let handle = store.session("s");
        {
            let mut history = handle.lock().await;
            for i in 0..10 {
                history.push(Turn::user(format!("message {}", i)));
            }
        }

        let history = handle.lock().await;
        let recent = recent_turns(&history);
        assert_eq!(recent.len(), RECENT_WINDOW);
        assert_eq!(recent[0].content, "message 4");
        assert_eq!(recent[5].content, "message 9");
        // Full history is retained in storage
        assert_eq!(history.len(), 10);
    }

    #[test]
    fn test_recent_window_short_history() {
        let history = vec![Turn::user("only one")];
        assert_eq!(recent_turns(&history).len(), 1);
    }
}
