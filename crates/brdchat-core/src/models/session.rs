//! Chat session and message models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A conversation thread identified by an opaque token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub session_token: String,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            session_token: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Single message in a session, immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub session_id: String,
    pub content: String,
    pub from_agent: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(session_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::create(session_id, content, false)
    }

    /// Create an agent reply message
    pub fn agent(session_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::create(session_id, content, true)
    }

    fn create(session_id: impl Into<String>, content: impl Into<String>, from_agent: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            content: content.into(),
            from_agent,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_get_distinct_tokens() {
        let a = ChatSession::new();
        let b = ChatSession::new();
        assert_ne!(a.session_token, b.session_token);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn message_constructors_set_origin_flag() {
        let user = ChatMessage::user("s1", "hello");
        let agent = ChatMessage::agent("s1", "hi there");
        assert!(!user.from_agent);
        assert!(agent.from_agent);
        assert_eq!(user.session_id, agent.session_id);
    }
}
