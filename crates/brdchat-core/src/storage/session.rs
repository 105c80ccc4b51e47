//! Session and message store.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::{CoreError, Result};
use crate::models::{ChatMessage, ChatSession};

/// In-memory session store, keyed by the public session token. Messages are
/// kept per internal session id in insertion order.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, ChatSession>>,
    messages: RwLock<HashMap<String, Vec<ChatMessage>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with a fresh token
    pub fn create(&self) -> ChatSession {
        let session = ChatSession::new();
        self.messages
            .write()
            .insert(session.id.clone(), Vec::new());
        self.sessions
            .write()
            .insert(session.session_token.clone(), session.clone());
        session
    }

    pub fn get(&self, session_token: &str) -> Option<ChatSession> {
        self.sessions.read().get(session_token).cloned()
    }

    /// Append a message to a session's history
    pub fn add_message(
        &self,
        session_token: &str,
        content: impl Into<String>,
        from_agent: bool,
    ) -> Result<ChatMessage> {
        let session = self
            .get(session_token)
            .ok_or_else(|| CoreError::SessionNotFound(session_token.to_string()))?;

        let message = if from_agent {
            ChatMessage::agent(session.id.clone(), content)
        } else {
            ChatMessage::user(session.id.clone(), content)
        };

        self.messages
            .write()
            .entry(session.id)
            .or_default()
            .push(message.clone());

        Ok(message)
    }

    /// Ordered message history; empty for an unknown token
    pub fn messages(&self, session_token: &str) -> Vec<ChatMessage> {
        let Some(session) = self.get(session_token) else {
            return Vec::new();
        };
        self.messages
            .read()
            .get(&session.id)
            .cloned()
            .unwrap_or_default()
    }
}
