//! Agent client trait and the HTTP implementation.

use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde_json::json;

use crate::agent::extract_agent_id;
use crate::error::{CoreError, Result};

/// Finite, single-pass sequence of reply text fragments in arrival order
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Remote conversational-agent service
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Send user text under a session token. The reply arrives
    /// incrementally; an `Err` item ends the stream.
    async fn invoke(&self, input: &str, session_token: &str) -> Result<FragmentStream>;
}

/// HTTP client for the remote agent endpoint
pub struct HttpAgentClient {
    client: reqwest::Client,
    base_url: String,
    agent_id: String,
    agent_alias_id: String,
}

impl HttpAgentClient {
    pub fn new(base_url: impl Into<String>, agent_id: &str, agent_alias_id: &str) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            agent_id: extract_agent_id(agent_id),
            agent_alias_id: extract_agent_id(agent_alias_id),
        }
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn invoke(&self, input: &str, session_token: &str) -> Result<FragmentStream> {
        let url = format!(
            "{}/agents/{}/aliases/{}/invoke",
            self.base_url, self.agent_id, self.agent_alias_id
        );
        tracing::debug!(
            agent_id = %self.agent_id,
            alias_id = %self.agent_alias_id,
            "Invoking remote agent"
        );

        let response = self
            .client
            .post(&url)
            .json(&json!({ "inputText": input, "sessionId": session_token }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CoreError::Agent(format!(
                "Agent returned status: {}",
                response.status()
            )));
        }

        let fragments = response.bytes_stream().map(|chunk| match chunk {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => Err(CoreError::Http(e)),
        });

        Ok(Box::pin(fragments))
    }
}
