//! Scripted agent client for tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::agent::client::{AgentClient, FragmentStream};
use crate::error::{CoreError, Result};

/// One scripted reply; consumed in order, one per `invoke`
pub enum MockReply {
    /// Stream these fragments, then end
    Fragments(Vec<String>),
    /// Fail before any fragment is produced
    RequestError(String),
    /// Stream some fragments, then fail mid-stream
    MidStreamError {
        fragments: Vec<String>,
        message: String,
    },
}

impl MockReply {
    pub fn fragments(fragments: &[&str]) -> Self {
        Self::Fragments(fragments.iter().map(|f| f.to_string()).collect())
    }
}

/// Agent client that replays a script; an exhausted script yields empty
/// replies
pub struct MockAgentClient {
    script: Mutex<VecDeque<MockReply>>,
}

impl MockAgentClient {
    pub fn from_steps(steps: Vec<MockReply>) -> Self {
        Self {
            script: Mutex::new(steps.into()),
        }
    }

    /// Single reply delivered as the given fragments
    pub fn replying(fragments: &[&str]) -> Self {
        Self::from_steps(vec![MockReply::fragments(fragments)])
    }

    /// Single invocation failing with the given reason
    pub fn failing(message: &str) -> Self {
        Self::from_steps(vec![MockReply::RequestError(message.to_string())])
    }
}

#[async_trait]
impl AgentClient for MockAgentClient {
    async fn invoke(&self, _input: &str, _session_token: &str) -> Result<FragmentStream> {
        let step = self.script.lock().pop_front();
        match step {
            None => Ok(Box::pin(futures::stream::empty())),
            Some(MockReply::Fragments(fragments)) => Ok(Box::pin(futures::stream::iter(
                fragments.into_iter().map(Ok),
            ))),
            Some(MockReply::RequestError(message)) => Err(CoreError::Agent(message)),
            Some(MockReply::MidStreamError { fragments, message }) => {
                let items: Vec<Result<String>> = fragments
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(CoreError::Agent(message))))
                    .collect();
                Ok(Box::pin(futures::stream::iter(items)))
            }
        }
    }
}
