//! Agent relay: forwards user text to the remote agent, streams the reply,
//! and records the conversation.

use std::pin::Pin;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::AppCore;
use crate::error::{CoreError, Result};
use crate::models::{ChatMessage, Report};

/// First markdown-filename-like substring in a reply. Best effort; false
/// positives inside unrelated prose are accepted.
static REPORT_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)report.*?\.md").expect("valid regex"));

/// Result of a non-streaming relay call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayOutcome {
    pub message: ChatMessage,
    pub report_path: Option<String>,
}

/// Event on the streaming relay path
pub enum RelayEvent {
    /// Reply fragment, emitted in arrival order
    Fragment(String),
    /// Final event once the full reply is persisted
    Done {
        message: ChatMessage,
        report_path: Option<String>,
    },
}

pub type RelayStream = Pin<Box<dyn Stream<Item = RelayEvent> + Send>>;

/// A failed upstream attempt, kept in attempt order
#[derive(Debug, Clone)]
pub struct RelayFailure {
    pub source: &'static str,
    pub reason: String,
}

/// Relay user text to the agent and wait for the full reply.
pub async fn relay(
    core: &Arc<AppCore>,
    session_token: &str,
    content: &str,
) -> Result<RelayOutcome> {
    let mut stream = relay_stream(core, session_token, content).await?;
    while let Some(event) = stream.next().await {
        if let RelayEvent::Done {
            message,
            report_path,
        } = event
        {
            return Ok(RelayOutcome {
                message,
                report_path,
            });
        }
    }
    Err(CoreError::Agent(
        "Relay stream ended without completing".to_string(),
    ))
}

/// Relay user text and emit reply fragments as they arrive. The same
/// fragment sequence that feeds the caller is accumulated into the persisted
/// reply, so the non-streaming path is a fold of this stream; the upstream
/// call is never duplicated.
pub async fn relay_stream(
    core: &Arc<AppCore>,
    session_token: &str,
    content: &str,
) -> Result<RelayStream> {
    core.storage
        .sessions
        .add_message(session_token, content, false)?;

    let core = core.clone();
    let session_token = session_token.to_string();
    let content = content.to_string();

    Ok(Box::pin(async_stream::stream! {
        let mut reply = String::new();
        let mut failures: Vec<RelayFailure> = Vec::new();

        match core.agent.invoke(&content, &session_token).await {
            Ok(mut fragments) => {
                let mut agent_failed = false;
                while let Some(fragment) = fragments.next().await {
                    match fragment {
                        Ok(text) => {
                            reply.push_str(&text);
                            yield RelayEvent::Fragment(text);
                        }
                        Err(e) => {
                            failures.push(RelayFailure { source: "Agent", reason: e.to_string() });
                            agent_failed = true;
                            break;
                        }
                    }
                }
                if agent_failed {
                    // Fragments already emitted are not retracted; the
                    // persisted reply is replaced wholesale.
                    reply = fallback_reply(&core, &content, &mut failures).await;
                    yield RelayEvent::Fragment(reply.clone());
                }
            }
            Err(e) => {
                failures.push(RelayFailure { source: "Agent", reason: e.to_string() });
                reply = fallback_reply(&core, &content, &mut failures).await;
                yield RelayEvent::Fragment(reply.clone());
            }
        }

        let report_path = register_report_reference(&core, &reply);

        match core.storage.sessions.add_message(&session_token, &reply, true) {
            Ok(message) => yield RelayEvent::Done { message, report_path },
            Err(e) => tracing::error!("Failed to persist agent reply: {}", e),
        }
    }))
}

/// Try the local fallback; when it also fails, compose the degraded reply.
async fn fallback_reply(
    core: &AppCore,
    content: &str,
    failures: &mut Vec<RelayFailure>,
) -> String {
    if let Some(failure) = failures.last() {
        tracing::warn!("Agent call failed, trying fallback: {}", failure.reason);
    }

    match core.fallback.invoke(content).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("Fallback also failed: {}", e);
            failures.push(RelayFailure {
                source: "Fallback",
                reason: e.to_string(),
            });
            degraded_reply(content, failures)
        }
    }
}

/// Degraded-mode reply, a pure function of the user text and the ordered
/// failure list. The user always receives some reply text, even if it is an
/// explanation of the outage.
fn degraded_reply(content: &str, failures: &[RelayFailure]) -> String {
    let mut reply = format!(
        "I received your message: \"{}\"\n\nThe agent service and its fallback are currently unavailable:\n",
        content
    );
    for failure in failures {
        reply.push_str(&format!("\u{2022} {} error: {}\n", failure.source, failure.reason));
    }
    reply.push_str("\nPlease try again later or contact support.");
    reply
}

/// Scan a reply for a markdown report reference and register it once. The
/// stored key derives from the match; an existing report with that key is
/// left alone.
fn register_report_reference(core: &AppCore, reply: &str) -> Option<String> {
    let matched = REPORT_REF.find(reply)?.as_str().to_string();
    let storage_key = format!("reports/{}", matched);

    if core.storage.reports.find_by_key(&storage_key).is_none() {
        tracing::debug!(path = %matched, "Registering report referenced by the agent reply");
        let report = Report::new(&matched, &storage_key)
            .with_description("Generated report from agent analysis");
        core.storage.reports.create(report);
    }

    Some(matched)
}
