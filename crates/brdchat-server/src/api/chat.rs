//! Chat session and relay endpoints.

use axum::{
    Json,
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::Response,
};
use brdchat_core::CoreError;
use brdchat_core::models::{ChatMessage, ChatSession};
use brdchat_core::services::chat::{self, RelayEvent, RelayOutcome};
use futures::StreamExt;
use serde::Deserialize;

use crate::api::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

// POST /api/chat/session
pub async fn create_session(State(state): State<AppState>) -> Json<ChatSession> {
    let session = state.storage.sessions.create();
    tracing::debug!(token = %session.session_token, "Created chat session");
    Json(session)
}

// GET /api/chat/{session_token}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    Path(session_token): Path<String>,
) -> Json<Vec<ChatMessage>> {
    Json(state.storage.sessions.messages(&session_token))
}

// POST /api/chat/{session_token}/message
pub async fn send_message(
    State(state): State<AppState>,
    Path(session_token): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<RelayOutcome>, (StatusCode, String)> {
    match chat::relay(&state, &session_token, &request.content).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(CoreError::SessionNotFound(token)) => Err((
            StatusCode::NOT_FOUND,
            format!("Session '{}' not found", token),
        )),
        Err(e) => {
            tracing::error!("Relay failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send message to agent".to_string(),
            ))
        }
    }
}

// POST /api/chat/{session_token}/message/stream
//
// Raw reply text, delivered incrementally as it arrives from upstream.
pub async fn send_message_stream(
    State(state): State<AppState>,
    Path(session_token): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Response, (StatusCode, String)> {
    let stream = match chat::relay_stream(&state, &session_token, &request.content).await {
        Ok(stream) => stream,
        Err(CoreError::SessionNotFound(token)) => {
            return Err((
                StatusCode::NOT_FOUND,
                format!("Session '{}' not found", token),
            ));
        }
        Err(e) => {
            tracing::error!("Relay failed: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send message to agent".to_string(),
            ));
        }
    };

    let body = Body::from_stream(stream.filter_map(|event| async move {
        match event {
            RelayEvent::Fragment(text) => Some(Ok::<_, std::convert::Infallible>(text)),
            RelayEvent::Done { .. } => None,
        }
    }));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(body)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use brdchat_core::agent::MockAgentClient;
    use brdchat_core::object_store::MockObjectStore;
    use brdchat_core::{Config, test_core};

    fn test_state(agent: MockAgentClient) -> AppState {
        test_core(agent, MockObjectStore::new(), Config::default())
    }

    #[tokio::test]
    async fn create_session_yields_distinct_tokens() {
        let state = test_state(MockAgentClient::replying(&["unused"]));

        let Json(a) = create_session(State(state.clone())).await;
        let Json(b) = create_session(State(state)).await;
        assert_ne!(a.session_token, b.session_token);
    }

    #[tokio::test]
    async fn send_message_returns_reply_and_history() {
        let state = test_state(MockAgentClient::replying(&["pong"]));
        let Json(session) = create_session(State(state.clone())).await;

        let Json(outcome) = send_message(
            State(state.clone()),
            Path(session.session_token.clone()),
            Json(SendMessageRequest {
                content: "ping".to_string(),
            }),
        )
        .await
        .expect("send should succeed");
        assert_eq!(outcome.message.content, "pong");

        let Json(messages) =
            list_messages(State(state), Path(session.session_token.clone())).await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "ping");
        assert_eq!(messages[1].content, "pong");
    }

    #[tokio::test]
    async fn send_message_rejects_unknown_session() {
        let state = test_state(MockAgentClient::replying(&["unused"]));

        let (status, _) = send_message(
            State(state),
            Path("no-such-token".to_string()),
            Json(SendMessageRequest {
                content: "hi".to_string(),
            }),
        )
        .await
        .expect_err("unknown session should fail");
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn streamed_body_matches_the_relay_reply() {
        let fragments = &["chunk one, ", "chunk two"];
        let streaming_state = test_state(MockAgentClient::replying(fragments));
        let folding_state = test_state(MockAgentClient::replying(fragments));

        let Json(streaming_session) = create_session(State(streaming_state.clone())).await;
        let Json(folding_session) = create_session(State(folding_state.clone())).await;

        let response = send_message_stream(
            State(streaming_state),
            Path(streaming_session.session_token.clone()),
            Json(SendMessageRequest {
                content: "hi".to_string(),
            }),
        )
        .await
        .expect("stream should start");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should stream");
        let streamed = String::from_utf8(bytes.to_vec()).expect("body should be utf-8");

        let Json(outcome) = send_message(
            State(folding_state),
            Path(folding_session.session_token.clone()),
            Json(SendMessageRequest {
                content: "hi".to_string(),
            }),
        )
        .await
        .expect("send should succeed");

        assert_eq!(streamed, outcome.message.content);
        assert_eq!(streamed, "chunk one, chunk two");
    }

    #[tokio::test]
    async fn degraded_reply_is_still_an_ok_response() {
        // Agent scripted to fail; the fallback points at a closed port.
        let config = Config {
            fallback_url: "http://127.0.0.1:9/invocations".to_string(),
            ..Config::default()
        };
        let state = test_core(
            MockAgentClient::failing("agent offline"),
            MockObjectStore::new(),
            config,
        );
        let Json(session) = create_session(State(state.clone())).await;

        let Json(outcome) = send_message(
            State(state),
            Path(session.session_token.clone()),
            Json(SendMessageRequest {
                content: "hi".to_string(),
            }),
        )
        .await
        .expect("chat endpoints always produce a reply");

        assert!(outcome.message.content.contains("agent offline"));
        assert!(outcome.message.content.contains("currently unavailable"));
    }
}
