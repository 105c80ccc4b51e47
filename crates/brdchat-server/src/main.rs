mod api;

use api::chat::{create_session, list_messages, send_message, send_message_stream};
use api::reports::{list_reports, report_content};
use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use brdchat_core::{AppCore, Config};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(serde::Serialize)]
struct Health {
    status: String,
}

async fn health() -> axum::Json<Health> {
    axum::Json(Health {
        status: "brdchat is working!".to_string(),
    })
}

#[tokio::main]
async fn main() {
    // Initialize tracing logger
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,brdchat_server=debug".into()),
        )
        .with_target(false)
        .init();

    tracing::info!("Starting brdchat backend server");

    let config = Config::from_env();
    let addr = format!("{}:{}", config.host, config.port);
    let core = Arc::new(AppCore::new(config));

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(health))
        // Chat sessions and relay
        .route("/api/chat/session", post(create_session))
        .route("/api/chat/{session_token}/messages", get(list_messages))
        .route("/api/chat/{session_token}/message", post(send_message))
        .route(
            "/api/chat/{session_token}/message/stream",
            post(send_message_stream),
        )
        // Reports
        .route("/api/reports", get(list_reports))
        .route("/api/reports/{id}/content", get(report_content))
        .layer(cors)
        .with_state(core);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");

    tracing::info!("brdchat running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
