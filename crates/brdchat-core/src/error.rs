//! Error types for the core crate

use thiserror::Error;

/// Core error types
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Session '{0}' not found")]
    SessionNotFound(String),

    #[error("Report '{0}' not found")]
    ReportNotFound(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Fallback error: {0}")]
    Fallback(String),

    #[error("Object store error: {0}")]
    ObjectStore(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
