//! Report listing and content endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use brdchat_core::CoreError;
use brdchat_core::models::Report;
use brdchat_core::services::reports;
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Debug, Serialize)]
pub struct ReportContentResponse {
    pub report: Report,
    pub content: String,
}

// GET /api/reports
//
// Runs a sync pass against the remote listing before returning.
pub async fn list_reports(State(state): State<AppState>) -> Json<Vec<Report>> {
    Json(reports::sync(&state).await)
}

// GET /api/reports/{id}/content
pub async fn report_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReportContentResponse>, (StatusCode, String)> {
    match reports::content(&state, &id).await {
        Ok((report, content)) => Ok(Json(ReportContentResponse { report, content })),
        Err(CoreError::ReportNotFound(_)) => {
            Err((StatusCode::NOT_FOUND, format!("Report {} not found", id)))
        }
        Err(e) => {
            tracing::error!("Failed to fetch report content: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get report content".to_string(),
            ))
        }
    }
}
