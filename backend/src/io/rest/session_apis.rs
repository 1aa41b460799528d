//! # REST API for Reconciliation Sessions
//!
//! Endpoints for saving, listing, reading and deleting finished audits.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::info;

use super::error_response;
use super::mappers::SessionMapper;
use crate::domain::commands::sessions::SessionListQuery;
use crate::AppState;
use shared::SaveSessionRequest;

#[derive(Debug, Default, Deserialize)]
pub struct SessionListParams {
    pub limit: Option<u32>,
}

/// Finalize and store a session. 201 when stored, 200 on an idempotent replay.
pub async fn save_session(
    State(state): State<AppState>,
    Json(request): Json<SaveSessionRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/sessions - date: {}, auditor: {}, {} cash boxes",
        request.session_date,
        request.auditor_name,
        request.cash_boxes.len()
    );

    let command = match SessionMapper::to_command(request) {
        Ok(command) => command,
        Err(e) => return error_response("Invalid session request", e),
    };

    match state.session_service.save_session(command).await {
        Ok(result) => {
            let status = if result.created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            (status, Json(SessionMapper::to_save_response(result))).into_response()
        }
        Err(e) => error_response("Failed to save session", e),
    }
}

/// List sessions, newest first
pub async fn list_sessions(
    State(state): State<AppState>,
    Query(params): Query<SessionListParams>,
) -> impl IntoResponse {
    info!("GET /api/sessions - limit: {:?}", params.limit);

    let query = SessionListQuery { limit: params.limit };
    match state.session_service.list_sessions(query).await {
        Ok(sessions) => (StatusCode::OK, Json(SessionMapper::to_list_dto(&sessions))).into_response(),
        Err(e) => error_response("Failed to list sessions", e),
    }
}

/// Get a session with its cash boxes
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/sessions/{}", session_id);

    match state.session_service.get_session(session_id).await {
        Ok(detail) => (StatusCode::OK, Json(SessionMapper::to_detail_dto(&detail))).into_response(),
        Err(e) => error_response("Failed to get session", e),
    }
}

/// Delete a session with its cash boxes and saved reports
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/sessions/{}", session_id);

    match state.session_service.delete_session(session_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Failed to delete session", e),
    }
}
