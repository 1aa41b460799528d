//! # REST API for Picker Names

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::info;

use super::error_response;
use super::mappers::NameMapper;
use crate::AppState;
use shared::{CreateNameRequest, NameType};

#[derive(Debug, Deserialize)]
pub struct NameParams {
    #[serde(rename = "type")]
    pub name_type: NameType,
}

/// Active names of one type
pub async fn list_names(
    State(state): State<AppState>,
    Query(params): Query<NameParams>,
) -> impl IntoResponse {
    info!("GET /api/names?type={:?}", params.name_type);

    match state.name_service.list_active(NameMapper::to_kind(params.name_type)).await {
        Ok(names) => (StatusCode::OK, Json(NameMapper::to_list_dto(&names))).into_response(),
        Err(e) => error_response("Failed to list names", e),
    }
}

/// Add a name. 201 when created, 200 when a removed name was reactivated.
pub async fn add_name(
    State(state): State<AppState>,
    Json(request): Json<CreateNameRequest>,
) -> impl IntoResponse {
    info!("POST /api/names - request: {:?}", request);

    match state.name_service.add_name(NameMapper::to_command(request)).await {
        Ok(result) => {
            let status = if result.reactivated {
                StatusCode::OK
            } else {
                StatusCode::CREATED
            };
            (status, Json(NameMapper::to_dto(&result.name))).into_response()
        }
        Err(e) => error_response("Failed to add name", e),
    }
}

/// Remove a name from its picker list
pub async fn delete_name(
    State(state): State<AppState>,
    Path(name_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/names/{}", name_id);

    match state.name_service.deactivate(name_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Failed to delete name", e),
    }
}
