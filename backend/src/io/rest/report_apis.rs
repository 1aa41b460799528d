//! # REST API for Reports
//!
//! Report data for stored sessions and the archive of generated report content.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::info;

use super::error_response;
use super::mappers::ReportMapper;
use crate::AppState;
use shared::{ReportType, SaveReportRequest};

#[derive(Debug, Deserialize)]
pub struct ReportParams {
    #[serde(rename = "type")]
    pub report_type: ReportType,
}

/// Data for a "by cash box" or "by date" report of a stored session
pub async fn get_report_data(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Query(params): Query<ReportParams>,
) -> impl IntoResponse {
    info!("GET /api/sessions/{}/report?type={}", session_id, params.report_type);

    let kind = ReportMapper::to_kind(params.report_type);
    match state.report_service.build_report(session_id, kind).await {
        Ok(report) => (StatusCode::OK, Json(ReportMapper::to_report_data_dto(&report))).into_response(),
        Err(e) => error_response("Failed to build report", e),
    }
}

/// Store generated report content for a session
pub async fn save_report(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(request): Json<SaveReportRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/sessions/{}/reports - type: {}, {} bytes",
        session_id,
        request.report_type,
        request.content.len()
    );

    let command = ReportMapper::to_command(session_id, request);
    match state.report_service.save_report(command).await {
        Ok(report) => (StatusCode::CREATED, Json(ReportMapper::to_saved_dto(&report))).into_response(),
        Err(e) => error_response("Failed to save report", e),
    }
}

/// Saved reports of a session, newest first
pub async fn list_reports(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/sessions/{}/reports", session_id);

    match state.report_service.list_reports(session_id).await {
        Ok(reports) => (StatusCode::OK, Json(ReportMapper::to_list_dto(&reports))).into_response(),
        Err(e) => error_response("Failed to list reports", e),
    }
}

/// One saved report
pub async fn get_report(
    State(state): State<AppState>,
    Path(report_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/reports/{}", report_id);

    match state.report_service.get_report(report_id).await {
        Ok(report) => (StatusCode::OK, Json(ReportMapper::to_saved_dto(&report))).into_response(),
        Err(e) => error_response("Failed to get report", e),
    }
}
