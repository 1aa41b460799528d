//! # REST API for Reconciliation Calculations
//!
//! Stateless endpoints behind the wizard screens: the denomination table, the
//! raw breakdown calculator and live totals for a list of boxes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error_response;
use super::mappers::{CashBoxMapper, ReconciliationMapper};
use crate::AppState;
use shared::{BreakdownTotalRequest, ReconciliationRequest};

/// List the denomination table
pub async fn list_denominations(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/denominations");

    let denominations = state.reconciliation_service.denominations();
    (
        StatusCode::OK,
        Json(ReconciliationMapper::to_denomination_list_dto(denominations)),
    )
}

/// Totals, date groups and denomination summary for posted boxes
pub async fn summarize_reconciliation(
    State(state): State<AppState>,
    Json(request): Json<ReconciliationRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/reconciliation/summary - {} cash boxes",
        request.cash_boxes.len()
    );

    let cash_boxes = match CashBoxMapper::to_domain_list(&request.cash_boxes) {
        Ok(cash_boxes) => cash_boxes,
        Err(e) => return error_response("Failed to read cash boxes", e),
    };
    let summary = state.reconciliation_service.summarize(&cash_boxes);

    (StatusCode::OK, Json(ReconciliationMapper::to_summary_dto(&summary))).into_response()
}

/// Raw breakdown calculator
pub async fn calculate_breakdown_total(
    State(state): State<AppState>,
    Json(request): Json<BreakdownTotalRequest>,
) -> impl IntoResponse {
    info!("POST /api/breakdown/total - {} entries", request.breakdown.len());

    let result = state.reconciliation_service.breakdown_total(&request.breakdown);
    (StatusCode::OK, Json(ReconciliationMapper::to_breakdown_total_dto(result)))
}
