//! # REST API for the Audit Wizard
//!
//! The client keeps the wizard state and posts it back with each action; the
//! server applies the transition and returns the new state.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error_response;
use super::mappers::WizardMapper;
use crate::domain::wizard::transition;
use crate::domain::ServiceError;
use shared::{WizardTransitionRequest, WizardTransitionResponse};

/// Apply one action to a wizard state
pub async fn wizard_transition(Json(request): Json<WizardTransitionRequest>) -> impl IntoResponse {
    info!("POST /api/wizard/transition - action: {:?}", request.action);

    let result = WizardMapper::to_state(&request.state).and_then(|state| {
        let action = WizardMapper::to_action(request.action)?;
        transition(&state, action).map_err(ServiceError::from)
    });

    match result {
        Ok(next) => (
            StatusCode::OK,
            Json(WizardTransitionResponse {
                state: WizardMapper::to_state_dto(&next),
            }),
        )
            .into_response(),
        Err(e) => error_response("Rejected wizard action", e),
    }
}
