//! # REST API Interface Layer
//!
//! Axum handlers for the `/api` routes plus the mappers between wire DTOs and
//! domain types.
//!
//! Domain errors become status codes in one place, [`error_response`]:
//! validation problems are 400, missing resources 404, duplicates 409 and
//! storage failures 500. Storage failure details are logged, never returned.

pub mod mappers;
pub mod name_apis;
pub mod reconciliation_apis;
pub mod report_apis;
pub mod session_apis;
pub mod wizard_apis;

pub use name_apis::*;
pub use reconciliation_apis::*;
pub use report_apis::*;
pub use session_apis::*;
pub use wizard_apis::*;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::domain::ServiceError;

pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        err if err.is_validation() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Turn a service error into a plain-text error response
pub fn error_response(context: &str, err: ServiceError) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        error!("{}: {:#}", context, err);
        (status, "Internal server error").into_response()
    } else {
        warn!("{}: {}", context, err);
        (status, err.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests;
