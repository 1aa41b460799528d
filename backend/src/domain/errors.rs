//! Errors returned by the domain services.
//!
//! Validation problems keep their own typed errors; the REST layer only needs
//! to know which family an error belongs to in order to pick a status code.

use crate::domain::models::{
    CashBoxValidationError, NameValidationError, ReportValidationError, SessionValidationError,
};
use crate::domain::wizard::WizardError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Session(#[from] SessionValidationError),
    #[error(transparent)]
    Name(#[from] NameValidationError),
    #[error(transparent)]
    Report(#[from] ReportValidationError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error("Cash box at index {index}: {source}")]
    InvalidCashBox {
        index: usize,
        source: CashBoxValidationError,
    },
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(what: &str, id: i64) -> Self {
        ServiceError::NotFound(format!("{} {} not found", what, id))
    }

    /// True for errors caused by the request rather than by the backend
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ServiceError::Session(_)
                | ServiceError::Name(_)
                | ServiceError::Report(_)
                | ServiceError::Wizard(_)
                | ServiceError::InvalidCashBox { .. }
        )
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
