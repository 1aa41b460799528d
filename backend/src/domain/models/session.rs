use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::cash_box::CashBox;
use crate::domain::reconciliation::{reconcile, Totals};

/// Outcome of a finished reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Balanced,
    Discrepancy,
}

impl SessionStatus {
    pub fn from_totals(totals: &Totals) -> Self {
        if totals.is_balanced() {
            SessionStatus::Balanced
        } else {
            SessionStatus::Discrepancy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Balanced => "balanced",
            SessionStatus::Discrepancy => "discrepancy",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "balanced" => Ok(SessionStatus::Balanced),
            "discrepancy" => Ok(SessionStatus::Discrepancy),
            other => Err(format!("Unknown session status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionValidationError {
    #[error("Auditor name cannot be empty")]
    EmptyAuditorName,
    #[error("Session date is required")]
    MissingSessionDate,
    #[error("At least one cash box needs a date and a worker name")]
    NoCompleteCashBoxes,
    #[error("Invalid session date '{0}', expected YYYY-MM-DD")]
    InvalidSessionDate(String),
    #[error("Invalid idempotency key '{0}'")]
    InvalidIdempotencyKey(String),
}

/// A session ready to be persisted: totals computed, incomplete boxes dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub session_date: NaiveDate,
    pub auditor_name: String,
    /// Complete boxes only, in wizard order
    pub cash_boxes: Vec<CashBox>,
    pub totals: Totals,
    pub status: SessionStatus,
    pub idempotency_key: Option<Uuid>,
}

impl NewSession {
    /// Aggregate the final wizard data into a session record
    pub fn finalize(
        session_date: NaiveDate,
        auditor_name: &str,
        cash_boxes: &[CashBox],
        idempotency_key: Option<Uuid>,
    ) -> Result<Self, SessionValidationError> {
        let auditor_name = auditor_name.trim();
        if auditor_name.is_empty() {
            return Err(SessionValidationError::EmptyAuditorName);
        }

        let reconciliation = reconcile(cash_boxes);
        if reconciliation.valid_count() == 0 {
            return Err(SessionValidationError::NoCompleteCashBoxes);
        }

        let totals = reconciliation.totals;
        Ok(Self {
            session_date,
            auditor_name: auditor_name.to_string(),
            cash_boxes: reconciliation.lines.into_iter().map(|line| line.cash_box).collect(),
            status: SessionStatus::from_totals(&totals),
            totals,
            idempotency_key,
        })
    }

    pub fn total_cash_boxes(&self) -> u32 {
        self.cash_boxes.len() as u32
    }
}

/// A persisted reconciliation session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationSession {
    pub id: i64,
    pub session_date: NaiveDate,
    pub auditor_name: String,
    pub total_cash_boxes: u32,
    pub totals: Totals,
    pub status: SessionStatus,
    pub idempotency_key: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A persisted cash box; `position` is its order within the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCashBox {
    pub id: i64,
    pub session_id: i64,
    pub position: u32,
    pub cash_box: CashBox,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionWithCashBoxes {
    pub session: ReconciliationSession,
    pub cash_boxes: Vec<StoredCashBox>,
}

impl SessionWithCashBoxes {
    pub fn domain_boxes(&self) -> Vec<CashBox> {
        self.cash_boxes.iter().map(|stored| stored.cash_box.clone()).collect()
    }
}
