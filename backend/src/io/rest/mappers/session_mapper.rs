//! backend/src/io/rest/mappers/session_mapper.rs

use chrono::NaiveDate;
use shared::{
    SaveSessionRequest, SaveSessionResponse, SessionDetailResponse, SessionListResponse,
    SessionSummaryDto,
};
use uuid::Uuid;

use super::cash_box_mapper::CashBoxMapper;
use crate::domain::commands::sessions::{SaveSessionCommand, SaveSessionResult};
use crate::domain::errors::ServiceError;
use crate::domain::models::{ReconciliationSession, SessionValidationError, SessionWithCashBoxes};
use crate::domain::reconciliation::format_amount;

/// Mapper between session DTOs and domain sessions.
pub struct SessionMapper;

impl SessionMapper {
    /// Parses a required session date
    pub fn parse_session_date(raw: &str) -> Result<NaiveDate, SessionValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SessionValidationError::MissingSessionDate);
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map_err(|_| SessionValidationError::InvalidSessionDate(trimmed.to_string()))
    }

    pub fn to_command(request: SaveSessionRequest) -> Result<SaveSessionCommand, ServiceError> {
        let session_date = Self::parse_session_date(&request.session_date)?;
        let idempotency_key = match request.idempotency_key.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                Uuid::parse_str(raw)
                    .map_err(|_| SessionValidationError::InvalidIdempotencyKey(raw.to_string()))?,
            ),
        };

        Ok(SaveSessionCommand {
            session_date,
            auditor_name: request.auditor_name,
            cash_boxes: CashBoxMapper::to_domain_list(&request.cash_boxes)?,
            idempotency_key,
        })
    }

    pub fn to_summary_dto(session: &ReconciliationSession) -> SessionSummaryDto {
        SessionSummaryDto {
            id: session.id,
            session_date: session.session_date.format("%Y-%m-%d").to_string(),
            auditor_name: session.auditor_name.clone(),
            total_cash_boxes: session.total_cash_boxes,
            total_vales: format_amount(session.totals.total_vales),
            total_breakdown: format_amount(session.totals.total_breakdown),
            difference: format_amount(session.totals.difference),
            status: session.status.as_str().to_string(),
            created_at: session.created_at.to_rfc3339(),
        }
    }

    pub fn to_save_response(result: SaveSessionResult) -> SaveSessionResponse {
        let success_message = if result.created {
            format!("Session {} saved", result.session.id)
        } else {
            format!("Session {} was already saved", result.session.id)
        };
        SaveSessionResponse {
            session: Self::to_summary_dto(&result.session),
            created: result.created,
            success_message,
        }
    }

    pub fn to_list_dto(sessions: &[ReconciliationSession]) -> SessionListResponse {
        SessionListResponse {
            sessions: sessions.iter().map(Self::to_summary_dto).collect(),
        }
    }

    pub fn to_detail_dto(detail: &SessionWithCashBoxes) -> SessionDetailResponse {
        SessionDetailResponse {
            session: Self::to_summary_dto(&detail.session),
            cash_boxes: detail.cash_boxes.iter().map(CashBoxMapper::to_detail_dto).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> SaveSessionRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_to_command() {
        let key = Uuid::new_v4();
        let command = SessionMapper::to_command(request(json!({
            "session_date": "2024-01-02",
            "auditor_name": "Marta",
            "idempotency_key": key.to_string(),
            "cash_boxes": [{"date": "2024-01-01", "worker_name": "Ana", "vale_amount": "10"}]
        })))
        .unwrap();

        assert_eq!(command.session_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(command.idempotency_key, Some(key));
        assert_eq!(command.cash_boxes.len(), 1);
    }

    #[test]
    fn test_to_command_rejects_bad_input() {
        let missing_date = SessionMapper::to_command(request(json!({
            "session_date": "", "auditor_name": "Marta", "cash_boxes": []
        })));
        assert!(matches!(
            missing_date,
            Err(ServiceError::Session(SessionValidationError::MissingSessionDate))
        ));

        let bad_key = SessionMapper::to_command(request(json!({
            "session_date": "2024-01-02", "auditor_name": "Marta", "cash_boxes": [],
            "idempotency_key": "not-a-uuid"
        })));
        assert!(matches!(
            bad_key,
            Err(ServiceError::Session(SessionValidationError::InvalidIdempotencyKey(_)))
        ));

        let bad_box = SessionMapper::to_command(request(json!({
            "session_date": "2024-01-02", "auditor_name": "Marta",
            "cash_boxes": [{"vale_amount": "abc"}]
        })));
        assert!(matches!(bad_box, Err(ServiceError::InvalidCashBox { index: 0, .. })));
    }
}
