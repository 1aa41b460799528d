use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::sessions::{SaveSessionCommand, SaveSessionResult, SessionListQuery};
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::{NewSession, ReconciliationSession, SessionWithCashBoxes};
use crate::storage::traits::{SessionInsert, SessionStorage};

/// Service for finalizing, storing and browsing reconciliation sessions
#[derive(Clone)]
pub struct SessionService {
    storage: Arc<dyn SessionStorage>,
}

impl SessionService {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Finalize the wizard data and store it with its complete cash boxes
    pub async fn save_session(&self, command: SaveSessionCommand) -> ServiceResult<SaveSessionResult> {
        info!(
            "Saving session: date={}, auditor={}, boxes={}",
            command.session_date,
            command.auditor_name,
            command.cash_boxes.len()
        );

        let session = NewSession::finalize(
            command.session_date,
            &command.auditor_name,
            &command.cash_boxes,
            command.idempotency_key,
        )?;

        let dropped = command.cash_boxes.len() - session.cash_boxes.len();
        if dropped > 0 {
            warn!("Dropping {} incomplete cash boxes from session", dropped);
        }

        let result = match self.storage.insert_session(&session).await? {
            SessionInsert::Created(session) => {
                info!(
                    "Created session {}: vales={}, counted={}, difference={}, status={}",
                    session.id,
                    session.totals.total_vales,
                    session.totals.total_breakdown,
                    session.totals.difference,
                    session.status
                );
                SaveSessionResult { session, created: true }
            }
            SessionInsert::Existing(session) => {
                info!("Idempotent replay, returning existing session {}", session.id);
                SaveSessionResult { session, created: false }
            }
        };

        Ok(result)
    }

    pub async fn list_sessions(&self, query: SessionListQuery) -> ServiceResult<Vec<ReconciliationSession>> {
        let limit = query.effective_limit();
        info!("Listing sessions (limit {})", limit);

        let sessions = self.storage.list_sessions(limit).await?;
        info!("Found {} sessions", sessions.len());
        Ok(sessions)
    }

    pub async fn get_session(&self, session_id: i64) -> ServiceResult<SessionWithCashBoxes> {
        info!("Getting session: {}", session_id);

        match self.storage.get_session(session_id).await? {
            Some(session) => Ok(session),
            None => {
                warn!("Session not found: {}", session_id);
                Err(ServiceError::not_found("Session", session_id))
            }
        }
    }

    /// Delete a session together with its cash boxes and saved reports
    pub async fn delete_session(&self, session_id: i64) -> ServiceResult<()> {
        info!("Deleting session: {}", session_id);

        if !self.storage.delete_session(session_id).await? {
            warn!("Session not found: {}", session_id);
            return Err(ServiceError::not_found("Session", session_id));
        }

        info!("Deleted session {}", session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Breakdown, CashBox, SessionStatus, SessionValidationError, Shift};
    use crate::storage::sqlite::{DbConnection, SessionRepository};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    async fn setup_test() -> SessionService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        SessionService::new(Arc::new(SessionRepository::new(db)))
    }

    fn command(idempotency_key: Option<Uuid>) -> SaveSessionCommand {
        SaveSessionCommand {
            session_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            auditor_name: "Marta".to_string(),
            cash_boxes: vec![
                CashBox {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1),
                    worker_name: "Ana".to_string(),
                    shift: Shift::Morning,
                    vale_amount: dec!(100),
                    breakdown: Breakdown::from_counts(&[("50", 1), ("20", 2)]),
                },
                CashBox::blank(),
            ],
            idempotency_key,
        }
    }

    #[tokio::test]
    async fn test_save_and_get_session() {
        let service = setup_test().await;

        let saved = service.save_session(command(None)).await.expect("save works");
        assert!(saved.created);
        assert_eq!(saved.session.total_cash_boxes, 1);
        assert_eq!(saved.session.totals.difference, dec!(-10));
        assert_eq!(saved.session.status, SessionStatus::Discrepancy);

        let loaded = service.get_session(saved.session.id).await.unwrap();
        assert_eq!(loaded.session, saved.session);
        assert_eq!(loaded.cash_boxes.len(), 1);
    }

    #[tokio::test]
    async fn test_save_rejects_session_without_complete_boxes() {
        let service = setup_test().await;
        let mut cmd = command(None);
        cmd.cash_boxes = vec![CashBox::blank()];

        let err = service.save_session(cmd).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Session(SessionValidationError::NoCompleteCashBoxes)
        ));
        assert!(service.list_sessions(SessionListQuery::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_idempotent_save() {
        let service = setup_test().await;
        let key = Uuid::new_v4();

        let first = service.save_session(command(Some(key))).await.unwrap();
        let replay = service.save_session(command(Some(key))).await.unwrap();

        assert!(first.created);
        assert!(!replay.created);
        assert_eq!(first.session.id, replay.session.id);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let service = setup_test().await;
        let saved = service.save_session(command(None)).await.unwrap();

        service.delete_session(saved.session.id).await.unwrap();

        assert!(matches!(
            service.get_session(saved.session.id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_session(saved.session.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_sessions_respects_limit() {
        let service = setup_test().await;
        for _ in 0..3 {
            service.save_session(command(None)).await.unwrap();
        }

        let all = service.list_sessions(SessionListQuery::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        let limited = service.list_sessions(SessionListQuery { limit: Some(2) }).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert!(limited[0].id > limited[1].id);
    }
}
