//! # Storage Traits
//!
//! Storage abstractions used by the domain services. The SQLite repositories
//! implement them; services only ever hold `Arc<dyn ...>` handles.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::{
    NameKind, NewReport, NewSession, ReconciliationSession, SavedName, SavedReport,
    SessionWithCashBoxes,
};

/// Outcome of storing a session that may carry an idempotency key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInsert {
    Created(ReconciliationSession),
    /// A session with the same idempotency key already existed
    Existing(ReconciliationSession),
}

impl SessionInsert {
    pub fn session(&self) -> &ReconciliationSession {
        match self {
            SessionInsert::Created(session) | SessionInsert::Existing(session) => session,
        }
    }
}

#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Store a session and its cash boxes atomically.
    ///
    /// When the session carries an idempotency key that is already stored, the
    /// existing session is returned and nothing is written.
    async fn insert_session(&self, session: &NewSession) -> Result<SessionInsert>;

    async fn find_by_idempotency_key(&self, key: Uuid) -> Result<Option<ReconciliationSession>>;

    /// Session with its cash boxes in entry order
    async fn get_session(&self, session_id: i64) -> Result<Option<SessionWithCashBoxes>>;

    /// Newest first
    async fn list_sessions(&self, limit: u32) -> Result<Vec<ReconciliationSession>>;

    /// Deletes the session, its cash boxes and its saved reports.
    /// Returns false when the session did not exist.
    async fn delete_session(&self, session_id: i64) -> Result<bool>;
}

#[async_trait]
pub trait NameStorage: Send + Sync {
    /// Active names of one kind, alphabetically
    async fn list_active_names(&self, kind: NameKind) -> Result<Vec<SavedName>>;

    /// Exact match on kind and name, active or not
    async fn find_name(&self, kind: NameKind, name: &str) -> Result<Option<SavedName>>;

    async fn get_name(&self, name_id: i64) -> Result<Option<SavedName>>;

    async fn insert_name(&self, kind: NameKind, name: &str) -> Result<SavedName>;

    /// Returns false when no name has this id
    async fn set_name_active(&self, name_id: i64, is_active: bool) -> Result<bool>;
}

#[async_trait]
pub trait ReportStorage: Send + Sync {
    async fn insert_report(&self, report: &NewReport) -> Result<SavedReport>;

    async fn get_report(&self, report_id: i64) -> Result<Option<SavedReport>>;

    /// Reports of one session, newest first
    async fn list_reports(&self, session_id: i64) -> Result<Vec<SavedReport>>;
}
