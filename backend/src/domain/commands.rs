//! Domain-level command and query types.
//!
//! Services take and return these; the REST layer maps the public DTOs of the
//! `shared` crate onto them.

pub mod sessions {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use crate::domain::models::{CashBox, ReconciliationSession};

    /// Default page size when listing sessions
    pub const DEFAULT_SESSION_LIMIT: u32 = 50;
    /// Largest page size a caller may ask for
    pub const MAX_SESSION_LIMIT: u32 = 100;

    /// Input for finalizing and storing a session.
    #[derive(Debug, Clone)]
    pub struct SaveSessionCommand {
        pub session_date: NaiveDate,
        pub auditor_name: String,
        pub cash_boxes: Vec<CashBox>,
        pub idempotency_key: Option<Uuid>,
    }

    /// Result of saving a session. `created` is false when an earlier save
    /// with the same idempotency key was returned instead.
    #[derive(Debug, Clone)]
    pub struct SaveSessionResult {
        pub session: ReconciliationSession,
        pub created: bool,
    }

    #[derive(Debug, Clone, Default)]
    pub struct SessionListQuery {
        pub limit: Option<u32>,
    }

    impl SessionListQuery {
        pub fn effective_limit(&self) -> u32 {
            self.limit
                .unwrap_or(DEFAULT_SESSION_LIMIT)
                .clamp(1, MAX_SESSION_LIMIT)
        }
    }
}

pub mod names {
    use crate::domain::models::{NameKind, SavedName};

    #[derive(Debug, Clone)]
    pub struct AddNameCommand {
        pub name: String,
        pub kind: NameKind,
    }

    /// `reactivated` is set when a previously removed name was brought back.
    #[derive(Debug, Clone)]
    pub struct AddNameResult {
        pub name: SavedName,
        pub reactivated: bool,
    }
}

pub mod reports {
    use crate::domain::models::ReportKind;

    #[derive(Debug, Clone)]
    pub struct SaveReportCommand {
        pub session_id: i64,
        pub kind: ReportKind,
        pub title: Option<String>,
        pub content: String,
    }
}

#[cfg(test)]
mod tests {
    use super::sessions::*;

    #[test]
    fn test_session_limit_defaults_and_caps() {
        assert_eq!(SessionListQuery::default().effective_limit(), DEFAULT_SESSION_LIMIT);
        assert_eq!(SessionListQuery { limit: Some(500) }.effective_limit(), MAX_SESSION_LIMIT);
        assert_eq!(SessionListQuery { limit: Some(0) }.effective_limit(), 1);
        assert_eq!(SessionListQuery { limit: Some(10) }.effective_limit(), 10);
    }
}
