use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{NewReport, ReportKind, SavedReport};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::ReportStorage;

/// Repository for generated report content
#[derive(Clone)]
pub struct ReportRepository {
    db: DbConnection,
}

impl ReportRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReportStorage for ReportRepository {
    async fn insert_report(&self, report: &NewReport) -> Result<SavedReport> {
        let created_at = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO saved_reports (session_id, report_type, title, content, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(report.session_id)
        .bind(report.kind.as_str())
        .bind(&report.title)
        .bind(&report.content)
        .bind(created_at)
        .execute(self.db.pool())
        .await?;

        Ok(SavedReport {
            id: result.last_insert_rowid(),
            session_id: report.session_id,
            kind: report.kind,
            title: report.title.clone(),
            content: report.content.clone(),
            created_at,
        })
    }

    async fn get_report(&self, report_id: i64) -> Result<Option<SavedReport>> {
        let row = sqlx::query(
            r#"
            SELECT id, session_id, report_type, title, content, created_at
            FROM saved_reports
            WHERE id = ?
            "#,
        )
        .bind(report_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(report_from_row).transpose()
    }

    async fn list_reports(&self, session_id: i64) -> Result<Vec<SavedReport>> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, report_type, title, content, created_at
            FROM saved_reports
            WHERE session_id = ?
            ORDER BY id DESC
            "#,
        )
        .bind(session_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(report_from_row).collect()
    }
}

fn report_from_row(row: &SqliteRow) -> Result<SavedReport> {
    let kind: String = row.try_get("report_type")?;
    Ok(SavedReport {
        id: row.try_get("id")?,
        session_id: row.try_get("session_id")?,
        kind: kind.parse::<ReportKind>().map_err(|e| anyhow!(e))?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Breakdown, CashBox, NewSession, Shift};
    use crate::storage::sqlite::repositories::SessionRepository;
    use crate::storage::traits::SessionStorage;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    async fn setup_test() -> (SessionRepository, ReportRepository, i64) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let sessions = SessionRepository::new(db.clone());
        let boxes = vec![CashBox {
            date: NaiveDate::from_ymd_opt(2024, 1, 1),
            worker_name: "Ana".to_string(),
            shift: Shift::Morning,
            vale_amount: dec!(100),
            breakdown: Breakdown::from_counts(&[("100", 1)]),
        }];
        let session = NewSession::finalize(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "Marta", &boxes, None)
            .expect("valid session");
        let session_id = sessions.insert_session(&session).await.unwrap().session().id;
        (sessions, ReportRepository::new(db), session_id)
    }

    fn report(session_id: i64, kind: ReportKind) -> NewReport {
        NewReport {
            session_id,
            kind,
            title: kind.default_title(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            content: "<html><body>Arqueo</body></html>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_get_and_list() {
        let (_, repo, session_id) = setup_test().await;

        let first = repo.insert_report(&report(session_id, ReportKind::ByCashBox)).await.unwrap();
        let second = repo.insert_report(&report(session_id, ReportKind::ByDate)).await.unwrap();

        let loaded = repo.get_report(first.id).await.unwrap().expect("report exists");
        assert_eq!(loaded.content, "<html><body>Arqueo</body></html>");
        assert_eq!(loaded.kind, ReportKind::ByCashBox);

        let listed: Vec<i64> = repo
            .list_reports(session_id)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(listed, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_report_requires_existing_session() {
        let (_, repo, session_id) = setup_test().await;
        assert!(repo.insert_report(&report(session_id + 100, ReportKind::ByDate)).await.is_err());
    }

    #[tokio::test]
    async fn test_reports_deleted_with_session() {
        let (sessions, repo, session_id) = setup_test().await;
        let saved = repo.insert_report(&report(session_id, ReportKind::ByDate)).await.unwrap();

        sessions.delete_session(session_id).await.unwrap();
        assert!(repo.get_report(saved.id).await.unwrap().is_none());
    }
}
