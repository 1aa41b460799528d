use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::{debug, warn};
use uuid::Uuid;

use super::decimal_column;
use crate::domain::models::{
    Breakdown, CashBox, NewSession, ReconciliationSession, SessionStatus, SessionWithCashBoxes,
    Shift, StoredCashBox,
};
use crate::domain::reconciliation::Totals;
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::{SessionInsert, SessionStorage};

const SESSION_COLUMNS: &str = "id, session_date, auditor_name, total_cash_boxes, total_vales, \
     total_breakdown, difference, status, idempotency_key, created_at";

/// Repository for reconciliation sessions and their cash boxes
#[derive(Clone)]
pub struct SessionRepository {
    db: DbConnection,
}

impl SessionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    async fn fetch_session(&self, session_id: i64) -> Result<Option<ReconciliationSession>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM reconciliation_sessions WHERE id = ?",
            SESSION_COLUMNS
        ))
        .bind(session_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(session_from_row).transpose()
    }

    async fn fetch_cash_boxes(&self, session_id: i64) -> Result<Vec<StoredCashBox>> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, position, date, worker_name, shift, vale_amount, breakdown
            FROM cash_boxes
            WHERE session_id = ?
            ORDER BY position ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(cash_box_from_row).collect()
    }
}

#[async_trait]
impl SessionStorage for SessionRepository {
    async fn insert_session(&self, session: &NewSession) -> Result<SessionInsert> {
        if let Some(key) = session.idempotency_key {
            if let Some(existing) = self.find_by_idempotency_key(key).await? {
                debug!("Session with idempotency key {} already stored as {}", key, existing.id);
                return Ok(SessionInsert::Existing(existing));
            }
        }

        let created_at = Utc::now();
        let mut tx = self.db.pool().begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO reconciliation_sessions (
                session_date, auditor_name, total_cash_boxes, total_vales,
                total_breakdown, difference, status, idempotency_key, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(session.session_date)
        .bind(&session.auditor_name)
        .bind(i64::from(session.total_cash_boxes()))
        .bind(session.totals.total_vales.to_string())
        .bind(session.totals.total_breakdown.to_string())
        .bind(session.totals.difference.to_string())
        .bind(session.status.as_str())
        .bind(session.idempotency_key)
        .bind(created_at)
        .execute(&mut *tx)
        .await;

        let session_id = match inserted {
            Ok(done) => done.last_insert_rowid(),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                // A concurrent save with the same key committed first
                tx.rollback().await?;
                let key = session
                    .idempotency_key
                    .ok_or_else(|| anyhow!("Unique violation on a session without idempotency key"))?;
                warn!("Lost idempotency race for key {}", key);
                let existing = self
                    .find_by_idempotency_key(key)
                    .await?
                    .ok_or_else(|| anyhow!("Session with idempotency key {} vanished", key))?;
                return Ok(SessionInsert::Existing(existing));
            }
            Err(e) => return Err(e.into()),
        };

        for (position, cash_box) in session.cash_boxes.iter().enumerate() {
            let date = cash_box
                .date
                .ok_or_else(|| anyhow!("Cash box {} has no date", position))?;
            sqlx::query(
                r#"
                INSERT INTO cash_boxes (
                    session_id, position, date, worker_name, shift,
                    vale_amount, breakdown, breakdown_total, difference
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(session_id)
            .bind(position as i64)
            .bind(date)
            .bind(cash_box.worker_name.trim())
            .bind(i64::from(cash_box.shift.number()))
            .bind(cash_box.vale_amount.to_string())
            .bind(cash_box.breakdown.to_persisted()?)
            .bind(cash_box.breakdown_total().to_string())
            .bind(cash_box.difference().to_string())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!(
            "Stored session {} with {} cash boxes",
            session_id,
            session.cash_boxes.len()
        );

        Ok(SessionInsert::Created(ReconciliationSession {
            id: session_id,
            session_date: session.session_date,
            auditor_name: session.auditor_name.clone(),
            total_cash_boxes: session.total_cash_boxes(),
            totals: session.totals,
            status: session.status,
            idempotency_key: session.idempotency_key,
            created_at,
        }))
    }

    async fn find_by_idempotency_key(&self, key: Uuid) -> Result<Option<ReconciliationSession>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM reconciliation_sessions WHERE idempotency_key = ?",
            SESSION_COLUMNS
        ))
        .bind(key)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(session_from_row).transpose()
    }

    async fn get_session(&self, session_id: i64) -> Result<Option<SessionWithCashBoxes>> {
        let Some(session) = self.fetch_session(session_id).await? else {
            return Ok(None);
        };
        let cash_boxes = self.fetch_cash_boxes(session_id).await?;
        Ok(Some(SessionWithCashBoxes { session, cash_boxes }))
    }

    async fn list_sessions(&self, limit: u32) -> Result<Vec<ReconciliationSession>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM reconciliation_sessions ORDER BY id DESC LIMIT ?",
            SESSION_COLUMNS
        ))
        .bind(i64::from(limit))
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(session_from_row).collect()
    }

    async fn delete_session(&self, session_id: i64) -> Result<bool> {
        // Cash boxes and saved reports go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM reconciliation_sessions WHERE id = ?")
            .bind(session_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn session_from_row(row: &SqliteRow) -> Result<ReconciliationSession> {
    let status: String = row.try_get("status")?;
    let total_cash_boxes: i64 = row.try_get("total_cash_boxes")?;

    Ok(ReconciliationSession {
        id: row.try_get("id")?,
        session_date: row.try_get::<NaiveDate, _>("session_date")?,
        auditor_name: row.try_get("auditor_name")?,
        total_cash_boxes: u32::try_from(total_cash_boxes)
            .with_context(|| format!("Invalid cash box count {}", total_cash_boxes))?,
        totals: Totals {
            total_vales: decimal_column(row, "total_vales")?,
            total_breakdown: decimal_column(row, "total_breakdown")?,
            difference: decimal_column(row, "difference")?,
        },
        status: status.parse::<SessionStatus>().map_err(|e| anyhow!(e))?,
        idempotency_key: row.try_get::<Option<Uuid>, _>("idempotency_key")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

fn cash_box_from_row(row: &SqliteRow) -> Result<StoredCashBox> {
    let position: i64 = row.try_get("position")?;
    let shift: i64 = row.try_get("shift")?;
    let shift = u8::try_from(shift)
        .ok()
        .and_then(|number| Shift::try_from(number).ok())
        .ok_or_else(|| anyhow!("Invalid shift {} in stored cash box", shift))?;
    let breakdown: String = row.try_get("breakdown")?;

    Ok(StoredCashBox {
        id: row.try_get("id")?,
        session_id: row.try_get("session_id")?,
        position: u32::try_from(position).with_context(|| format!("Invalid position {}", position))?,
        cash_box: CashBox {
            date: Some(row.try_get::<NaiveDate, _>("date")?),
            worker_name: row.try_get("worker_name")?,
            shift,
            vale_amount: decimal_column(row, "vale_amount")?,
            breakdown: Breakdown::from_persisted(&breakdown)?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    async fn setup_test() -> SessionRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        SessionRepository::new(db)
    }

    fn cash_box(day: u32, worker: &str, shift: Shift, vale: Decimal, counts: &[(&str, u32)]) -> CashBox {
        CashBox {
            date: NaiveDate::from_ymd_opt(2024, 1, day),
            worker_name: worker.to_string(),
            shift,
            vale_amount: vale,
            breakdown: Breakdown::from_counts(counts),
        }
    }

    fn new_session(key: Option<Uuid>) -> NewSession {
        let boxes = vec![
            cash_box(1, "Ana", Shift::Morning, dec!(100.00), &[("50", 2)]),
            cash_box(1, "Luis", Shift::Afternoon, dec!(50.00), &[("20", 2), ("5", 1), ("0.50", 4), ("0.10", 30)]),
        ];
        NewSession::finalize(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), "Marta", &boxes, key)
            .expect("valid session")
    }

    #[tokio::test]
    async fn test_insert_and_get_session() {
        let repo = setup_test().await;
        let new = new_session(None);

        let inserted = repo.insert_session(&new).await.expect("Failed to insert");
        let SessionInsert::Created(stored) = inserted else {
            panic!("expected a new session");
        };
        assert_eq!(stored.total_cash_boxes, 2);

        let loaded = repo.get_session(stored.id).await.unwrap().expect("session exists");
        assert_eq!(loaded.session.auditor_name, "Marta");
        assert_eq!(loaded.session.totals, new.totals);
        assert_eq!(loaded.session.status, SessionStatus::Balanced);
        assert_eq!(loaded.cash_boxes.len(), 2);
        assert_eq!(loaded.cash_boxes[0].position, 0);
        assert_eq!(loaded.cash_boxes[1].cash_box.worker_name, "Luis");
        assert_eq!(loaded.cash_boxes[1].cash_box.shift, Shift::Afternoon);
        // Coin counts survive storage exactly
        assert_eq!(loaded.domain_boxes(), new.cash_boxes);
        assert_eq!(loaded.cash_boxes[1].cash_box.breakdown_total(), dec!(50.00));
    }

    #[tokio::test]
    async fn test_get_missing_session() {
        let repo = setup_test().await;
        assert!(repo.get_session(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_idempotency_key_returns_existing() {
        let repo = setup_test().await;
        let key = Uuid::new_v4();

        let first = repo.insert_session(&new_session(Some(key))).await.unwrap();
        let second = repo.insert_session(&new_session(Some(key))).await.unwrap();

        assert!(matches!(first, SessionInsert::Created(_)));
        assert!(matches!(second, SessionInsert::Existing(_)));
        assert_eq!(first.session().id, second.session().id);
        assert_eq!(repo.list_sessions(10).await.unwrap().len(), 1);

        let found = repo.find_by_idempotency_key(key).await.unwrap().expect("key stored");
        assert_eq!(found.idempotency_key, Some(key));
    }

    #[tokio::test]
    async fn test_sessions_without_key_are_never_deduplicated() {
        let repo = setup_test().await;
        repo.insert_session(&new_session(None)).await.unwrap();
        repo.insert_session(&new_session(None)).await.unwrap();
        assert_eq!(repo.list_sessions(10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_sessions_newest_first_with_limit() {
        let repo = setup_test().await;
        let mut ids = Vec::new();
        for _ in 0..3 {
            ids.push(repo.insert_session(&new_session(None)).await.unwrap().session().id);
        }

        let listed: Vec<i64> = repo
            .list_sessions(2)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(listed, vec![ids[2], ids[1]]);
    }

    #[tokio::test]
    async fn test_delete_session_cascades_to_cash_boxes() {
        let repo = setup_test().await;
        let id = repo.insert_session(&new_session(None)).await.unwrap().session().id;

        assert!(repo.delete_session(id).await.unwrap());
        assert!(repo.get_session(id).await.unwrap().is_none());
        assert!(!repo.delete_session(id).await.unwrap());

        let remaining: i64 = sqlx::query("SELECT COUNT(*) FROM cash_boxes")
            .fetch_one(repo.db.pool())
            .await
            .unwrap()
            .get(0);
        assert_eq!(remaining, 0);
    }
}
