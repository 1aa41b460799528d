use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{NameKind, SavedName};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::NameStorage;

/// Repository for the worker and auditor picker lists
#[derive(Clone)]
pub struct NameRepository {
    db: DbConnection,
}

impl NameRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NameStorage for NameRepository {
    async fn list_active_names(&self, kind: NameKind) -> Result<Vec<SavedName>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, name_type, is_active, created_at
            FROM saved_names
            WHERE name_type = ? AND is_active = TRUE
            ORDER BY name COLLATE NOCASE ASC
            "#,
        )
        .bind(kind.as_str())
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(name_from_row).collect()
    }

    async fn find_name(&self, kind: NameKind, name: &str) -> Result<Option<SavedName>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, name_type, is_active, created_at
            FROM saved_names
            WHERE name_type = ? AND name = ?
            "#,
        )
        .bind(kind.as_str())
        .bind(name)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(name_from_row).transpose()
    }

    async fn get_name(&self, name_id: i64) -> Result<Option<SavedName>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, name_type, is_active, created_at
            FROM saved_names
            WHERE id = ?
            "#,
        )
        .bind(name_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(name_from_row).transpose()
    }

    async fn insert_name(&self, kind: NameKind, name: &str) -> Result<SavedName> {
        let created_at = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO saved_names (name, name_type, is_active, created_at)
            VALUES (?, ?, TRUE, ?)
            "#,
        )
        .bind(name)
        .bind(kind.as_str())
        .bind(created_at)
        .execute(self.db.pool())
        .await?;

        Ok(SavedName {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            kind,
            is_active: true,
            created_at,
        })
    }

    async fn set_name_active(&self, name_id: i64, is_active: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE saved_names SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(name_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn name_from_row(row: &SqliteRow) -> Result<SavedName> {
    let kind: String = row.try_get("name_type")?;
    Ok(SavedName {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        kind: kind.parse::<NameKind>().map_err(|e| anyhow!(e))?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> NameRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        NameRepository::new(db)
    }

    #[tokio::test]
    async fn test_insert_and_list_by_kind() {
        let repo = setup_test().await;
        repo.insert_name(NameKind::Worker, "luis").await.unwrap();
        repo.insert_name(NameKind::Worker, "Ana").await.unwrap();
        repo.insert_name(NameKind::Auditor, "Marta").await.unwrap();

        let workers: Vec<String> = repo
            .list_active_names(NameKind::Worker)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.name)
            .collect();
        assert_eq!(workers, vec!["Ana", "luis"]);

        let auditors = repo.list_active_names(NameKind::Auditor).await.unwrap();
        assert_eq!(auditors.len(), 1);
        assert_eq!(auditors[0].kind, NameKind::Auditor);
    }

    #[tokio::test]
    async fn test_deactivate_hides_but_keeps_name() {
        let repo = setup_test().await;
        let name = repo.insert_name(NameKind::Worker, "Ana").await.unwrap();

        assert!(repo.set_name_active(name.id, false).await.unwrap());
        assert!(repo.list_active_names(NameKind::Worker).await.unwrap().is_empty());

        let stored = repo.find_name(NameKind::Worker, "Ana").await.unwrap().expect("still stored");
        assert!(!stored.is_active);

        assert!(repo.set_name_active(name.id, true).await.unwrap());
        assert!(repo.get_name(name.id).await.unwrap().unwrap().is_active);
    }

    #[tokio::test]
    async fn test_same_name_allowed_for_both_kinds() {
        let repo = setup_test().await;
        repo.insert_name(NameKind::Worker, "Marta").await.unwrap();
        repo.insert_name(NameKind::Auditor, "Marta").await.unwrap();
        assert!(repo.insert_name(NameKind::Worker, "Marta").await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let repo = setup_test().await;
        assert!(repo.get_name(99).await.unwrap().is_none());
        assert!(!repo.set_name_active(99, false).await.unwrap());
    }
}
