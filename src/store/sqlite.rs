//! SQLite-backed record store.

use std::path::Path;

use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

use super::error::StoreError;
use super::{InsertOutcome, TitleStore};

#[derive(Debug, Clone)]
pub struct SqliteTitleStore {
    pool: SqlitePool,
}

impl SqliteTitleStore {
    /// Opens (creating if missing) the database at `path` and runs migrations.
    pub async fn connect<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Wraps an existing pool. Call [`migrate`](Self::migrate) before use.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Idempotent schema migration.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS titles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title_name TEXT NOT NULL UNIQUE,
                status TEXT NOT NULL DEFAULT 'Approved',
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_titles_status ON titles(status)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

impl TitleStore for SqliteTitleStore {
    async fn insert_title(&self, text: &str) -> Result<InsertOutcome, StoreError> {
        let now = Utc::now().to_rfc3339();

        let result =
            sqlx::query("INSERT INTO titles (title_name, status, created_at) VALUES (?, 'Approved', ?)")
                .bind(text)
                .bind(&now)
                .execute(&self.pool)
                .await;

        match result {
            Ok(done) => {
                let id = done.last_insert_rowid();
                debug!(id, "title record created");
                Ok(InsertOutcome::Inserted(id))
            }
            Err(sqlx::Error::Database(db))
                if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                Ok(InsertOutcome::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_approved_titles(&self) -> Result<Vec<String>, StoreError> {
        let titles: Vec<String> =
            sqlx::query_scalar("SELECT title_name FROM titles WHERE status = 'Approved' ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(titles)
    }
}
