//! SQLite backend: a single `kv` table.

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use super::{KeyValueStore, KvError};

/// Durable backend on a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteKvStore {
    pool: SqlitePool,
}

impl SqliteKvStore {
    /// Connect to `url` (e.g. `sqlite://brandhub.db?mode=rwc`) and create the
    /// table if needed.
    pub async fn connect(url: &str) -> Result<Self, KvError> {
        let pool = SqlitePool::connect(url)
            .await
            .with_context(|| format!("failed to open SQLite database at {url}"))?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, KvError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key        TEXT PRIMARY KEY NOT NULL,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .context("failed to create kv table")?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, KvError> {
        let row = sqlx::query("SELECT value FROM kv WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to read key {key}"))?;

        match row {
            Some(row) => {
                let value: String = row.try_get("value").context("malformed kv row")?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<(), KvError> {
        sqlx::query(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to write key {key}"))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KvError> {
        sqlx::query("DELETE FROM kv WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to remove key {key}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    // Every connection to `:memory:` is its own database.
    async fn memory_store() -> SqliteKvStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SqliteKvStore::from_pool(pool).await.unwrap()
    }

    #[tokio::test]
    async fn upsert_overwrites() {
        let kv = memory_store().await;
        kv.set_raw("db_clients", "[]".to_string()).await.unwrap();
        kv.set_raw("db_clients", r#"[{"id":"client-1"}]"#.to_string())
            .await
            .unwrap();
        assert_eq!(
            kv.get_raw("db_clients").await.unwrap().as_deref(),
            Some(r#"[{"id":"client-1"}]"#)
        );
        kv.remove("db_clients").await.unwrap();
        assert!(!kv.contains("db_clients").await.unwrap());
    }
}
