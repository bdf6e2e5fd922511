use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::domain::ComplianceResult;

use super::traits::{ArchiveStore, DurableRecord, PersistenceError, RecordStore};

/// PostgreSQL implementation of both sinks.
///
/// The durable store and the archive store live in separate tables of the
/// same database; both writes are single-statement upserts keyed by sender.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgresStore with a connection pool.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create the sink tables if they do not exist.
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS approved_records (
                id TEXT PRIMARY KEY,
                amount TEXT NOT NULL,
                status TEXT NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS archive_objects (
                key TEXT PRIMARY KEY,
                body JSONB NOT NULL,
                archived_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn map_store_error(e: sqlx::Error) -> PersistenceError {
    match e {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            PersistenceError::Unavailable(e.to_string())
        }
        other => PersistenceError::Rejected(other.to_string()),
    }
}

#[async_trait]
impl RecordStore for PostgresStore {
    async fn put_record(&self, record: &DurableRecord) -> Result<(), PersistenceError> {
        sqlx::query(
            r#"
            INSERT INTO approved_records (id, amount, status, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (id)
            DO UPDATE SET
                amount = EXCLUDED.amount,
                status = EXCLUDED.status,
                updated_at = now()
            "#,
        )
        .bind(&record.id)
        .bind(&record.amount)
        .bind(record.status.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_store_error)?;

        Ok(())
    }
}

#[async_trait]
impl ArchiveStore for PostgresStore {
    async fn put_object(
        &self,
        key: &str,
        body: &ComplianceResult,
    ) -> Result<(), PersistenceError> {
        let blob = serde_json::to_value(body)
            .map_err(|e| PersistenceError::Rejected(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO archive_objects (key, body, archived_at)
            VALUES ($1, $2, now())
            ON CONFLICT (key)
            DO UPDATE SET
                body = EXCLUDED.body,
                archived_at = now()
            "#,
        )
        .bind(key)
        .bind(blob)
        .execute(&self.pool)
        .await
        .map_err(map_store_error)?;

        Ok(())
    }
}
