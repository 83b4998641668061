//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use super::pg_id_allocator::URL_COUNTER_ID;
use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    url: String,
    last_visited: DateTime<Utc>,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord::new(row.id, row.url, row.last_visited)
    }
}

/// PostgreSQL repository for URL records.
///
/// Timestamps are taken from the application clock so that cleanup cutoffs
/// and `last_visited` values share one time source.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn put(&self, id: i64, url: &str) -> Result<UrlRecord, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (id, url, last_visited)
            VALUES ($1, $2, $3)
            RETURNING id, url, last_visited
            "#,
        )
        .bind(id)
        .bind(url)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn get_and_touch(&self, id: i64) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            UPDATE urls
            SET last_visited = $2
            WHERE id = $1
            RETURNING id, url, last_visited
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn delete_stale(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE last_visited < $1")
            .bind(cutoff)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn initialize(&self) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM counters")
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO counters (id, count) VALUES ($1, 0)")
            .bind(URL_COUNTER_ID)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM urls").execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| AppError::unavailable(format!("Database ping failed: {e}")))?;

        Ok(())
    }
}
