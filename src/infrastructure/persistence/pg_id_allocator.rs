//! PostgreSQL implementation of the id allocator.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::IdAllocator;
use crate::error::AppError;

/// Key of the counter row in the `counters` table.
pub const URL_COUNTER_ID: &str = "url_count";

/// Allocates ids by incrementing a single row in the `counters` table.
///
/// The upsert takes a row lock for the duration of the statement, which is
/// what serializes concurrent callers across connections and processes.
pub struct PgIdAllocator {
    pool: Arc<PgPool>,
}

impl PgIdAllocator {
    /// Creates a new allocator with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdAllocator for PgIdAllocator {
    async fn next_id(&self) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO counters (id, count)
            VALUES ($1, 1)
            ON CONFLICT (id) DO UPDATE SET count = counters.count + 1
            RETURNING count
            "#,
        )
        .bind(URL_COUNTER_ID)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(id)
    }

    async fn current(&self) -> Result<i64, AppError> {
        let count: Option<i64> = sqlx::query_scalar("SELECT count FROM counters WHERE id = $1")
            .bind(URL_COUNTER_ID)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(count.unwrap_or(0))
    }
}
