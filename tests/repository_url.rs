//! PostgreSQL repository tests.
//!
//! Each test gets a fresh database with migrations applied; `DATABASE_URL`
//! must point at a reachable server.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::Arc;

use shorty::domain::repositories::{IdAllocator, UrlRepository};
use shorty::error::AppError;
use shorty::infrastructure::persistence::{PgIdAllocator, PgUrlRepository};

fn repositories(pool: PgPool) -> (PgIdAllocator, PgUrlRepository, Arc<PgPool>) {
    let pool = Arc::new(pool);
    (
        PgIdAllocator::new(pool.clone()),
        PgUrlRepository::new(pool.clone()),
        pool,
    )
}

async fn backdate(pool: &PgPool, id: i64, days: i32) {
    sqlx::query("UPDATE urls SET last_visited = NOW() - make_interval(days => $2) WHERE id = $1")
        .bind(id)
        .bind(days)
        .execute(pool)
        .await
        .unwrap();
}

#[sqlx::test]
async fn test_counter_starts_at_zero(pool: PgPool) {
    let (allocator, _, _) = repositories(pool);

    assert_eq!(allocator.current().await.unwrap(), 0);
    assert_eq!(allocator.next_id().await.unwrap(), 1);
    assert_eq!(allocator.next_id().await.unwrap(), 2);
    assert_eq!(allocator.current().await.unwrap(), 2);
}

#[sqlx::test]
async fn test_next_id_recreates_missing_counter_row(pool: PgPool) {
    sqlx::query("DELETE FROM counters").execute(&pool).await.unwrap();
    let (allocator, _, _) = repositories(pool);

    assert_eq!(allocator.current().await.unwrap(), 0);
    assert_eq!(allocator.next_id().await.unwrap(), 1);
}

#[sqlx::test]
async fn test_concurrent_next_id_is_unique(pool: PgPool) {
    let (allocator, _, _) = repositories(pool);
    let allocator = Arc::new(allocator);

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let allocator = allocator.clone();
            tokio::spawn(async move { allocator.next_id().await.unwrap() })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }

    assert_eq!(ids, (1..=50).collect::<HashSet<i64>>());
}

#[sqlx::test]
async fn test_put_then_get_and_touch(pool: PgPool) {
    let (_, repository, _) = repositories(pool);

    let stored = repository.put(1, "http://davtyan.org").await.unwrap();
    assert_eq!(stored.id, 1);
    assert_eq!(stored.url, "http://davtyan.org");

    let touched = repository.get_and_touch(1).await.unwrap().unwrap();
    assert_eq!(touched.url, "http://davtyan.org");
    assert!(touched.last_visited >= stored.last_visited);
}

#[sqlx::test]
async fn test_get_and_touch_missing_id(pool: PgPool) {
    let (_, repository, _) = repositories(pool);

    assert!(repository.get_and_touch(42).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_put_duplicate_id_is_conflict(pool: PgPool) {
    let (_, repository, _) = repositories(pool);

    repository.put(7, "https://one.example").await.unwrap();
    let result = repository.put(7, "https://two.example").await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
    let kept = repository.get_and_touch(7).await.unwrap().unwrap();
    assert_eq!(kept.url, "https://one.example");
}

#[sqlx::test]
async fn test_delete_stale_removes_only_idle_records(pool: PgPool) {
    let (_, repository, pool) = repositories(pool);

    repository.put(1, "https://stale.example").await.unwrap();
    repository.put(2, "https://fresh.example").await.unwrap();
    backdate(&pool, 1, 40).await;

    let deleted = repository
        .delete_stale(Utc::now() - Duration::days(30))
        .await
        .unwrap();

    assert_eq!(deleted, 1);
    assert!(repository.get_and_touch(1).await.unwrap().is_none());
    assert!(repository.get_and_touch(2).await.unwrap().is_some());
}

#[sqlx::test]
async fn test_touch_rescues_record_from_cleanup(pool: PgPool) {
    let (_, repository, pool) = repositories(pool);

    repository.put(1, "https://example.com").await.unwrap();
    backdate(&pool, 1, 40).await;
    repository.get_and_touch(1).await.unwrap();

    let deleted = repository
        .delete_stale(Utc::now() - Duration::days(30))
        .await
        .unwrap();

    assert_eq!(deleted, 0);
}

#[sqlx::test]
async fn test_initialize_resets_counter_and_urls(pool: PgPool) {
    let (allocator, repository, _) = repositories(pool);

    for _ in 0..3 {
        let id = allocator.next_id().await.unwrap();
        repository.put(id, "https://example.com").await.unwrap();
    }

    repository.initialize().await.unwrap();

    assert_eq!(repository.count().await.unwrap(), 0);
    assert_eq!(allocator.current().await.unwrap(), 0);
    assert_eq!(allocator.next_id().await.unwrap(), 1);
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let (_, repository, _) = repositories(pool);

    assert!(repository.ping().await.is_ok());
}
