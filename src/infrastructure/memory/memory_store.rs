//! In-process storage backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{IdAllocator, UrlRepository};
use crate::error::AppError;

#[derive(Debug, Default)]
struct MemoryState {
    url_count: i64,
    records: HashMap<i64, UrlRecord>,
}

/// Counter and URL records held in a single mutex-guarded map.
///
/// Implements both [`IdAllocator`] and [`UrlRepository`]; every operation
/// runs entirely under the lock, which gives the same atomicity the
/// PostgreSQL backend gets from single statements.
///
/// # Use Cases
///
/// - Local development without PostgreSQL (`STORAGE_BACKEND=memory`)
/// - Handler and service tests
///
/// State is lost on restart, and ids are only unique within one process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    /// Creates an empty store with the counter at zero.
    pub fn new() -> Self {
        debug!("Using in-memory storage");
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, AppError> {
        self.state
            .lock()
            .map_err(|_| AppError::internal("In-memory store lock poisoned"))
    }
}

#[async_trait]
impl IdAllocator for MemoryStore {
    async fn next_id(&self) -> Result<i64, AppError> {
        let mut state = self.lock()?;
        state.url_count += 1;
        Ok(state.url_count)
    }

    async fn current(&self) -> Result<i64, AppError> {
        Ok(self.lock()?.url_count)
    }
}

#[async_trait]
impl UrlRepository for MemoryStore {
    async fn put(&self, id: i64, url: &str) -> Result<UrlRecord, AppError> {
        let mut state = self.lock()?;
        if state.records.contains_key(&id) {
            return Err(AppError::conflict(format!("Record {id} already exists")));
        }

        let record = UrlRecord::new(id, url.to_string(), Utc::now());
        state.records.insert(id, record.clone());
        Ok(record)
    }

    async fn get_and_touch(&self, id: i64) -> Result<Option<UrlRecord>, AppError> {
        let mut state = self.lock()?;
        Ok(state.records.get_mut(&id).map(|record| {
            record.last_visited = Utc::now();
            record.clone()
        }))
    }

    async fn delete_stale(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let mut state = self.lock()?;
        let before = state.records.len();
        state.records.retain(|_, record| !record.is_stale(cutoff));
        Ok((before - state.records.len()) as u64)
    }

    async fn initialize(&self) -> Result<(), AppError> {
        let mut state = self.lock()?;
        state.url_count = 0;
        state.records.clear();
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.lock()?.records.len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_next_id_starts_at_one() {
        let store = MemoryStore::new();
        assert_eq!(store.next_id().await.unwrap(), 1);
        assert_eq!(store.next_id().await.unwrap(), 2);
        assert_eq!(store.current().await.unwrap(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_next_id_is_unique_and_contiguous() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..200)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.next_id().await.unwrap() })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }

        assert_eq!(ids.len(), 200);
        assert_eq!(ids, (1..=200).collect::<HashSet<i64>>());
    }

    #[tokio::test]
    async fn test_put_and_get_and_touch() {
        let store = MemoryStore::new();
        let created = store.put(1, "http://davtyan.org").await.unwrap();

        let fetched = store.get_and_touch(1).await.unwrap().unwrap();
        assert_eq!(fetched.url, "http://davtyan.org");
        assert!(fetched.last_visited >= created.last_visited);
    }

    #[tokio::test]
    async fn test_put_duplicate_id_conflicts() {
        let store = MemoryStore::new();
        store.put(5, "https://a.example").await.unwrap();

        let result = store.put(5, "https://b.example").await;
        assert!(matches!(result, Err(AppError::Conflict { .. })));

        let kept = store.get_and_touch(5).await.unwrap().unwrap();
        assert_eq!(kept.url, "https://a.example");
    }

    #[tokio::test]
    async fn test_get_and_touch_missing() {
        let store = MemoryStore::new();
        assert!(store.get_and_touch(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_stale_removes_only_old_records() {
        let store = MemoryStore::new();
        store.put(1, "https://old.example").await.unwrap();

        // Nothing was visited an hour ago or earlier.
        let deleted = store
            .delete_stale(Utc::now() - Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(deleted, 0);
        assert_eq!(store.count().await.unwrap(), 1);

        // Everything was visited before a cutoff in the future.
        let deleted = store
            .delete_stale(Utc::now() + Duration::seconds(1))
            .await
            .unwrap();
        assert_eq!(deleted, 1);
        assert!(store.get_and_touch(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_touch_keeps_record_past_cutoff() {
        let store = MemoryStore::new();
        store.put(1, "https://stale.example").await.unwrap();
        store.put(2, "https://fresh.example").await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        let cutoff = Utc::now();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        store.get_and_touch(2).await.unwrap();

        let deleted = store.delete_stale(cutoff).await.unwrap();
        assert_eq!(deleted, 1);
        assert!(store.get_and_touch(1).await.unwrap().is_none());
        assert!(store.get_and_touch(2).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_initialize_resets_counter_and_records() {
        let store = MemoryStore::new();
        let id = store.next_id().await.unwrap();
        store.put(id, "https://example.com").await.unwrap();

        store.initialize().await.unwrap();

        assert_eq!(store.current().await.unwrap(), 0);
        assert_eq!(store.count().await.unwrap(), 0);
        assert_eq!(store.next_id().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_ping() {
        assert!(MemoryStore::new().ping().await.is_ok());
    }
}
