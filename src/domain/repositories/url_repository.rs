//! Repository trait for URL record storage.

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for URL records.
///
/// Every mutating method is a single atomic operation at the storage layer.
/// In particular [`UrlRepository::get_and_touch`] and
/// [`UrlRepository::delete_stale`] may race on the same record; whichever runs
/// last wins and no caller sees a half-deleted record.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record with `last_visited` set to now.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a record with `id` already exists.
    /// Returns [`AppError::Unavailable`] / [`AppError::Internal`] on storage errors.
    async fn put(&self, id: i64, url: &str) -> Result<UrlRecord, AppError>;

    /// Fetches a record and sets its `last_visited` to now in one step.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` with the refreshed timestamp if found
    /// - `Ok(None)` if no record has this id
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] / [`AppError::Internal`] on storage errors.
    async fn get_and_touch(&self, id: i64) -> Result<Option<UrlRecord>, AppError>;

    /// Deletes every record last visited strictly before `cutoff`.
    ///
    /// Returns the number of deleted records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] / [`AppError::Internal`] on storage errors.
    async fn delete_stale(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError>;

    /// Resets the id counter to zero and removes all records.
    ///
    /// Destructive; meant for one-time setup only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] / [`AppError::Internal`] on storage errors.
    async fn initialize(&self) -> Result<(), AppError>;

    /// Counts stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] / [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if it is not.
    async fn ping(&self) -> Result<(), AppError>;
}
