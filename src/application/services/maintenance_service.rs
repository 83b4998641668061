//! Out-of-band storage maintenance: setup, expiry cleanup and summaries.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use tracing::{error, info, warn};

use crate::domain::entities::StorageSummary;
use crate::domain::repositories::{IdAllocator, UrlRepository};
use crate::error::AppError;

/// Maintenance operations that never run on the request path.
pub struct MaintenanceService<A: IdAllocator + ?Sized, R: UrlRepository + ?Sized> {
    allocator: Arc<A>,
    url_repository: Arc<R>,
}

impl<A: IdAllocator + ?Sized, R: UrlRepository + ?Sized> MaintenanceService<A, R> {
    /// Creates a new maintenance service.
    pub fn new(allocator: Arc<A>, url_repository: Arc<R>) -> Self {
        Self {
            allocator,
            url_repository,
        }
    }

    /// Resets the counter and deletes every stored URL.
    ///
    /// # Errors
    ///
    /// Returns storage errors from [`UrlRepository::initialize`].
    pub async fn initialize(&self) -> Result<(), AppError> {
        warn!("Initializing storage: counter reset and all URLs removed");
        self.url_repository.initialize().await
    }

    /// Deletes every record not visited within `max_age`.
    ///
    /// Returns the number of deleted records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a negative `max_age` or one that
    /// reaches past the representable date range, otherwise storage errors
    /// from [`UrlRepository::delete_stale`].
    pub async fn cleanup(&self, max_age: Duration) -> Result<u64, AppError> {
        if max_age < Duration::zero() {
            return Err(AppError::bad_request("Retention period cannot be negative"));
        }

        let cutoff = Utc::now()
            .checked_sub_signed(max_age)
            .ok_or_else(|| AppError::bad_request("Retention period is too long"))?;
        let deleted = self.url_repository.delete_stale(cutoff).await?;

        info!(deleted, cutoff = %cutoff, "Removed stale URLs");
        Ok(deleted)
    }

    /// [`Self::cleanup`] with a retention period in days.
    ///
    /// # Errors
    ///
    /// See [`Self::cleanup`].
    pub async fn cleanup_days(&self, days: u32) -> Result<u64, AppError> {
        self.cleanup(Duration::days(i64::from(days))).await
    }

    /// Reports stored record count and the current counter value.
    ///
    /// # Errors
    ///
    /// Returns storage errors from either repository.
    pub async fn summary(&self) -> Result<StorageSummary, AppError> {
        let stored_urls = self.url_repository.count().await?;
        let url_count = self.allocator.current().await?;

        Ok(StorageSummary {
            stored_urls,
            url_count,
        })
    }
}

/// Runs [`MaintenanceService::cleanup_days`] every `interval` until the task
/// is dropped.
///
/// The first sweep happens after one full interval. Failures are logged and
/// the next tick proceeds as normal.
pub async fn run_cleanup_worker<A, R>(
    service: Arc<MaintenanceService<A, R>>,
    max_days: u32,
    interval: StdDuration,
) where
    A: IdAllocator + ?Sized,
    R: UrlRepository + ?Sized,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // First tick completes immediately.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        if let Err(e) = service.cleanup_days(max_days).await {
            error!(error = %e, "Scheduled cleanup failed");
        }
    }
}
