//! Repository trait for id allocation.

use crate::error::AppError;
use async_trait::async_trait;

/// Hands out record ids from a durable counter.
///
/// Each call to [`IdAllocator::next_id`] increments the counter and returns
/// the new value in a single atomic storage operation, so concurrent callers
/// (threads or separate service instances) never observe the same id.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgIdAllocator`] - PostgreSQL counter row
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process counter
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdAllocator: Send + Sync {
    /// Increments the counter and returns its new value.
    ///
    /// The first id after initialization is `1`. An id consumed by a request
    /// that never stores a record is simply skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the store cannot be reached.
    /// Callers must not substitute an id of their own.
    async fn next_id(&self) -> Result<i64, AppError>;

    /// Reads the counter without incrementing it.
    ///
    /// Returns `0` when the counter has never been initialized.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] or [`AppError::Internal`] on storage errors.
    async fn current(&self) -> Result<i64, AppError>;
}
