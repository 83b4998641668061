//! URL shortening and resolution service.

use std::sync::Arc;

use crate::domain::repositories::{IdAllocator, UrlRepository};
use crate::error::AppError;
use crate::utils::code_codec;
use tracing::{debug, error};

/// Turns URLs into short codes and short codes back into URLs.
///
/// Composes an [`IdAllocator`], the codec in [`code_codec`] and a
/// [`UrlRepository`]. Holds no state of its own and never caches records.
///
/// The same URL submitted twice yields two different codes; there is no
/// lookup on the write path.
pub struct ShorteningService<A: IdAllocator + ?Sized, R: UrlRepository + ?Sized> {
    allocator: Arc<A>,
    url_repository: Arc<R>,
}

impl<A: IdAllocator + ?Sized, R: UrlRepository + ?Sized> ShorteningService<A, R> {
    /// Creates a new shortening service.
    pub fn new(allocator: Arc<A>, url_repository: Arc<R>) -> Self {
        Self {
            allocator,
            url_repository,
        }
    }

    /// Stores `url` under a freshly allocated id and returns its short code.
    ///
    /// `url` must already be validated; no checks happen here.
    ///
    /// # Errors
    ///
    /// - [`AppError::Unavailable`] / [`AppError::Internal`] if allocation or
    ///   storage fails
    /// - [`AppError::Conflict`] if the allocated id is already taken, which
    ///   means the counter is corrupt; never retried
    pub async fn shorten(&self, url: &str) -> Result<String, AppError> {
        let id = self.allocator.next_id().await?;

        if let Err(err) = self.url_repository.put(id, url).await {
            if matches!(err, AppError::Conflict { .. }) {
                error!(id, "Allocated id already stored; id counter is out of sync");
            }
            return Err(err);
        }

        let code = code_codec::encode(id)
            .map_err(|e| AppError::internal(format!("Allocator returned unusable id: {e}")))?;

        debug!(id, code = %code, "Shortened URL");
        Ok(code)
    }

    /// Looks up the URL behind a short code and refreshes its last visit.
    ///
    /// Codes are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code is malformed or unknown; the two
    ///   cases are indistinguishable to callers
    /// - [`AppError::Unavailable`] / [`AppError::Internal`] on storage errors
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let id = match code_codec::decode(&code.to_lowercase()) {
            Ok(id) => id,
            Err(e) => {
                debug!(code, reason = %e, "Rejected malformed code");
                return Err(Self::not_found());
            }
        };

        let record = self
            .url_repository
            .get_and_touch(id)
            .await?
            .ok_or_else(Self::not_found)?;

        debug!(id, code, "Resolved short code");
        Ok(record.url)
    }

    fn not_found() -> AppError {
        AppError::not_found("URL not found")
    }
}

/// Builds the public short URL for a code.
pub fn short_url(root_uri: &str, code: &str) -> String {
    format!("{}/{}", root_uri.trim_end_matches('/'), code)
}
