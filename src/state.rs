//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::ShorteningService;
use crate::domain::repositories::{IdAllocator, UrlRepository};
use crate::infrastructure::Storage;

/// Shortening service over whichever backend is configured.
pub type DynShorteningService = ShorteningService<dyn IdAllocator, dyn UrlRepository>;

/// Per-process state; cheap to clone, holds no mutable data of its own.
#[derive(Clone)]
pub struct AppState {
    pub shortening_service: Arc<DynShorteningService>,
    pub url_repository: Arc<dyn UrlRepository>,
    /// Prefix used to build `shortened_url` values.
    pub root_uri: Arc<str>,
}

impl AppState {
    pub fn new(storage: &Storage, root_uri: &str) -> Self {
        let shortening_service = Arc::new(ShorteningService::new(
            storage.allocator.clone(),
            storage.url_repository.clone(),
        ));

        Self {
            shortening_service,
            url_repository: storage.url_repository.clone(),
            root_uri: Arc::from(root_uri),
        }
    }
}
