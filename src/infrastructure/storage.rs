//! Storage backend selection and connection setup.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::{IdAllocator, UrlRepository};
use crate::infrastructure::memory::MemoryStore;
use crate::infrastructure::persistence::{PgIdAllocator, PgUrlRepository};

/// The allocator and URL repository for one backend, as trait objects.
#[derive(Clone)]
pub struct Storage {
    pub allocator: Arc<dyn IdAllocator>,
    pub url_repository: Arc<dyn UrlRepository>,
    /// Present only for the PostgreSQL backend.
    pub pool: Option<Arc<PgPool>>,
}

impl Storage {
    /// Fresh in-memory storage; allocator and repository share one store.
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            allocator: store.clone(),
            url_repository: store,
            pool: None,
        }
    }

    /// PostgreSQL storage over an existing pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            allocator: Arc::new(PgIdAllocator::new(pool.clone())),
            url_repository: Arc::new(PgUrlRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Builds the backend selected by `config`.
    ///
    /// For PostgreSQL this opens the pool and, when `run_migrations` is set,
    /// applies the bundled migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable or migrations fail.
    pub async fn connect(config: &Config, run_migrations: bool) -> Result<Self> {
        match config.storage_backend {
            StorageBackend::Memory => {
                tracing::info!("Storage: in-memory (data is not persisted)");
                Ok(Self::memory())
            }
            StorageBackend::Postgres => {
                let database_url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL must be set for the postgres backend")?;

                let pool = PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                    .idle_timeout(Duration::from_secs(config.db_idle_timeout))
                    .max_lifetime(Duration::from_secs(config.db_max_lifetime))
                    .connect(database_url)
                    .await
                    .context("Failed to connect to database")?;
                tracing::info!("Connected to database");

                if run_migrations {
                    sqlx::migrate!("./migrations")
                        .run(&pool)
                        .await
                        .context("Failed to run migrations")?;
                    tracing::info!("Migrations applied");
                }

                Ok(Self::postgres(Arc::new(pool)))
            }
        }
    }
}
