//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain storage traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgIdAllocator`] - Counter row increments
//! - [`PgUrlRepository`] - URL record storage, touch and cleanup

pub mod pg_id_allocator;
pub mod pg_url_repository;

pub use pg_id_allocator::PgIdAllocator;
pub use pg_url_repository::PgUrlRepository;
