//! Repository trait definitions for the domain layer.
//!
//! These traits are the storage contract of the service. Implementations live
//! in `crate::infrastructure`; mocks are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`IdAllocator`] - Durable, strictly increasing id sequence
//! - [`UrlRepository`] - URL records with touch-on-read and expiry deletion

pub mod id_allocator;
pub mod url_repository;

pub use id_allocator::IdAllocator;
pub use url_repository::UrlRepository;

#[cfg(test)]
pub use id_allocator::MockIdAllocator;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
