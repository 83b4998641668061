//! Domain layer containing entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Storage trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. The short-code codec it relies on is pure and lives in
//! [`crate::utils::code_codec`].
//!
//! # Request Flow
//!
//! 1. `POST /shorten_url` → [`repositories::IdAllocator::next_id`] →
//!    [`repositories::UrlRepository::put`] → code
//! 2. `GET /{code}` → decode → [`repositories::UrlRepository::get_and_touch`] → redirect
//! 3. Out of band: [`repositories::UrlRepository::delete_stale`] removes idle records

pub mod entities;
pub mod repositories;
