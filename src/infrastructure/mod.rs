//! Infrastructure layer for external integrations.
//!
//! This layer implements the storage traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL implementations
//! - [`memory`] - In-process implementation (development and tests)
//! - [`storage`] - Backend selection from configuration

pub mod memory;
pub mod persistence;
pub mod storage;

pub use storage::Storage;
