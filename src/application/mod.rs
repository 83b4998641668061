//! Application layer services implementing business logic.
//!
//! Services consume the repository traits and give HTTP handlers and the
//! admin CLI a small API.
//!
//! # Available Services
//!
//! - [`services::shortening_service::ShorteningService`] - Shorten and resolve
//! - [`services::maintenance_service::MaintenanceService`] - Initialize, cleanup, summary

pub mod services;
