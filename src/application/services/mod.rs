//! Business logic services for the application layer.

pub mod maintenance_service;
pub mod shortening_service;

pub use maintenance_service::{MaintenanceService, run_cleanup_worker};
pub use shortening_service::{ShorteningService, short_url};
