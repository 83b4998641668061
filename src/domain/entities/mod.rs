//! Core domain entities.
//!
//! - [`UrlRecord`] - A stored URL with its last-visit timestamp
//! - [`StorageSummary`] - Operator-facing snapshot of storage state

pub mod storage_summary;
pub mod url_record;

pub use storage_summary::StorageSummary;
pub use url_record::UrlRecord;
