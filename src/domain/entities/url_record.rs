//! Stored URL record.

use chrono::{DateTime, Utc};

/// A shortened URL as persisted by the store.
///
/// `id` is the value handed out by the allocator; the short code is derived
/// from it and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub url: String,
    pub last_visited: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(id: i64, url: String, last_visited: DateTime<Utc>) -> Self {
        Self {
            id,
            url,
            last_visited,
        }
    }

    /// Returns true if the record was last visited before `cutoff`.
    pub fn is_stale(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_visited < cutoff
    }
}
