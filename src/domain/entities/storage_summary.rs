//! Read-only snapshot of storage state for operators.

/// Counts reported by `admin stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageSummary {
    /// Records currently stored.
    pub stored_urls: i64,
    /// Last id handed out by the allocator.
    pub url_count: i64,
}

impl StorageSummary {
    /// Ids allocated but no longer (or never) backed by a record.
    ///
    /// Covers both records removed by cleanup and ids consumed by aborted
    /// requests.
    pub fn vacant_ids(&self) -> i64 {
        (self.url_count - self.stored_urls).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vacant_ids() {
        let summary = StorageSummary {
            stored_urls: 8,
            url_count: 10,
        };
        assert_eq!(summary.vacant_ids(), 2);
    }

    #[test]
    fn test_vacant_ids_never_negative() {
        let summary = StorageSummary {
            stored_urls: 3,
            url_count: 0,
        };
        assert_eq!(summary.vacant_ids(), 0);
    }
}
