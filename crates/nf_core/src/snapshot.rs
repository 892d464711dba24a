use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::article::Article;
use crate::error::FetchError;

/// Point-in-time view of the feed handed to consumers. A fresh poller
/// starts with an empty set, not loading, nothing fetched yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub articles: Vec<Article>,
    pub is_loading: bool,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub last_error: Option<FetchError>,
}

impl Snapshot {
    /// True once at least one poll cycle has completed, live or degraded.
    pub fn has_data(&self) -> bool {
        self.last_updated_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_snapshot_is_empty() {
        let snapshot = Snapshot::default();
        assert!(snapshot.articles.is_empty());
        assert!(!snapshot.is_loading);
        assert!(snapshot.last_updated_at.is_none());
        assert!(snapshot.last_error.is_none());
        assert!(!snapshot.has_data());
    }
}
