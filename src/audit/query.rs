//! History query parameters

use serde::{Deserialize, Serialize};

/// Number of entries returned when no limit is given
pub const DEFAULT_HISTORY_LIMIT: u32 = 100;

/// Filters for an audit history listing
///
/// Results are always ordered by `created_at` descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditQuery {
    /// Exact match on `table_name`
    #[serde(default)]
    pub table_name: Option<String>,
    /// Exact match on `record_id`
    #[serde(default)]
    pub record_id: Option<String>,
    /// Maximum number of entries to return
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_HISTORY_LIMIT
}

impl Default for AuditQuery {
    fn default() -> Self {
        Self {
            table_name: None,
            record_id: None,
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl AuditQuery {
    /// Query for every tracked table
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one table
    #[must_use]
    pub fn table(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    /// Restrict to one record
    #[must_use]
    pub fn record(mut self, record_id: impl Into<String>) -> Self {
        self.record_id = Some(record_id.into());
        self
    }

    /// Cap the number of entries
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Check whether a row passes the filters
    pub fn matches(&self, table_name: &str, record_id: &str) -> bool {
        self.table_name.as_deref().map_or(true, |t| t == table_name)
            && self.record_id.as_deref().map_or(true, |r| r == record_id)
    }
}
