//! JSON Export functionality
//!
//! Exports an audit history listing to JSON with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::{AuditLogEntry, AuditQuery};
use crate::error::{AuditError, AuditResult};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// History export document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Filters the listing was produced with
    pub query: AuditQuery,

    /// Entries, newest first
    pub entries: Vec<AuditLogEntry>,
}

impl HistoryExport {
    /// Wrap a listing for export
    pub fn new(query: AuditQuery, entries: Vec<AuditLogEntry>) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            query,
            entries,
        }
    }
}

/// Export a history listing as pretty-printed JSON
pub fn export_history_json<W: Write>(export: &HistoryExport, writer: &mut W) -> AuditResult<()> {
    serde_json::to_writer_pretty(&mut *writer, export)
        .map_err(|e| AuditError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| AuditError::Export(e.to_string()))?;
    Ok(())
}
