//! YAML Export functionality
//!
//! Exports an audit history listing to YAML for human review.

use std::io::Write;

use crate::error::{AuditError, AuditResult};
use crate::export::json::HistoryExport;

/// Export a history listing to YAML
pub fn export_history_yaml<W: Write>(export: &HistoryExport, writer: &mut W) -> AuditResult<()> {
    writeln!(writer, "# ledger-audit history export")
        .map_err(|e| AuditError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| AuditError::Export(e.to_string()))?;
    writeln!(writer, "# Entries: {}", export.entries.len())
        .map_err(|e| AuditError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| AuditError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| AuditError::Export(e.to_string()))?;

    Ok(())
}
