//! CSV Export functionality
//!
//! One row per entry; snapshots are embedded as compact JSON.

use std::io::Write;

use crate::audit::{format_action, format_table_name, AuditLogEntry, FieldValues};
use crate::error::{AuditError, AuditResult};

const HEADER: [&str; 10] = [
    "id",
    "created_at",
    "user_id",
    "table_name",
    "table",
    "record_id",
    "action",
    "changed_fields",
    "old_values",
    "new_values",
];

/// Export a history listing to CSV
pub fn export_history_csv<W: Write>(entries: &[AuditLogEntry], writer: W) -> AuditResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(HEADER)
        .map_err(|e| AuditError::Export(e.to_string()))?;

    for entry in entries {
        out.write_record([
            entry.id.to_string(),
            entry.created_at.to_rfc3339(),
            entry.user_id.to_string(),
            entry.table_name.clone(),
            format_table_name(&entry.table_name),
            entry.record_id.clone(),
            format_action(entry.action.as_str()),
            entry
                .changed_fields
                .as_ref()
                .map(|fields| fields.join(";"))
                .unwrap_or_default(),
            snapshot_json(entry.old_values.as_ref())?,
            snapshot_json(entry.new_values.as_ref())?,
        ])
        .map_err(|e| AuditError::Export(e.to_string()))?;
    }

    out.flush().map_err(|e| AuditError::Export(e.to_string()))?;
    Ok(())
}

fn snapshot_json(values: Option<&FieldValues>) -> AuditResult<String> {
    match values {
        Some(values) => {
            serde_json::to_string(values).map_err(|e| AuditError::Export(e.to_string()))
        }
        None => Ok(String::new()),
    }
}
