//! Export module for ledger-audit
//!
//! Writes an audit history listing in one of several formats:
//! - CSV: one row per entry (spreadsheet-compatible)
//! - JSON: machine-readable, with schema version and query metadata
//! - YAML: human-readable variant of the JSON document

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_history_csv;
pub use self::json::{export_history_json, HistoryExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_history_yaml;

use std::io::Write;

use clap::ValueEnum;

use crate::error::AuditResult;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
    Yaml,
}

/// Write a history export in the requested format
pub fn export_history<W: Write>(
    format: ExportFormat,
    export: &HistoryExport,
    writer: &mut W,
) -> AuditResult<()> {
    match format {
        ExportFormat::Json => export_history_json(export, writer),
        ExportFormat::Csv => export_history_csv(&export.entries, writer),
        ExportFormat::Yaml => export_history_yaml(export, writer),
    }
}
