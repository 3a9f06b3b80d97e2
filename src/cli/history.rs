//! History CLI commands
//!
//! Lists and exports the audit history held by the configured store.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::audit::{AuditQuery, AuditTrail};
use crate::config::Settings;
use crate::display::{format_entry_details, format_history_list};
use crate::error::{AuditError, AuditResult};
use crate::export::{export_history, ExportFormat, HistoryExport};

/// History subcommands
#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List audit entries, newest first
    List {
        /// Only entries for this table (e.g. journal_entries)
        #[arg(short, long)]
        table: Option<String>,
        /// Only entries for this record ID
        #[arg(short, long)]
        record: Option<String>,
        /// Maximum number of entries (defaults to the configured history limit)
        #[arg(short, long)]
        limit: Option<u32>,
        /// Show snapshots and per-field changes for each entry
        #[arg(short, long)]
        details: bool,
    },
    /// Export audit entries to a file or stdout
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Only entries for this table
        #[arg(short, long)]
        table: Option<String>,
        /// Only entries for this record ID
        #[arg(short, long)]
        record: Option<String>,
        /// Maximum number of entries (defaults to the configured history limit)
        #[arg(short, long)]
        limit: Option<u32>,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn build_query(
    settings: &Settings,
    table: Option<String>,
    record: Option<String>,
    limit: Option<u32>,
) -> AuditQuery {
    AuditQuery {
        table_name: table,
        record_id: record,
        limit: limit.unwrap_or(settings.history_limit),
    }
}

/// Handle a history command
pub async fn handle_history_command(
    trail: &AuditTrail,
    settings: &Settings,
    cmd: HistoryCommands,
) -> AuditResult<()> {
    match cmd {
        HistoryCommands::List {
            table,
            record,
            limit,
            details,
        } => {
            let query = build_query(settings, table, record, limit);
            let entries = trail.query(&query).await?;

            if details {
                for entry in &entries {
                    println!("{}", format_entry_details(entry));
                }
                if entries.is_empty() {
                    println!("No audit entries found.");
                }
            } else {
                print!("{}", format_history_list(&entries));
            }
        }

        HistoryCommands::Export {
            format,
            table,
            record,
            limit,
            output,
        } => {
            let query = build_query(settings, table, record, limit);
            let entries = trail.query(&query).await?;
            let count = entries.len();
            let export = HistoryExport::new(query, entries);

            match output {
                Some(path) => {
                    let file = File::create(&path).map_err(|e| {
                        AuditError::Export(format!("Failed to create {}: {}", path.display(), e))
                    })?;
                    let mut writer = BufWriter::new(file);
                    export_history(format, &export, &mut writer)?;
                    writer.flush()?;
                    println!("Exported {} entries to {}", count, path.display());
                }
                None => {
                    let stdout = io::stdout();
                    let mut writer = stdout.lock();
                    export_history(format, &export, &mut writer)?;
                }
            }
        }
    }

    Ok(())
}
