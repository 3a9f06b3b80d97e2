use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ledger_audit::audit::AuditTrail;
use ledger_audit::cli::{
    handle_config_command, handle_diff_command, handle_format_command, handle_history_command,
    ConfigCommands, FormatCommands, HistoryCommands,
};
use ledger_audit::config::{AuditPaths, Settings};
use ledger_audit::display::read_only_banner;
use ledger_audit::error::AuditError;
use ledger_audit::store::connect;

#[derive(Parser)]
#[command(
    name = "ledger-audit",
    version,
    about = "Field-level audit trail for accounting tables",
    long_about = "ledger-audit records and browses the change history of the tracked \
                  accounting tables (journal entries, accounts, auxiliary ledger, \
                  kardex movements) stored in a Supabase project."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and export the audit history
    #[command(subcommand)]
    History(HistoryCommands),

    /// Show which fields differ between two JSON snapshots
    Diff {
        /// Snapshot before the mutation (JSON object or null)
        old: PathBuf,
        /// Snapshot after the mutation (JSON object or null)
        new: PathBuf,
    },

    /// Show display labels for raw action and table values
    #[command(subcommand)]
    Format(FormatCommands),

    /// Show or change configuration (shows it when no subcommand is given)
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = AuditPaths::new()?;
    let settings = Settings::load(&paths)?;

    if let Some(banner) = read_only_banner(settings.read_only) {
        eprintln!("{}", banner);
    }

    match cli.command {
        Some(Commands::History(cmd)) => {
            let trail = build_trail(&settings)?;
            handle_history_command(&trail, &settings, cmd).await?;
        }
        Some(Commands::Diff { old, new }) => {
            handle_diff_command(&old, &new)?;
        }
        Some(Commands::Format(cmd)) => handle_format_command(cmd),
        Some(Commands::Config { command }) => {
            handle_config_command(&paths, &settings, command.unwrap_or(ConfigCommands::Show))?;
        }
        None => {
            println!("ledger-audit - Field-level audit trail for accounting tables");
            println!();
            println!("Run 'ledger-audit --help' for usage information.");
        }
    }

    Ok(())
}

fn build_trail(settings: &Settings) -> Result<AuditTrail, AuditError> {
    let store = connect(settings)?.ok_or(AuditError::NotConfigured {
        missing: if settings.supabase_url.is_none() {
            "SUPABASE_URL"
        } else {
            "SUPABASE_ANON_KEY"
        },
    })?;

    let store = Arc::new(store);
    Ok(AuditTrail::new(store.clone(), store))
}
