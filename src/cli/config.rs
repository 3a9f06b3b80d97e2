//! Config CLI commands

use clap::Subcommand;

use crate::config::{AuditPaths, Settings};
use crate::error::AuditResult;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,
    /// Persist connection and display settings to the settings file
    Set {
        /// Supabase project URL
        #[arg(long)]
        url: Option<String>,
        /// Supabase anon key
        #[arg(long)]
        anon_key: Option<String>,
        /// Read-only access context
        #[arg(long)]
        read_only: Option<bool>,
        /// Default number of history entries to list
        #[arg(long)]
        history_limit: Option<u32>,
        /// HTTP request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

/// Handle a config command
///
/// `settings` carries environment overrides and is only used for display;
/// `set` edits the file contents alone so overrides are never persisted.
pub fn handle_config_command(
    paths: &AuditPaths,
    settings: &Settings,
    cmd: ConfigCommands,
) -> AuditResult<()> {
    match cmd {
        ConfigCommands::Show => print_config(paths, settings),
        ConfigCommands::Set {
            url,
            anon_key,
            read_only,
            history_limit,
            timeout,
        } => {
            let mut stored = Settings::load_or_create(paths)?;
            if let Some(url) = url {
                stored.supabase_url = Some(url.trim_end_matches('/').to_owned());
            }
            if let Some(key) = anon_key {
                stored.supabase_anon_key = Some(key);
            }
            if let Some(read_only) = read_only {
                stored.read_only = read_only;
            }
            if let Some(limit) = history_limit {
                stored.history_limit = limit;
            }
            if let Some(secs) = timeout {
                stored.request_timeout_secs = secs;
            }
            stored.save(paths)?;
            println!("Saved settings to {}", paths.settings_file().display());
        }
    }

    Ok(())
}

fn print_config(paths: &AuditPaths, settings: &Settings) {
    println!("ledger-audit Configuration");
    println!("==========================");
    println!("Config directory: {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!();
    println!("Settings:");
    println!(
        "  Supabase URL:    {}",
        settings.supabase_url.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  Anon key:        {}",
        if settings.supabase_anon_key.is_some() { "set" } else { "(not set)" }
    );
    println!(
        "  Access token:    {}",
        if settings.access_token.is_some() { "set" } else { "(not set)" }
    );
    println!("  Read-only:       {}", settings.read_only);
    println!("  History limit:   {}", settings.history_limit);
    println!("  Request timeout: {}s", settings.request_timeout_secs);
    println!();
    println!(
        "Store: {}",
        if settings.has_store() { "configured" } else { "not configured" }
    );
}
