//! Format CLI commands

use clap::Subcommand;

use crate::audit::{format_action, format_table_name};

/// Format subcommands
#[derive(Subcommand)]
pub enum FormatCommands {
    /// Display label for an action value (CREATE, UPDATE, DELETE)
    Action {
        /// Raw action value
        value: String,
    },
    /// Display label for a technical table name
    Table {
        /// Raw table name
        value: String,
    },
}

/// Handle a format command
pub fn handle_format_command(cmd: FormatCommands) {
    let label = match cmd {
        FormatCommands::Action { value } => format_action(&value),
        FormatCommands::Table { value } => format_table_name(&value),
    };
    println!("{}", label);
}
