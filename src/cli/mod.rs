//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the audit trail.

pub mod config;
pub mod diff;
pub mod format;
pub mod history;

pub use config::{handle_config_command, ConfigCommands};
pub use diff::handle_diff_command;
pub use format::{handle_format_command, FormatCommands};
pub use history::{handle_history_command, HistoryCommands};
