//! Display formatting for terminal output
//!
//! Provides utilities for rendering audit history and the read-only banner.

pub mod banner;
pub mod history;

pub use banner::{read_only_banner, READ_ONLY_BANNER};
pub use history::{format_entry_details, format_history_list};
