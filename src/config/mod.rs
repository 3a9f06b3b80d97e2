//! Configuration module for ledger-audit
//!
//! This module provides configuration management including:
//! - Platform config directory resolution
//! - Settings persistence with environment overrides

pub mod paths;
pub mod settings;

pub use paths::AuditPaths;
pub use settings::Settings;
