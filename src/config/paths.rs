//! Path management for ledger-audit
//!
//! ## Path Resolution Order
//!
//! 1. `LEDGER_AUDIT_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/ledger-audit` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::AuditError;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "LEDGER_AUDIT_CONFIG_DIR";

/// Manages all paths used by ledger-audit
#[derive(Debug, Clone)]
pub struct AuditPaths {
    base_dir: PathBuf,
}

impl AuditPaths {
    /// Resolve the config directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, AuditError> {
        let base_dir = if let Ok(custom) = std::env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "ledger-audit")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    AuditError::Config("Could not determine the config directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create AuditPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the config directory exists
    pub fn ensure_directories(&self) -> Result<(), AuditError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            AuditError::Io(format!("Failed to create config directory: {}", e))
        })?;

        Ok(())
    }
}
