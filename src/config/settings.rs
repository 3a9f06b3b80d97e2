//! User settings for ledger-audit
//!
//! Settings live in a JSON file in the config directory. Connection values can
//! be supplied or overridden through the environment, which is how the host
//! application bootstraps its database client.

use serde::{Deserialize, Serialize};

use super::paths::AuditPaths;
use crate::audit::DEFAULT_HISTORY_LIMIT;
use crate::error::AuditError;

/// Project URL, e.g. `https://xyz.supabase.co`
pub const URL_ENV: &str = "SUPABASE_URL";
/// Public (anon) API key
pub const ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";
/// Access token of the signed-in user
pub const ACCESS_TOKEN_ENV: &str = "SUPABASE_ACCESS_TOKEN";
/// `true`/`1` puts the application in read-only mode
pub const READ_ONLY_ENV: &str = "LEDGER_AUDIT_READ_ONLY";

/// User settings for ledger-audit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Supabase project URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supabase_url: Option<String>,

    /// Supabase anon key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supabase_anon_key: Option<String>,

    /// Session token; taken from the environment only, never written to disk
    #[serde(skip)]
    pub access_token: Option<String>,

    /// Whether the access context is read-only
    #[serde(default)]
    pub read_only: bool,

    /// Default number of history entries to list
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_history_limit() -> u32 {
    DEFAULT_HISTORY_LIMIT
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            supabase_url: None,
            supabase_anon_key: None,
            access_token: None,
            read_only: false,
            history_limit: default_history_limit(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Settings {
    /// Load settings from disk and apply environment overrides
    pub fn load(paths: &AuditPaths) -> Result<Self, AuditError> {
        let mut settings = Self::load_or_create(paths)?;
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &AuditPaths) -> Result<Self, AuditError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                AuditError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                AuditError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Overlay values from the environment; `lookup` returns a variable's value
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(URL_ENV) {
            self.supabase_url = Some(url);
        }
        if let Some(key) = non_empty(ANON_KEY_ENV) {
            self.supabase_anon_key = Some(key);
        }
        if let Some(token) = non_empty(ACCESS_TOKEN_ENV) {
            self.access_token = Some(token);
        }
        if let Some(flag) = non_empty(READ_ONLY_ENV) {
            self.read_only = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AuditPaths) -> Result<(), AuditError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            AuditError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            AuditError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Whether enough is configured to reach the store
    pub fn has_store(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_anon_key.is_some()
    }
}
