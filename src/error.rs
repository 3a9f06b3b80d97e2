//! Custom error types for ledger-audit
//!
//! This module defines the error hierarchy for the audit trail using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for audit trail operations
#[derive(Error, Debug)]
pub enum AuditError {
    /// Failure reported by the backing row store (insert or query)
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// An entry that violates the audit entry invariants
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// No backing store could be built from the current settings
    #[error("Audit store is not configured: missing {missing}")]
    NotConfigured { missing: &'static str },
}

impl AuditError {
    /// Check if this is a storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for AuditError {
    fn from(err: reqwest::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for audit trail operations
pub type AuditResult<T> = Result<T, AuditError>;
