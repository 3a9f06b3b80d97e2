//! Audit entry data structures
//!
//! Defines the mutation kinds, the persisted audit log entry, and the
//! insert-side row submitted to the store before it assigns an ID and
//! timestamp.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AuditError, AuditResult};
use crate::models::{EntryId, UserId};

/// Snapshot of a record's fields, keyed by column name
pub type FieldValues = serde_json::Map<String, serde_json::Value>;

/// Kinds of mutation recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    /// Record was created
    Create,
    /// Record was updated
    Update,
    /// Record was deleted
    Delete,
}

impl AuditAction {
    /// Wire representation stored in the `action` column
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CREATE" => Ok(AuditAction::Create),
            "UPDATE" => Ok(AuditAction::Update),
            "DELETE" => Ok(AuditAction::Delete),
            other => Err(AuditError::Validation(format!(
                "Invalid audit action: '{}'. Valid actions: CREATE, UPDATE, DELETE",
                other
            ))),
        }
    }
}

/// A persisted audit log entry
///
/// Entries are write-once: the store assigns `id` and `created_at` on insert
/// and nothing in this crate mutates or deletes them afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Store-assigned identifier
    pub id: EntryId,

    /// Actor who performed the mutation
    pub user_id: UserId,

    /// Tracked table the mutation touched
    pub table_name: String,

    /// Identifier of the affected record
    pub record_id: String,

    /// Kind of mutation
    pub action: AuditAction,

    /// Snapshot before the mutation (absent for creates)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_values: Option<FieldValues>,

    /// Snapshot after the mutation (absent for deletes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_values: Option<FieldValues>,

    /// Fields whose value differs between the snapshots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed_fields: Option<Vec<String>>,

    /// Store-assigned creation time (UTC)
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Build the stored form of a new entry
    pub fn from_new(id: EntryId, created_at: DateTime<Utc>, entry: NewAuditEntry) -> Self {
        Self {
            id,
            user_id: entry.user_id,
            table_name: entry.table_name,
            record_id: entry.record_id,
            action: entry.action,
            old_values: entry.old_values,
            new_values: entry.new_values,
            changed_fields: entry.changed_fields,
            created_at,
        }
    }
}

/// The row submitted to the store; `id` and `created_at` are assigned there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAuditEntry {
    /// Actor who performed the mutation
    pub user_id: UserId,
    /// Tracked table the mutation touched
    pub table_name: String,
    /// Identifier of the affected record
    pub record_id: String,
    /// Kind of mutation
    pub action: AuditAction,
    /// Snapshot before the mutation
    pub old_values: Option<FieldValues>,
    /// Snapshot after the mutation
    pub new_values: Option<FieldValues>,
    /// Differing fields; absent rather than empty
    pub changed_fields: Option<Vec<String>>,
}

impl NewAuditEntry {
    /// Check the entry against the audit log invariants
    pub fn validate(&self) -> AuditResult<()> {
        if self.table_name.trim().is_empty() {
            return Err(AuditError::Validation(
                "Audit entry table name cannot be empty".into(),
            ));
        }

        match self.action {
            AuditAction::Create if self.old_values.is_some() => {
                return Err(AuditError::Validation(
                    "CREATE entries cannot carry old values".into(),
                ));
            }
            AuditAction::Delete if self.new_values.is_some() => {
                return Err(AuditError::Validation(
                    "DELETE entries cannot carry new values".into(),
                ));
            }
            _ => {}
        }

        if let Some(fields) = &self.changed_fields {
            if fields.is_empty() {
                return Err(AuditError::Validation(
                    "changed_fields must be absent rather than empty".into(),
                ));
            }

            let known = |field: &str| {
                self.old_values
                    .as_ref()
                    .is_some_and(|values| values.contains_key(field))
                    || self
                        .new_values
                        .as_ref()
                        .is_some_and(|values| values.contains_key(field))
            };
            if let Some(unknown) = fields.iter().find(|field| !known(field.as_str())) {
                return Err(AuditError::Validation(format!(
                    "changed field '{}' is not present in either snapshot",
                    unknown
                )));
            }
        }

        Ok(())
    }
}
