//! Audit trail for accounting tables
//!
//! Records create, update and delete operations with before/after snapshots
//! and the set of fields that changed, attributed to the acting user.
//!
//! # Architecture
//!
//! - `AuditLogEntry` / `NewAuditEntry`: a stored entry and the row submitted
//!   to the store before it assigns an ID and timestamp.
//! - `changed_fields`: structural, key-order-independent field diff.
//! - `AuditTrail`: records entries through an [`AuditStore`](crate::store::AuditStore)
//!   and lists history back, newest first.
//! - `format_action` / `format_table_name`: total display mappings.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ledger_audit::audit::{AuditAction, AuditTrail};
//! use ledger_audit::store::{MemoryAuditStore, StaticActor};
//!
//! let trail = AuditTrail::new(
//!     Arc::new(MemoryAuditStore::new()),
//!     Arc::new(StaticActor::user(user_id)),
//! );
//!
//! trail
//!     .record_entry("accounts", "1105", AuditAction::Update, Some(before), Some(after))
//!     .await?;
//! let history = trail.record_history("accounts", "1105").await?;
//! ```

mod diff;
mod entry;
mod format;
mod query;
mod service;

pub use diff::{changed_fields, describe_changes, format_value};
pub use entry::{AuditAction, AuditLogEntry, FieldValues, NewAuditEntry};
pub use format::{format_action, format_table_name, TrackedTable};
pub use query::{AuditQuery, DEFAULT_HISTORY_LIMIT};
pub use service::AuditTrail;
