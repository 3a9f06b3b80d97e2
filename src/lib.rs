//! ledger-audit - Field-level audit trail for accounting tables
//!
//! This library records who changed what in the tracked tables of an
//! accounting application (journal entries and their lines, accounts, the
//! auxiliary ledger, kardex movements) and serves that history back in a
//! human-readable form.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `audit`: entry types, field diffing, the `AuditTrail` service, display labels
//! - `store`: the `AuditStore` / `ActorResolver` traits with in-memory and
//!   Supabase REST backends
//! - `config`: config directory resolution and settings with environment overrides
//! - `display`: terminal rendering of history and the read-only banner
//! - `export`: JSON, CSV and YAML export of a history listing
//! - `cli`: command handlers for the `ledger-audit` binary
//! - `error`: custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ledger_audit::audit::AuditTrail;
//! use ledger_audit::config::{AuditPaths, Settings};
//! use ledger_audit::store::connect;
//!
//! let settings = Settings::load(&AuditPaths::new()?)?;
//! if let Some(store) = connect(&settings)? {
//!     let store = Arc::new(store);
//!     let trail = AuditTrail::new(store.clone(), store);
//!     let history = trail.list_entries(Some("accounts"), None, None).await?;
//! }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod store;

pub use audit::{AuditAction, AuditLogEntry, AuditTrail};
pub use error::{AuditError, AuditResult};
