//! Backing store for the audit log
//!
//! The audit trail talks to its row store and to the authentication context
//! through two traits so it can run against the Supabase REST API in
//! production and against [`MemoryAuditStore`] in tests.

pub mod memory;
pub mod supabase;

pub use memory::{MemoryAuditStore, StaticActor};
pub use supabase::{connect, SupabaseStore};

use async_trait::async_trait;

use crate::audit::{AuditLogEntry, AuditQuery, NewAuditEntry};
use crate::error::AuditResult;
use crate::models::UserId;

/// Name of the collection holding audit entries
///
/// Row-level security on this table may allow inserts while hiding the new
/// row from the inserting session; [`AuditStore::insert`] reports that case as
/// `Ok(None)` rather than as a failure.
pub const AUDIT_TABLE: &str = "audit_log";

/// Row storage for audit entries
///
/// Implementations must be `Send + Sync` to be shared across async tasks.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Insert a new entry; the store assigns `id` and `created_at`.
    ///
    /// Returns the stored row, or `None` when the write was accepted but the
    /// row could not be read back.
    async fn insert(&self, entry: NewAuditEntry) -> AuditResult<Option<AuditLogEntry>>;

    /// Entries matching the query, newest first, at most `query.limit`.
    async fn query(&self, query: &AuditQuery) -> AuditResult<Vec<AuditLogEntry>>;
}

/// Resolves the actor behind the current session
#[async_trait]
pub trait ActorResolver: Send + Sync {
    /// The authenticated user, or `None` when no identity can be established.
    async fn current_actor_id(&self) -> AuditResult<Option<UserId>>;
}
