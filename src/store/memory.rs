//! In-memory audit store. Suitable for development and testing.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::audit::{AuditLogEntry, AuditQuery, NewAuditEntry};
use crate::error::{AuditError, AuditResult};
use crate::models::{EntryId, UserId};

use super::{ActorResolver, AuditStore};

/// In-memory audit store
///
/// Entries are kept in insertion order. Assigned timestamps strictly increase
/// so that newest-first ordering is deterministic within one process.
#[derive(Default)]
pub struct MemoryAuditStore {
    entries: RwLock<Vec<AuditLogEntry>>,
    /// When set, every call fails with this message.
    failure: RwLock<Option<String>>,
}

impl MemoryAuditStore {
    /// Create a new empty in-memory audit store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an already-stored entry, keeping its ID and timestamp
    pub async fn seed(&self, entry: AuditLogEntry) {
        self.entries.write().await.push(entry);
    }

    /// Make every subsequent call fail with a storage error (or recover with `None`)
    pub async fn set_failure(&self, message: Option<String>) {
        *self.failure.write().await = message;
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    async fn check_failure(&self) -> AuditResult<()> {
        match self.failure.read().await.as_ref() {
            Some(message) => Err(AuditError::Storage(message.clone())),
            None => Ok(()),
        }
    }
}

fn next_timestamp(last: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match last {
        Some(last) if now <= last => last + Duration::microseconds(1),
        _ => now,
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn insert(&self, entry: NewAuditEntry) -> AuditResult<Option<AuditLogEntry>> {
        self.check_failure().await?;

        let mut entries = self.entries.write().await;
        let last = entries.iter().map(|e| e.created_at).max();
        let stored = AuditLogEntry::from_new(EntryId::new(), next_timestamp(last), entry);
        entries.push(stored.clone());
        Ok(Some(stored))
    }

    async fn query(&self, query: &AuditQuery) -> AuditResult<Vec<AuditLogEntry>> {
        self.check_failure().await?;

        let mut matching: Vec<AuditLogEntry> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| query.matches(&e.table_name, &e.record_id))
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(query.limit as usize);
        Ok(matching)
    }
}

/// Actor resolver returning a fixed identity
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticActor(pub Option<UserId>);

impl StaticActor {
    /// A session authenticated as `user`
    pub fn user(user: UserId) -> Self {
        Self(Some(user))
    }

    /// An unauthenticated session
    pub fn anonymous() -> Self {
        Self(None)
    }
}

#[async_trait]
impl ActorResolver for StaticActor {
    async fn current_actor_id(&self) -> AuditResult<Option<UserId>> {
        Ok(self.0)
    }
}
