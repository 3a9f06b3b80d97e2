//! Audit trail service
//!
//! Records one entry per completed mutation and serves the history back.
//! The audit write is independent of the business write it describes: there
//! is no transaction spanning both, and callers must supply a consistent
//! (old, new) pair.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{AuditError, AuditResult};
use crate::store::{ActorResolver, AuditStore};

use super::diff::changed_fields;
use super::entry::{AuditAction, AuditLogEntry, FieldValues, NewAuditEntry};
use super::query::{AuditQuery, DEFAULT_HISTORY_LIMIT};

/// Audit trail over an injected store and actor resolver
#[derive(Clone)]
pub struct AuditTrail {
    store: Arc<dyn AuditStore>,
    actors: Arc<dyn ActorResolver>,
}

impl AuditTrail {
    /// Create a new audit trail
    pub fn new(store: Arc<dyn AuditStore>, actors: Arc<dyn ActorResolver>) -> Self {
        Self { store, actors }
    }

    /// Record a mutation
    ///
    /// Without an authenticated actor nothing is written and `Ok(None)` is
    /// returned; a failed actor lookup counts as no actor. Otherwise exactly
    /// one entry is inserted and `changed_fields` is stored as absent when the
    /// snapshots do not differ. `Ok(None)` is also returned when the store
    /// accepted the row but did not hand it back.
    ///
    /// # Errors
    ///
    /// Validation and insert failures are returned as-is; nothing is retried.
    pub async fn record_entry(
        &self,
        table_name: &str,
        record_id: &str,
        action: AuditAction,
        old_values: Option<FieldValues>,
        new_values: Option<FieldValues>,
    ) -> AuditResult<Option<AuditLogEntry>> {
        let actor = match self.actors.current_actor_id().await {
            Ok(actor) => actor,
            Err(err) => {
                warn!(error = %err, "actor lookup failed, treating session as anonymous");
                None
            }
        };
        let Some(user_id) = actor else {
            debug!(table_name, record_id, %action, "no authenticated actor, audit entry skipped");
            return Ok(None);
        };

        let changed = changed_fields(old_values.as_ref(), new_values.as_ref());
        let entry = NewAuditEntry {
            user_id,
            table_name: table_name.to_owned(),
            record_id: record_id.to_owned(),
            action,
            old_values,
            new_values,
            changed_fields: (!changed.is_empty()).then_some(changed),
        };
        entry.validate()?;

        let stored = self.store.insert(entry).await?;
        match &stored {
            Some(stored) => {
                debug!(entry_id = %stored.id, table_name, record_id, %action, "audit entry recorded");
            }
            None => debug!(table_name, record_id, %action, "audit entry recorded without read-back"),
        }
        Ok(stored)
    }

    /// Record a mutation from a call site that must not fail on audit errors
    ///
    /// Failures are reported as a `warn` event instead of being returned.
    pub async fn record_entry_or_warn(
        &self,
        table_name: &str,
        record_id: &str,
        action: AuditAction,
        old_values: Option<FieldValues>,
        new_values: Option<FieldValues>,
    ) {
        if let Err(err) = self
            .record_entry(table_name, record_id, action, old_values, new_values)
            .await
        {
            warn!(table_name, record_id, %action, error = %err, "failed to record audit entry");
        }
    }

    /// Newest-first history, optionally filtered by table and record
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Storage`] when the query fails; no partial
    /// result is returned.
    pub async fn list_entries(
        &self,
        table_name: Option<&str>,
        record_id: Option<&str>,
        limit: Option<u32>,
    ) -> AuditResult<Vec<AuditLogEntry>> {
        let query = AuditQuery {
            table_name: table_name.map(str::to_owned),
            record_id: record_id.map(str::to_owned),
            limit: limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
        };
        self.query(&query).await
    }

    /// History of one record with the default limit
    pub async fn record_history(
        &self,
        table_name: &str,
        record_id: &str,
    ) -> AuditResult<Vec<AuditLogEntry>> {
        self.list_entries(Some(table_name), Some(record_id), None)
            .await
    }

    /// Run a prepared query
    pub async fn query(&self, query: &AuditQuery) -> AuditResult<Vec<AuditLogEntry>> {
        let mut entries = self.store.query(query).await.map_err(|err| match err {
            AuditError::Storage(_) => err,
            other => AuditError::Storage(other.to_string()),
        })?;

        // Backends are trusted for filtering but not for the ordering and
        // size contract.
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(query.limit as usize);
        debug!(count = entries.len(), ?query, "audit history listed");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};

    use super::*;
    use crate::models::{EntryId, UserId};
    use crate::store::{MemoryAuditStore, StaticActor};

    fn values(v: Value) -> Option<FieldValues> {
        v.as_object().cloned()
    }

    fn trail(actor: StaticActor) -> (AuditTrail, Arc<MemoryAuditStore>) {
        let store = Arc::new(MemoryAuditStore::new());
        let trail = AuditTrail::new(store.clone(), Arc::new(actor));
        (trail, store)
    }

    #[tokio::test]
    async fn update_records_changed_fields() {
        let user = UserId::new();
        let (trail, store) = trail(StaticActor::user(user));

        let stored = trail
            .record_entry(
                "journal_entries",
                "je-1",
                AuditAction::Update,
                values(json!({"amount": 100, "note": "a"})),
                values(json!({"amount": 150, "note": "a"})),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(stored.user_id, user);
        assert_eq!(stored.action, AuditAction::Update);
        assert_eq!(stored.changed_fields, Some(vec!["amount".to_string()]));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn create_stores_absent_changed_fields() {
        let (trail, _store) = trail(StaticActor::user(UserId::new()));

        let stored = trail
            .record_entry(
                "accounts",
                "1105",
                AuditAction::Create,
                None,
                values(json!({"amount": 100})),
            )
            .await
            .unwrap()
            .unwrap();

        assert!(stored.changed_fields.is_none());
        assert!(stored.old_values.is_none());
        assert_eq!(stored.new_values, values(json!({"amount": 100})));
    }

    #[tokio::test]
    async fn unchanged_update_stores_absent_changed_fields() {
        let (trail, _store) = trail(StaticActor::user(UserId::new()));
        let snapshot = values(json!({"amount": 100}));

        let stored = trail
            .record_entry("accounts", "1", AuditAction::Update, snapshot.clone(), snapshot)
            .await
            .unwrap()
            .unwrap();

        assert!(stored.changed_fields.is_none());
    }

    #[tokio::test]
    async fn delete_keeps_old_values_only() {
        let (trail, _store) = trail(StaticActor::user(UserId::new()));

        let stored = trail
            .record_entry(
                "kardex_movements",
                "mv-9",
                AuditAction::Delete,
                values(json!({"qty": 3})),
                None,
            )
            .await
            .unwrap()
            .unwrap();

        assert!(stored.new_values.is_none());
        assert!(stored.changed_fields.is_none());
    }

    #[tokio::test]
    async fn anonymous_session_is_a_silent_noop() {
        let (trail, store) = trail(StaticActor::anonymous());

        let result = trail
            .record_entry(
                "accounts",
                "1",
                AuditAction::Update,
                values(json!({"amount": 1})),
                values(json!({"amount": 2})),
            )
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn anonymous_session_skips_even_a_failing_store() {
        let (trail, store) = trail(StaticActor::anonymous());
        store.set_failure(Some("offline".into())).await;

        let result = trail
            .record_entry("accounts", "1", AuditAction::Create, None, None)
            .await;
        assert!(matches!(result, Ok(None)));
    }

    struct FailingActor;

    #[async_trait::async_trait]
    impl ActorResolver for FailingActor {
        async fn current_actor_id(&self) -> AuditResult<Option<UserId>> {
            Err(AuditError::Storage("HTTP 503 Service Unavailable: down".into()))
        }
    }

    #[tokio::test]
    async fn failed_actor_lookup_skips_without_error() {
        let store = Arc::new(MemoryAuditStore::new());
        let trail = AuditTrail::new(store.clone(), Arc::new(FailingActor));

        let result = trail
            .record_entry("accounts", "1", AuditAction::Create, None, values(json!({"a": 1})))
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn insert_failure_propagates() {
        let (trail, store) = trail(StaticActor::user(UserId::new()));
        store.set_failure(Some("insert rejected".into())).await;

        let err = trail
            .record_entry("accounts", "1", AuditAction::Create, None, values(json!({})))
            .await
            .unwrap_err();
        assert!(err.is_storage());
        assert!(err.to_string().contains("insert rejected"));
    }

    #[tokio::test]
    async fn invalid_entry_is_rejected_before_insert() {
        let (trail, store) = trail(StaticActor::user(UserId::new()));

        let err = trail
            .record_entry("", "1", AuditAction::Create, None, values(json!({})))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn record_or_warn_swallows_failures() {
        let (trail, store) = trail(StaticActor::user(UserId::new()));
        store.set_failure(Some("down".into())).await;

        trail
            .record_entry_or_warn("accounts", "1", AuditAction::Create, None, values(json!({})))
            .await;
        store.set_failure(None).await;
        assert!(store.is_empty().await);

        trail
            .record_entry_or_warn("accounts", "1", AuditAction::Create, None, values(json!({})))
            .await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn list_orders_newest_first() {
        let (trail, store) = trail(StaticActor::user(UserId::new()));
        let now = Utc::now();

        // Seeded out of order on purpose.
        for offset in [30, 10, 50, 20, 40] {
            store
                .seed(AuditLogEntry {
                    id: EntryId::new(),
                    user_id: UserId::new(),
                    table_name: "accounts".into(),
                    record_id: offset.to_string(),
                    action: AuditAction::Create,
                    old_values: None,
                    new_values: values(json!({"n": offset})),
                    changed_fields: None,
                    created_at: now - Duration::seconds(offset),
                })
                .await;
        }

        let entries = trail.list_entries(None, None, None).await.unwrap();
        let order: Vec<&str> = entries.iter().map(|e| e.record_id.as_str()).collect();
        assert_eq!(order, vec!["10", "20", "30", "40", "50"]);
        assert!(entries
            .windows(2)
            .all(|pair| pair[0].created_at > pair[1].created_at));
    }

    #[tokio::test]
    async fn list_respects_limit_and_filters() {
        let (trail, _store) = trail(StaticActor::user(UserId::new()));
        for i in 0..8 {
            let table = if i % 2 == 0 { "accounts" } else { "journal_entries" };
            trail
                .record_entry(table, "r", AuditAction::Create, None, values(json!({"i": i})))
                .await
                .unwrap();
        }

        assert_eq!(trail.list_entries(None, None, Some(3)).await.unwrap().len(), 3);
        assert_eq!(trail.list_entries(None, None, None).await.unwrap().len(), 8);

        let accounts = trail
            .list_entries(Some("accounts"), None, None)
            .await
            .unwrap();
        assert_eq!(accounts.len(), 4);
        assert!(accounts.iter().all(|e| e.table_name == "accounts"));
    }

    #[tokio::test]
    async fn record_history_tracks_one_record() {
        let (trail, _store) = trail(StaticActor::user(UserId::new()));

        trail
            .record_entry("accounts", "1", AuditAction::Create, None, values(json!({"a": 1})))
            .await
            .unwrap();
        trail
            .record_entry(
                "accounts",
                "1",
                AuditAction::Update,
                values(json!({"a": 1})),
                values(json!({"a": 2})),
            )
            .await
            .unwrap();
        trail
            .record_entry("accounts", "2", AuditAction::Create, None, values(json!({"a": 1})))
            .await
            .unwrap();

        let history = trail.record_history("accounts", "1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].action, AuditAction::Update);
        assert_eq!(history[1].action, AuditAction::Create);
    }

    #[tokio::test]
    async fn query_failure_is_storage_error() {
        let (trail, store) = trail(StaticActor::user(UserId::new()));
        store.set_failure(Some("timeout".into())).await;

        let err = trail.list_entries(None, None, None).await.unwrap_err();
        assert!(err.is_storage());
    }
}
