//! Supabase REST backend
//!
//! Entries are written to and read from the `audit_log` table through
//! PostgREST (`/rest/v1`); the acting user is resolved through the GoTrue
//! `/auth/v1/user` endpoint using the session's access token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::audit::{AuditLogEntry, AuditQuery, NewAuditEntry};
use crate::config::Settings;
use crate::error::{AuditError, AuditResult};
use crate::models::UserId;

use super::{ActorResolver, AuditStore, AUDIT_TABLE};

/// Connection parameters for a Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL without trailing slash
    pub url: String,
    /// Public API key sent as `apikey` on every request
    pub anon_key: String,
    /// Signed-in user's JWT, if any
    pub access_token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl SupabaseConfig {
    /// Create a configuration for an anonymous session
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_owned(),
            anon_key: anon_key.into(),
            access_token: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Attach the signed-in user's access token
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Override the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from settings; `None` when the URL or key is missing
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        let url = settings.supabase_url.as_deref()?;
        let anon_key = settings.supabase_anon_key.as_deref()?;

        let mut config = Self::new(url, anon_key)
            .with_timeout(Duration::from_secs(settings.request_timeout_secs));
        if let Some(token) = &settings.access_token {
            config = config.with_access_token(token.clone());
        }
        Some(config)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }

    fn user_url(&self) -> String {
        format!("{}/auth/v1/user", self.url)
    }
}

/// Build a store from settings
///
/// Returns `Ok(None)` when the settings do not name a project, so callers
/// handle the "no client" case explicitly.
pub fn connect(settings: &Settings) -> AuditResult<Option<SupabaseStore>> {
    SupabaseConfig::from_settings(settings)
        .map(SupabaseStore::new)
        .transpose()
}

/// Audit store and actor resolver backed by a Supabase project
pub struct SupabaseStore {
    config: SupabaseConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: UserId,
}

impl SupabaseStore {
    /// Create a new store with its own HTTP client
    pub fn new(config: SupabaseConfig) -> AuditResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AuditError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(config, client))
    }

    /// Create a new store sharing an existing HTTP client
    pub fn with_client(config: SupabaseConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Project URL this store talks to
    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .config
            .access_token
            .as_deref()
            .unwrap_or(&self.config.anon_key);
        request.header("apikey", &self.config.anon_key).bearer_auth(bearer)
    }
}

/// PostgREST query-string pairs for a history query
pub fn query_params(query: &AuditQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("select", "*".to_owned())];
    if let Some(table) = &query.table_name {
        params.push(("table_name", format!("eq.{}", table)));
    }
    if let Some(record) = &query.record_id {
        params.push(("record_id", format!("eq.{}", record)));
    }
    params.push(("order", "created_at.desc".to_owned()));
    params.push(("limit", query.limit.to_string()));
    params
}

async fn ensure_success(response: Response) -> AuditResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AuditError::Storage(format!("HTTP {status}: {body}")))
}

#[async_trait]
impl AuditStore for SupabaseStore {
    #[instrument(skip_all, fields(table = %entry.table_name, action = %entry.action))]
    async fn insert(&self, entry: NewAuditEntry) -> AuditResult<Option<AuditLogEntry>> {
        let response = self
            .authorize(self.client.post(self.config.table_url(AUDIT_TABLE)))
            .header("Prefer", "return=representation")
            .json(&entry)
            .send()
            .await?;

        let rows: Vec<AuditLogEntry> = ensure_success(response).await?.json().await?;
        debug!(rows = rows.len(), "audit entry inserted");

        // An empty representation means the select policy hides the row;
        // the insert itself succeeded.
        Ok(rows.into_iter().next())
    }

    #[instrument(skip(self))]
    async fn query(&self, query: &AuditQuery) -> AuditResult<Vec<AuditLogEntry>> {
        let response = self
            .authorize(self.client.get(self.config.table_url(AUDIT_TABLE)))
            .query(&query_params(query))
            .send()
            .await?;

        let rows: Vec<AuditLogEntry> = ensure_success(response).await?.json().await?;
        debug!(rows = rows.len(), "audit history fetched");
        Ok(rows)
    }
}

#[async_trait]
impl ActorResolver for SupabaseStore {
    #[instrument(skip(self))]
    async fn current_actor_id(&self) -> AuditResult<Option<UserId>> {
        if self.config.access_token.is_none() {
            return Ok(None);
        }

        let response = match self
            .authorize(self.client.get(self.config.user_url()))
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "actor lookup failed, treating session as anonymous");
                return Ok(None);
            }
        };

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            debug!(%status, "session token rejected, treating as anonymous");
            return Ok(None);
        }
        if !status.is_success() {
            warn!(%status, "actor lookup failed, treating session as anonymous");
            return Ok(None);
        }

        match response.json::<AuthUser>().await {
            Ok(user) => Ok(Some(user.id)),
            Err(err) => {
                warn!(error = %err, "unreadable user payload, treating session as anonymous");
                Ok(None)
            }
        }
    }
}
