use chrono::{DateTime, Utc};
use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};

use super::refresh;
use super::types::{Credentials, TokenState};
use crate::error::{CatalogError, Result};

/// Attempts of the token accessor before it gives up on an upstream that
/// keeps handing out already expired tokens
const MAX_TOKEN_ATTEMPTS: usize = 2;

/// Credential manager
/// Owns the bearer token of one client instance and refreshes it on demand
pub struct CredentialManager {
    /// Client id / secret used for the grant
    credentials: Credentials,

    /// Token endpoint
    token_url: String,

    /// HTTP client for token requests
    client: Client,

    /// Cached token and its expiry
    state: RwLock<TokenState>,

    /// Serializes token requests: one grant in flight per expiry cycle
    refresh_gate: Mutex<()>,

    /// Bumped after every successful grant
    generation: AtomicU64,
}

impl CredentialManager {
    /// Create a manager with an empty token cache
    pub fn new(client: Client, credentials: Credentials, token_url: impl Into<String>) -> Self {
        Self {
            credentials,
            token_url: token_url.into(),
            client,
            state: RwLock::new(TokenState::default()),
            refresh_gate: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn client_id(&self) -> &str {
        self.credentials.client_id()
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Cached token if it is still usable
    async fn cached_token(&self) -> Option<String> {
        let state = self.state.read().await;
        state.usable_token(Utc::now()).map(str::to_string)
    }

    /// Check whether a usable token is cached (no network)
    pub async fn is_token_valid(&self) -> bool {
        self.cached_token().await.is_some()
    }

    /// Expiry of the cached token
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.expires_at
    }

    /// Request a new token and replace the cached one.
    /// Callers that queued behind a grant which succeeded reuse its token.
    pub async fn authenticate(&self) -> Result<()> {
        let seen = self.generation.load(Ordering::Acquire);
        let _gate = self.refresh_gate.lock().await;

        if self.generation.load(Ordering::Acquire) != seen {
            tracing::debug!("Token refreshed while waiting for the gate, reusing it");
            return Ok(());
        }

        self.authenticate_locked().await
    }

    /// Caller must hold the refresh gate. State is written once, after the
    /// grant response has been fully parsed.
    async fn authenticate_locked(&self) -> Result<()> {
        let token =
            refresh::request_token(&self.client, &self.token_url, &self.credentials).await?;

        let mut state = self.state.write().await;
        *state = TokenState {
            access_token: Some(token.access_token),
            expires_at: Some(token.expires_at),
        };
        self.generation.fetch_add(1, Ordering::Release);

        Ok(())
    }

    /// Get a valid access token, authenticating if necessary
    /// Concurrent callers that find the cache stale wait for a single refresh
    pub async fn get_token(&self) -> Result<String> {
        for attempt in 1..=MAX_TOKEN_ATTEMPTS {
            if let Some(token) = self.cached_token().await {
                return Ok(token);
            }

            let _gate = self.refresh_gate.lock().await;

            // Another caller may have refreshed while we waited for the gate
            if let Some(token) = self.cached_token().await {
                return Ok(token);
            }

            tracing::debug!(attempt, "No usable access token, authenticating");

            if let Err(e) = self.authenticate_locked().await {
                tracing::error!("Token refresh failed: {}", e);
                return Err(e);
            }
        }

        if let Some(token) = self.cached_token().await {
            return Ok(token);
        }

        tracing::error!(
            attempts = MAX_TOKEN_ATTEMPTS,
            "Token endpoint keeps returning expired tokens"
        );
        Err(CatalogError::Authentication {
            status: None,
            message: "token endpoint returned an already expired token".to_string(),
        })
    }
}
