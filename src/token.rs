//! Access token cache
//!
//! The provider's bearer token is the only shared mutable state in the
//! gateway. `CredentialCache` keeps one token per process, refreshes it on
//! demand, and collapses concurrent refreshes into a single authentication
//! round trip.

use crate::api::{CollectionApi, TokenGrant};
use crate::error::{GatewayError, GatewayResult};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info};

/// Buffer subtracted from the provider's nominal expiry so a token is
/// never used while it may expire mid-request
const SAFETY_MARGIN_SECS: i64 = 60;

/// A bearer credential with its effective expiry. Replaced on refresh,
/// never mutated in place; never persisted outside process memory.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub value: String,
    /// Provider expiry minus the safety margin
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn from_grant(grant: TokenGrant, now: DateTime<Utc>) -> Self {
        let ttl = Duration::seconds(grant.expires_in as i64);
        Self {
            value: grant.access_token,
            expires_at: now + ttl - Duration::seconds(SAFETY_MARGIN_SECS),
        }
    }

    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Shared token cache with single-flight refresh
pub struct CredentialCache {
    api: Arc<dyn CollectionApi>,
    current: RwLock<Option<AccessToken>>,
    // Refresh coordination point: the one place a lock is held across a
    // network call. Waiters queued here re-check the cache and pick up
    // the winner's token instead of authenticating again.
    refresh_gate: Mutex<()>,
}

impl CredentialCache {
    pub fn new(api: Arc<dyn CollectionApi>) -> Self {
        Self {
            api,
            current: RwLock::new(None),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Return a usable token, refreshing it from the provider if the
    /// cached one is absent or within the safety margin of expiry.
    ///
    /// The fast path is a shared read with no I/O; concurrent readers do
    /// not block each other.
    pub async fn get_token(&self) -> GatewayResult<AccessToken> {
        if let Some(token) = self.cached_usable().await {
            return Ok(token);
        }

        let _gate = self.refresh_gate.lock().await;

        // A concurrent refresher may have won while we waited on the gate
        if let Some(token) = self.cached_usable().await {
            return Ok(token);
        }

        let grant = self.api.create_access_token().await.map_err(|e| {
            error!("collection token request failed: {e}");
            GatewayError::AuthenticationFailed {
                message: e.to_string(),
            }
        })?;

        let token = AccessToken::from_grant(grant, Utc::now());
        info!(expires_at = %token.expires_at, "obtained collection access token");
        *self.current.write().await = Some(token.clone());
        Ok(token)
    }

    async fn cached_usable(&self) -> Option<AccessToken> {
        let guard = self.current.read().await;
        guard
            .as_ref()
            .filter(|token| token.is_usable(Utc::now()))
            .cloned()
    }
}
