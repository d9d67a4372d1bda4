// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access token lifecycle for the Setmore API.
//!
//! The store owns the long-lived refresh token and the current short-lived
//! access token. The access token is replaced wholesale on refresh, and
//! refreshes are serialized: callers that hit an auth failure with the same
//! token coalesce into a single refresh.

use crate::error::AppError;
use crate::services::setmore::SetmoreClient;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, RwLock};

/// An access token together with the refresh generation that produced it.
#[derive(Clone)]
pub struct AccessToken {
    pub value: String,
    /// Incremented on every successful refresh; 0 means never acquired.
    pub generation: u64,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("generation", &self.generation)
            .finish()
    }
}

#[derive(Default)]
struct TokenState {
    access_token: Option<String>,
    generation: u64,
}

/// Holds the refresh credential and the current access token.
pub struct CredentialStore {
    client: SetmoreClient,
    refresh_token: String,
    state: RwLock<TokenState>,
    /// Serializes refresh calls so only one exchange is in flight.
    refresh_lock: Mutex<()>,
    refreshes: AtomicUsize,
}

impl CredentialStore {
    /// Create a store. No token is acquired until first use or `refresh()`.
    pub fn new(client: SetmoreClient, refresh_token: String) -> Self {
        Self {
            client,
            refresh_token,
            state: RwLock::new(TokenState::default()),
            refresh_lock: Mutex::new(()),
            refreshes: AtomicUsize::new(0),
        }
    }

    /// Exchange the refresh credential for a new access token without
    /// storing it.
    pub async fn acquire_token(&self) -> Result<String, AppError> {
        self.client
            .exchange_refresh_token(&self.refresh_token)
            .await
    }

    /// The last acquired access token.
    pub async fn current_token(&self) -> Result<String, AppError> {
        self.state
            .read()
            .await
            .access_token
            .clone()
            .ok_or_else(|| AppError::Auth("No access token acquired yet".to_string()))
    }

    /// Current token, acquiring one first if none is held.
    pub async fn ensure_token(&self) -> Result<AccessToken, AppError> {
        let seen = {
            let state = self.state.read().await;
            if let Some(token) = &state.access_token {
                return Ok(AccessToken {
                    value: token.clone(),
                    generation: state.generation,
                });
            }
            state.generation
        };

        self.refresh_from(seen).await
    }

    /// Unconditionally exchange the refresh credential and store the result.
    pub async fn refresh(&self) -> Result<String, AppError> {
        let _guard = self.refresh_lock.lock().await;
        Ok(self.refresh_locked().await?.value)
    }

    /// Refresh unless someone already did since generation `seen`.
    ///
    /// A caller whose token was rejected passes the generation of that token.
    /// If another task refreshed in the meantime, the newer token is returned
    /// without another exchange.
    pub async fn refresh_from(&self, seen: u64) -> Result<AccessToken, AppError> {
        let _guard = self.refresh_lock.lock().await;

        {
            let state = self.state.read().await;
            if state.generation != seen {
                if let Some(token) = &state.access_token {
                    tracing::debug!(
                        generation = state.generation,
                        "Token already refreshed by another caller"
                    );
                    return Ok(AccessToken {
                        value: token.clone(),
                        generation: state.generation,
                    });
                }
            }
        }

        self.refresh_locked().await
    }

    /// Number of successful refreshes performed by this store.
    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    /// Caller must hold `refresh_lock`.
    async fn refresh_locked(&self) -> Result<AccessToken, AppError> {
        let value = self.acquire_token().await?;

        let generation = {
            let mut state = self.state.write().await;
            state.access_token = Some(value.clone());
            state.generation += 1;
            state.generation
        };
        self.refreshes.fetch_add(1, Ordering::SeqCst);

        tracing::info!(generation, "Setmore access token refreshed");
        Ok(AccessToken { value, generation })
    }
}
