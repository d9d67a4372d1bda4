// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.

/// Errors surfaced by the fetch pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Token exchange failed, or a request was rejected as unauthenticated.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Remote unreachable or non-2xx transport failure. Never retried here.
    #[error("Network error: {0}")]
    Network(String),

    /// A reference directory was requested before it was ever persisted.
    #[error("Reference directory not cached: {0}")]
    CacheMiss(String),

    /// Unexpected response shape that survived the one-shot re-auth retry.
    #[error("Unexpected page shape: {0}")]
    Pagination(String),

    #[error("Cache storage error: {0}")]
    Cache(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether this failure should trigger a credential refresh and retry.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AppError::Auth(_))
    }
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, AppError>;
