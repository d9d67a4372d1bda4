// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Setmore API client for staff, services and appointments.
//!
//! Handles:
//! - Refresh-token exchange for short-lived access tokens
//! - Response shape validation (expired tokens show up as a payload without
//!   the expected keys, not as a dedicated error code)
//! - One-shot re-authentication and retry of a failed call

use crate::error::AppError;
use crate::models::{Page, RawAppointment, Service, StaffMember};
use crate::services::credentials::CredentialStore;
use crate::time_utils::format_query_date;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Longest slice of a failed payload kept in error messages.
const MAX_RAW_IN_ERROR: usize = 512;

/// Outcome of a single authenticated call.
///
/// Transport and server failures are returned as `Err` and are terminal.
#[derive(Debug)]
pub enum ApiOutcome<T> {
    /// Response had the expected shape.
    Ok(T),
    /// Response was rejected or malformed; likely an expired token.
    AuthFailure { raw: String },
}

/// Low-level Setmore API client.
#[derive(Clone)]
pub struct SetmoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl SetmoreClient {
    /// Create a new client with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Exchange the long-lived refresh token for an access token.
    pub async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<String, AppError> {
        let url = format!("{}/o/oauth2/token", self.base_url);

        // The refresh token rides in the query string; strip the URL from
        // transport errors so it never reaches a message or a log line.
        let response = self
            .http
            .get(&url)
            .query(&[("refreshToken", refresh_token)])
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Token request failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| {
                AppError::Auth(format!("Token response unreadable: {}", e.without_url()))
            })?;

        if !status.is_success() {
            tracing::error!(status = %status, "Setmore token exchange failed");
            return Err(AppError::Auth(format!(
                "Token exchange failed with status {}",
                status
            )));
        }

        serde_json::from_str::<Envelope<TokenData>>(&body)
            .map(|env| env.data.token.access_token)
            .map_err(|e| AppError::Auth(format!("Failed to parse token response: {}", e)))
    }

    /// List all staff members.
    pub async fn list_staff(
        &self,
        access_token: &str,
    ) -> Result<ApiOutcome<Vec<StaffMember>>, AppError> {
        let url = format!("{}/bookingapi/staffs", self.base_url);
        let request = self.http.get(&url).bearer_auth(access_token);

        let outcome = self.get_enveloped::<StaffData>(request).await?;
        Ok(outcome.map(|d| d.staffs))
    }

    /// List all bookable services.
    pub async fn list_services(
        &self,
        access_token: &str,
    ) -> Result<ApiOutcome<Vec<Service>>, AppError> {
        let url = format!("{}/bookingpage/services", self.base_url);
        let request = self.http.get(&url).bearer_auth(access_token);

        let outcome = self.get_enveloped::<ServicesData>(request).await?;
        Ok(outcome.map(|d| d.services))
    }

    /// Fetch one page of appointments between two dates (inclusive).
    pub async fn get_appointments_page(
        &self,
        access_token: &str,
        start: NaiveDate,
        end: NaiveDate,
        cursor: Option<&str>,
    ) -> Result<ApiOutcome<Page>, AppError> {
        let url = format!("{}/bookingapi/appointments", self.base_url);

        let mut request = self.http.get(&url).bearer_auth(access_token).query(&[
            ("startDate", format_query_date(start)),
            ("endDate", format_query_date(end)),
            ("customerDetails", "true".to_string()),
        ]);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }

        let outcome = self.get_enveloped::<AppointmentsData>(request).await?;
        Ok(outcome.map(|d| Page {
            appointments: d.appointments,
            cursor: d.cursor.filter(|c| !c.is_empty()),
        }))
    }

    /// Send a request and validate the `{ "data": ... }` envelope.
    async fn get_enveloped<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<ApiOutcome<T>, AppError> {
        let response = request
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read response body: {}", e)))?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Ok(ApiOutcome::AuthFailure { raw: body });
        }

        if !status.is_success() {
            return Err(AppError::Network(format!(
                "HTTP {}: {}",
                status,
                truncate(&body)
            )));
        }

        match serde_json::from_str::<Envelope<T>>(&body) {
            Ok(env) => Ok(ApiOutcome::Ok(env.data)),
            Err(e) => {
                tracing::debug!(error = %e, "Response missing expected fields");
                Ok(ApiOutcome::AuthFailure { raw: body })
            }
        }
    }
}

impl<T> ApiOutcome<T> {
    fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        match self {
            ApiOutcome::Ok(v) => ApiOutcome::Ok(f(v)),
            ApiOutcome::AuthFailure { raw } => ApiOutcome::AuthFailure { raw },
        }
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct TokenData {
    token: AccessTokenBody,
}

#[derive(Deserialize)]
struct AccessTokenBody {
    access_token: String,
}

#[derive(Deserialize)]
struct StaffData {
    staffs: Vec<StaffMember>,
}

#[derive(Deserialize)]
struct ServicesData {
    services: Vec<Service>,
}

#[derive(Deserialize)]
struct AppointmentsData {
    appointments: Vec<RawAppointment>,
    #[serde(default)]
    cursor: Option<String>,
}

fn truncate(raw: &str) -> &str {
    match raw.char_indices().nth(MAX_RAW_IN_ERROR) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SetmoreService - High-level service with token management
// ─────────────────────────────────────────────────────────────────────────────

/// Setmore API calls with automatic one-shot re-authentication.
///
/// Every call runs with the current access token. If the response comes back
/// rejected or without the expected shape, the credentials are refreshed
/// exactly once and the same call is repeated exactly once. A second failure
/// is surfaced as `AppError::Pagination` carrying the raw payload.
#[derive(Clone)]
pub struct SetmoreService {
    client: SetmoreClient,
    credentials: Arc<CredentialStore>,
}

impl SetmoreService {
    pub fn new(client: SetmoreClient, credentials: Arc<CredentialStore>) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// List staff members.
    pub async fn list_staff(&self) -> Result<Vec<StaffMember>, AppError> {
        let client = &self.client;
        self.with_reauth("bookingapi/staffs", |token| async move {
            client.list_staff(&token).await
        })
        .await
    }

    /// List services.
    pub async fn list_services(&self) -> Result<Vec<Service>, AppError> {
        let client = &self.client;
        self.with_reauth("bookingpage/services", |token| async move {
            client.list_services(&token).await
        })
        .await
    }

    /// Fetch a single appointments page, retrying once after re-auth.
    pub async fn appointments_page(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        cursor: Option<&str>,
    ) -> Result<Page, AppError> {
        let client = &self.client;
        self.with_reauth("bookingapi/appointments", |token| async move {
            client
                .get_appointments_page(&token, start, end, cursor)
                .await
        })
        .await
    }

    /// Run `call` with the current token; on an auth failure refresh once and
    /// run it again with the new token.
    async fn with_reauth<T, F, Fut>(&self, endpoint: &str, call: F) -> Result<T, AppError>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<ApiOutcome<T>, AppError>>,
    {
        let token = self.credentials.ensure_token().await?;

        match call(token.value).await? {
            ApiOutcome::Ok(value) => return Ok(value),
            ApiOutcome::AuthFailure { .. } => {
                tracing::warn!(endpoint, "Setmore rejected request, refreshing access token");
            }
        }

        let refreshed = self.credentials.refresh_from(token.generation).await?;

        match call(refreshed.value).await? {
            ApiOutcome::Ok(value) => Ok(value),
            ApiOutcome::AuthFailure { raw } => {
                tracing::error!(endpoint, "Request failed again after re-authentication");
                Err(AppError::Pagination(format!(
                    "{} returned an unexpected payload after re-authentication: {}",
                    endpoint,
                    truncate(&raw)
                )))
            }
        }
    }
}
