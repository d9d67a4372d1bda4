// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Setmore-Report: appointment reporting on top of the Setmore booking API
//!
//! This crate authenticates against Setmore, caches staff and service
//! directories locally, and turns paginated appointment listings into a flat
//! table for reporting.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

use config::Config;
use db::DirectoryCache;
use error::AppError;
use services::{
    AppointmentFetcher, CredentialStore, DirectoryService, ReportService, SetmoreClient,
    SetmoreService,
};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub credentials: Arc<CredentialStore>,
    pub directory_service: DirectoryService,
    pub report_service: ReportService,
}

impl AppState {
    /// Wire up all services from `config`, caching directories on disk.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let cache = DirectoryCache::new(&config.cache_dir);
        Self::with_cache(config, cache)
    }

    /// Wire up all services with an explicit directory cache.
    pub fn with_cache(config: Config, cache: DirectoryCache) -> Result<Self, AppError> {
        let client = SetmoreClient::new(&config.base_url, config.request_timeout)?;
        let credentials = Arc::new(CredentialStore::new(
            client.clone(),
            config.refresh_token.clone(),
        ));
        let setmore = SetmoreService::new(client, credentials.clone());

        let directory_service = DirectoryService::new(setmore.clone(), cache);
        let fetcher = AppointmentFetcher::new(setmore).with_max_pages(config.max_pages);
        let report_service = ReportService::new(fetcher, directory_service.clone());

        Ok(Self {
            config,
            credentials,
            directory_service,
            report_service,
        })
    }
}
