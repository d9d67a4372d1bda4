// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Staff and service directory refresh.
//!
//! Directories are fetched on demand and persisted whole. Nothing here runs
//! on a schedule; keeping them fresh is up to whoever calls
//! `refresh_directories`.

use crate::db::{names, DirectoryCache};
use crate::error::AppError;
use crate::models::directory::{service_directory, staff_directory};
use crate::models::Directory;
use crate::services::SetmoreService;

/// Fetches reference directories from Setmore and caches them locally.
#[derive(Clone)]
pub struct DirectoryService {
    setmore: SetmoreService,
    cache: DirectoryCache,
}

/// Entry counts from a directory refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    pub staff: usize,
    pub services: usize,
}

impl DirectoryService {
    pub fn new(setmore: SetmoreService, cache: DirectoryCache) -> Self {
        Self { setmore, cache }
    }

    /// Fetch the staff directory (key → "First Last").
    pub async fn fetch_staff_directory(&self) -> Result<Directory, AppError> {
        let staff = self.setmore.list_staff().await?;
        Ok(staff_directory(&staff))
    }

    /// Fetch the service directory (key → service name).
    pub async fn fetch_service_directory(&self) -> Result<Directory, AppError> {
        let services = self.setmore.list_services().await?;
        Ok(service_directory(&services))
    }

    /// Fetch both directories and overwrite the cached copies.
    ///
    /// Nothing is persisted unless both fetches succeed.
    pub async fn refresh_directories(&self) -> Result<RefreshSummary, AppError> {
        let staff = self.fetch_staff_directory().await?;
        let services = self.fetch_service_directory().await?;

        self.cache.persist(names::STAFF, &staff).await?;
        self.cache.persist(names::SERVICES, &services).await?;

        tracing::info!(
            staff = staff.len(),
            services = services.len(),
            "Reference directories refreshed"
        );

        Ok(RefreshSummary {
            staff: staff.len(),
            services: services.len(),
        })
    }

    /// Cached staff directory.
    pub async fn load_staff(&self) -> Result<Directory, AppError> {
        self.cache.load(names::STAFF).await
    }

    /// Cached service directory.
    pub async fn load_services(&self) -> Result<Directory, AppError> {
        self.cache.load(names::SERVICES).await
    }
}
