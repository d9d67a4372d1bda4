// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Appointment report assembly.
//!
//! Handles the core workflow:
//! 1. Load cached staff/service directories
//! 2. Fetch all appointment pages for the date range
//! 3. Normalize each page
//! 4. Assemble the pages into one table

use crate::error::{AppError, Result};
use crate::models::AppointmentTable;
use crate::services::normalize::normalize_page;
use crate::services::{AppointmentFetcher, DirectoryService};
use chrono::NaiveDate;

/// Builds appointment tables from the live API and the cached directories.
#[derive(Clone)]
pub struct ReportService {
    fetcher: AppointmentFetcher,
    directories: DirectoryService,
}

impl ReportService {
    pub fn new(fetcher: AppointmentFetcher, directories: DirectoryService) -> Self {
        Self {
            fetcher,
            directories,
        }
    }

    /// Build the appointment table for `start..=end`.
    ///
    /// Fails with `AppError::CacheMiss` if the directories were never
    /// refreshed.
    pub async fn appointment_table(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AppointmentTable> {
        if end < start {
            return Err(AppError::Internal(anyhow::anyhow!(
                "end date {} is before start date {}",
                end,
                start
            )));
        }

        tracing::info!(start = %start, end = %end, "Building appointment table");

        // Directories first, so a missing cache fails before any API traffic.
        let staff = self.directories.load_staff().await?;
        let services = self.directories.load_services().await?;

        let pages = self.fetcher.fetch_appointments(start, end).await?;

        let normalized = pages
            .iter()
            .map(|page| normalize_page(&page.appointments, &staff, &services))
            .collect::<Result<Vec<_>>>()?;

        let table = AppointmentTable::assemble(normalized);
        tracing::info!(rows = table.len(), "Appointment table assembled");
        Ok(table)
    }
}
