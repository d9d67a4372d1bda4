// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod credentials;
pub mod directory;
pub mod fetcher;
pub mod normalize;
pub mod report;
pub mod setmore;

pub use credentials::CredentialStore;
pub use directory::{DirectoryService, RefreshSummary};
pub use fetcher::AppointmentFetcher;
pub use normalize::normalize;
pub use report::ReportService;
pub use setmore::{SetmoreClient, SetmoreService};
