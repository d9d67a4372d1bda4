// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Setmore-Report command line
//!
//! Usage:
//!   setmore-report refresh-directories
//!   setmore-report appointments <START YYYY-MM-DD> <END YYYY-MM-DD>
//!
//! The appointments command writes one JSON object per row to stdout.

use chrono::NaiveDate;
use setmore_report::{config::Config, AppState};
use std::io::Write;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: setmore-report refresh-directories\n       \
                     setmore-report appointments <START YYYY-MM-DD> <END YYYY-MM-DD>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Structured JSON logs on stderr; stdout carries the table
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str);

    let config = Config::from_env()?;
    tracing::info!(base_url = %config.base_url, "Starting Setmore-Report");

    let state = AppState::new(config)?;

    match command {
        Some("refresh-directories") => {
            let summary = state.directory_service.refresh_directories().await?;
            tracing::info!(
                staff = summary.staff,
                services = summary.services,
                "Directories cached"
            );
        }
        Some("appointments") => {
            let (start, end) = match (args.get(1), args.get(2)) {
                (Some(start), Some(end)) => (parse_date(start)?, parse_date(end)?),
                _ => return Err(USAGE.into()),
            };

            let table = state.report_service.appointment_table(start, end).await?;

            let mut out = std::io::stdout().lock();
            for row in &table {
                serde_json::to_writer(&mut out, row)?;
                out.write_all(b"\n")?;
            }
            out.flush()?;
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("invalid date {:?}: {}", raw, e).into())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("setmore_report=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
