// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cursor-following appointment fetcher.
//!
//! Pages are requested strictly one after another. Each page request goes
//! through `SetmoreService`, which handles the single re-auth retry; this
//! module only decides whether there is another page to ask for.

use crate::error::AppError;
use crate::models::Page;
use crate::services::SetmoreService;
use chrono::NaiveDate;

/// Default cap on pages followed in one fetch.
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// Drains all appointment pages for a date range.
#[derive(Clone)]
pub struct AppointmentFetcher {
    setmore: SetmoreService,
    max_pages: usize,
}

impl AppointmentFetcher {
    pub fn new(setmore: SetmoreService) -> Self {
        Self {
            setmore,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Cap the number of pages followed before giving up.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Fetch every page of appointments between `start` and `end`.
    ///
    /// Pagination stops when a page has no cursor, or returns the same
    /// cursor that was used to request it. Pages are returned in fetch order.
    pub async fn fetch_appointments(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Page>, AppError> {
        let mut pages: Vec<Page> = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .setmore
                .appointments_page(start, end, cursor.as_deref())
                .await?;

            tracing::debug!(
                page = pages.len() + 1,
                count = page.appointments.len(),
                has_cursor = page.cursor.is_some(),
                "Fetched appointments page"
            );

            let next =
                next_cursor(cursor.as_deref(), page.cursor.as_deref()).map(str::to_string);
            pages.push(page);

            match next {
                Some(next) if pages.len() >= self.max_pages => {
                    tracing::error!(max_pages = self.max_pages, "Pagination limit reached");
                    return Err(AppError::Pagination(format!(
                        "gave up after {} pages; server still returning cursor {:?}",
                        pages.len(),
                        next
                    )));
                }
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        let total: usize = pages.iter().map(|p| p.appointments.len()).sum();
        tracing::info!(
            pages = pages.len(),
            appointments = total,
            start = %start,
            end = %end,
            "Appointment fetch complete"
        );

        Ok(pages)
    }
}

/// The cursor to request next, or `None` if `returned` ends pagination.
///
/// Empty cursors count as absent on both sides.
fn next_cursor<'a>(used: Option<&str>, returned: Option<&'a str>) -> Option<&'a str> {
    let used = used.filter(|c| !c.is_empty());
    match returned.filter(|c| !c.is_empty()) {
        Some(r) if Some(r) != used => Some(r),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cursor_follows_new_cursor() {
        assert_eq!(next_cursor(None, Some("c1")), Some("c1"));
        assert_eq!(next_cursor(Some("c1"), Some("c2")), Some("c2"));
    }

    #[test]
    fn test_next_cursor_stops_on_missing_or_repeated() {
        assert_eq!(next_cursor(None, None), None);
        assert_eq!(next_cursor(Some("c1"), None), None);
        assert_eq!(next_cursor(Some("c1"), Some("c1")), None);
    }

    #[test]
    fn test_next_cursor_empty_is_absent() {
        assert_eq!(next_cursor(None, Some("")), None);
        assert_eq!(next_cursor(Some(""), Some("c1")), Some("c1"));
    }
}
