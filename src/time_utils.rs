// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};

/// Setmore's minute-precision UTC timestamp, e.g. `2024-03-06T15:30Z`.
const SETMORE_MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// Date format Setmore expects for `startDate`/`endDate` query parameters.
const SETMORE_QUERY_DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse an appointment timestamp, keeping the offset it carries.
///
/// Accepts RFC3339 as well as Setmore's `YYYY-MM-DDTHH:MMZ` form.
pub fn parse_setmore_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    NaiveDateTime::parse_from_str(raw, SETMORE_MINUTE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Format a date for the appointments endpoint query string.
pub fn format_query_date(date: NaiveDate) -> String {
    date.format(SETMORE_QUERY_DATE_FORMAT).to_string()
}

/// Format a timestamp as RFC3339, `Z` suffix when the offset is UTC.
pub fn format_rfc3339(date: DateTime<FixedOffset>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// 12-hour clock time of day, e.g. `03:30 PM`.
pub fn time_of_day(date: DateTime<FixedOffset>) -> String {
    date.format("%I:%M %p").to_string()
}

/// Full month name, e.g. `March`.
pub fn month_name(date: DateTime<FixedOffset>) -> String {
    date.format("%B").to_string()
}

/// Full weekday name, e.g. `Wednesday`.
pub fn weekday_name(date: DateTime<FixedOffset>) -> String {
    date.format("%A").to_string()
}
