// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Appointment models: raw API records and normalized report rows.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::time_utils::format_rfc3339;

/// Appointment record as returned by the Setmore appointments endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAppointment {
    /// Unique appointment key
    pub key: String,
    /// Staff member the appointment is booked with
    pub staff_key: String,
    /// Service being booked
    pub service_key: String,
    /// Start date/time (e.g. "2024-03-06T15:30Z")
    pub start_time: String,
    /// End date/time
    pub end_time: String,
    /// Duration in minutes
    pub duration: u32,

    // Customer fields are carried through untouched.
    #[serde(default)]
    pub customer_key: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub customer: Option<serde_json::Value>,
}

/// One page of appointments plus the continuation cursor, if any.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub appointments: Vec<RawAppointment>,
    pub cursor: Option<String>,
}

/// Appointment length category derived from the booked duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Length {
    #[serde(rename = "Half-Hour")]
    HalfHour,
    #[serde(rename = "Hour")]
    Hour,
}

impl Length {
    /// Only exactly 30 minutes counts as a half hour.
    pub fn from_duration(minutes: u32) -> Self {
        if minutes == 30 {
            Length::HalfHour
        } else {
            Length::Hour
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Length::HalfHour => "Half-Hour",
            Length::Hour => "Hour",
        }
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat report row for one appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAppointment {
    /// Appointment key (row identity)
    pub key: String,
    /// Staff display name, or the raw staff key if unknown
    pub staff: String,
    /// Service display name, or the raw service key if unknown
    pub service: String,
    /// Start timestamp in the offset the API reported
    #[serde(serialize_with = "serialize_start")]
    pub start: DateTime<FixedOffset>,
    /// 12-hour clock start time (e.g. "03:30 PM")
    pub time: String,
    /// Full month name (e.g. "March")
    pub month: String,
    /// Full weekday name (e.g. "Wednesday")
    pub weekday: String,
    pub length: Length,
}

fn serialize_start<S: serde::Serializer>(
    start: &DateTime<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_rfc3339(*start))
}
