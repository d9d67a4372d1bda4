// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Reference directories mapping staff/service keys to display names.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key → display name lookup table.
///
/// Ordered so persisted files are stable across refreshes.
pub type Directory = BTreeMap<String, String>;

/// Staff member as listed by `bookingapi/staffs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub key: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl StaffMember {
    /// First and last name joined with a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Service as listed by `bookingpage/services`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub key: String,
    pub service_name: String,
}

/// Build the staff directory. A repeated key keeps the last entry.
pub fn staff_directory(staff: &[StaffMember]) -> Directory {
    staff
        .iter()
        .map(|s| (s.key.clone(), s.full_name()))
        .collect()
}

/// Build the service directory. A repeated key keeps the last entry.
pub fn service_directory(services: &[Service]) -> Directory {
    services
        .iter()
        .map(|s| (s.key.clone(), s.service_name.clone()))
        .collect()
}
