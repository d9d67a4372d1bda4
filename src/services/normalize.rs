// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flattening raw appointments into report rows.

use crate::error::{AppError, Result};
use crate::models::{Directory, Length, NormalizedAppointment, RawAppointment};
use crate::time_utils::{month_name, parse_setmore_timestamp, time_of_day, weekday_name};

/// Normalize one appointment.
///
/// Staff and service keys are replaced by their directory names; a key
/// missing from the directory is kept as-is since the cached directory may
/// lag behind the live roster. Derived fields use the offset embedded in
/// `start_time` and nothing else, so output depends only on the inputs.
pub fn normalize(
    raw: &RawAppointment,
    staff: &Directory,
    services: &Directory,
) -> Result<NormalizedAppointment> {
    let start = parse_setmore_timestamp(&raw.start_time).ok_or_else(|| {
        AppError::Pagination(format!(
            "appointment {} has unparseable start_time {:?}",
            raw.key, raw.start_time
        ))
    })?;

    Ok(NormalizedAppointment {
        key: raw.key.clone(),
        staff: lookup(staff, &raw.staff_key),
        service: lookup(services, &raw.service_key),
        start,
        time: time_of_day(start),
        month: month_name(start),
        weekday: weekday_name(start),
        length: Length::from_duration(raw.duration),
    })
}

/// Normalize every appointment of a page, preserving order.
pub fn normalize_page(
    appointments: &[RawAppointment],
    staff: &Directory,
    services: &Directory,
) -> Result<Vec<NormalizedAppointment>> {
    appointments
        .iter()
        .map(|raw| normalize(raw, staff, services))
        .collect()
}

fn lookup(directory: &Directory, key: &str) -> String {
    directory
        .get(key)
        .cloned()
        .unwrap_or_else(|| key.to_string())
}
