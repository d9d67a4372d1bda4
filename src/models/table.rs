// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Assembled appointment table handed to reporting consumers.

use serde::Serialize;

use crate::models::NormalizedAppointment;

/// Ordered appointment rows, indexed by appointment key.
///
/// Rows stay in page-fetch order. Duplicate keys are kept as-is: pages are
/// expected not to overlap, and if they ever do the duplicates should be
/// visible to the consumer rather than silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AppointmentTable {
    rows: Vec<NormalizedAppointment>,
}

impl AppointmentTable {
    /// Column names in output order, after the `key` index.
    pub const COLUMNS: [&'static str; 7] =
        ["staff", "service", "start", "time", "month", "weekday", "length"];

    /// Concatenate normalized pages in the order they were fetched.
    pub fn assemble<I>(pages: I) -> Self
    where
        I: IntoIterator<Item = Vec<NormalizedAppointment>>,
    {
        let rows = pages.into_iter().flatten().collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[NormalizedAppointment] {
        &self.rows
    }

    /// Appointment keys in row order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.key.as_str())
    }

    /// First row with the given key.
    pub fn get(&self, key: &str) -> Option<&NormalizedAppointment> {
        self.rows.iter().find(|r| r.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedAppointment> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<NormalizedAppointment> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a AppointmentTable {
    type Item = &'a NormalizedAppointment;
    type IntoIter = std::slice::Iter<'a, NormalizedAppointment>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Length;
    use chrono::DateTime;

    fn row(key: &str) -> NormalizedAppointment {
        NormalizedAppointment {
            key: key.to_string(),
            staff: "Grace Hopper".to_string(),
            service: "Tutoring".to_string(),
            start: DateTime::parse_from_rfc3339("2024-03-06T15:30:00Z").unwrap(),
            time: "03:30 PM".to_string(),
            month: "March".to_string(),
            weekday: "Wednesday".to_string(),
            length: Length::HalfHour,
        }
    }

    #[test]
    fn test_assemble_preserves_page_order() {
        let table = AppointmentTable::assemble(vec![
            vec![row("b"), row("a")],
            vec![],
            vec![row("c")],
        ]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_assemble_keeps_duplicate_keys() {
        let table = AppointmentTable::assemble(vec![vec![row("a")], vec![row("a")]]);
        assert_eq!(table.len(), 2);
        assert!(table.get("a").is_some());
        assert!(table.get("missing").is_none());
    }

    #[test]
    fn test_assemble_empty() {
        let table = AppointmentTable::assemble(Vec::<Vec<NormalizedAppointment>>::new());
        assert!(table.is_empty());
    }

    #[test]
    fn test_serializes_as_row_array() {
        let table = AppointmentTable::assemble(vec![vec![row("a")]]);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json[0]["key"], "a");
        assert_eq!(json[0]["length"], "Half-Hour");
        assert_eq!(json[0]["month"], "March");
    }
}
