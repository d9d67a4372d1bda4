// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod appointment;
pub mod directory;
pub mod table;

pub use appointment::{Length, NormalizedAppointment, Page, RawAppointment};
pub use directory::{Directory, Service, StaffMember};
pub use table::AppointmentTable;
