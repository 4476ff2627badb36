// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod booking;
mod cell;
mod config;
mod dj;
mod error;
mod event_window;
mod row;
mod rules;
mod tba;

#[cfg(test)]
mod tests;

pub use booking::{BookingRecord, extract_client_first_names};
pub use cell::{CellStatus, interpret};
pub use config::{
    MatrixColumn, YearConfiguration, format_sheet_date, is_weekend, parse_matrix_date,
};
pub use dj::{DjIdentity, unassigned_initials};
pub use error::DomainError;
pub use event_window::{
    BUSINESS_TZ, EventWindow, arrival_offset_minutes, convert_times_to_24h, event_window,
};
pub use row::{AvailabilitySummary, CellEntry, DateRow, UnknownCell, analyze};
pub use rules::{Verdict, VerdictNote, evaluate};
pub use tba::{
    count_booked_events, count_tba_booked, increment_booked, increment_tba, parse_tba_value,
};
