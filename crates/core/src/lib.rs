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

mod adapters;
mod cache;
mod error;
mod memory;
mod neighbors;
mod protocol;
mod reconcile;
mod scan;

#[cfg(test)]
mod tests;

pub use adapters::{
    AllDayEvent, CalendarAdapter, GigDatabaseAdapter, MatrixAdapter, OperatorPrompts, TimedEvent,
};
pub use cache::CachedGigDatabase;
pub use error::{CoreError, SourceKind};
pub use memory::{InMemoryCalendar, InMemoryGigDatabase, InMemoryMatrix, ScriptedOperator};
pub use neighbors::{NEIGHBOR_SPAN_DAYS, NearbyDay, nearby_bookings};
pub use protocol::{BackupOutcome, HaltReason, ProtocolOutcome, ProtocolResult, submit_booking};
pub use reconcile::{
    Assignee, AssignmentsByDate, BackupDiscrepancy, DiscrepancyReport, DriftKind, backup_snapshot,
    matrix_snapshot, reconcile, reconcile_backups,
};
pub use scan::{
    BookedDate, DateAvailability, DayFilter, DjRangeReport, FullyBookedDate, dj_range_query,
    fully_booked_dates, scan_range,
};
