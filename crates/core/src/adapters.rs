// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Adapter traits for the three external systems and the operator.
//!
//! The engine never talks to a spreadsheet, calendar, or database
//! directly; it goes through these traits so production wiring and
//! tests share one code path. In-memory implementations live in
//! [`crate::memory`].

use crate::error::CoreError;
use async_trait::async_trait;
use gigsync_domain::{DateRow, DjIdentity, MatrixColumn};
use time::Date;

/// A timed calendar event ready to be created.
///
/// Datetimes are ISO 8601 strings carrying their local offset, matching
/// what the transcript records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedEvent {
    pub date: Date,
    pub title: String,
    pub start_datetime: String,
    pub end_datetime: String,
    pub location: String,
    pub invitee: Option<String>,
}

/// An all-day calendar event ready to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllDayEvent {
    pub date: Date,
    pub title: String,
    pub invitee: Option<String>,
}

/// Read/write access to the availability matrix.
#[async_trait]
pub trait MatrixAdapter: Send + Sync {
    /// Reads one date's row, or `None` when the date has no row yet.
    async fn read_row(&self, year: u16, date: Date) -> Result<Option<DateRow>, CoreError>;

    /// Reads every existing row in an inclusive date range with one
    /// batched fetch.
    async fn read_range(
        &self,
        year: u16,
        start: Date,
        end: Date,
    ) -> Result<Vec<DateRow>, CoreError>;

    /// Appends an empty row for a date.
    async fn create_row(&self, year: u16, date: Date) -> Result<(), CoreError>;

    /// Sets one cell to a new value.
    async fn write_cell(
        &self,
        year: u16,
        date: Date,
        column: MatrixColumn,
        value: &str,
    ) -> Result<(), CoreError>;

    /// Whether a cell is bold. Only consulted where bold changes the
    /// rules (Woody's weekend Out).
    async fn is_cell_bold(
        &self,
        year: u16,
        date: Date,
        column: MatrixColumn,
    ) -> Result<bool, CoreError>;
}

/// Read/write access to the shared booking calendar.
#[async_trait]
pub trait CalendarAdapter: Send + Sync {
    /// Number of events on a date whose title contains the bracketed
    /// initials marker.
    async fn count_events(&self, date: Date, initials_marker: &str) -> Result<u32, CoreError>;

    /// Titles of events on a date whose title contains the marker.
    async fn events_matching(
        &self,
        date: Date,
        initials_marker: &str,
    ) -> Result<Vec<String>, CoreError>;

    async fn create_timed_event(&self, event: &TimedEvent) -> Result<(), CoreError>;

    async fn create_all_day_event(&self, event: &AllDayEvent) -> Result<(), CoreError>;
}

/// Read access to the gig database of inbound bookings.
#[async_trait]
pub trait GigDatabaseAdapter: Send + Sync {
    /// Every booking on a date, assigned and unassigned.
    async fn bookings_for_date(
        &self,
        date: Date,
    ) -> Result<Vec<gigsync_domain::BookingRecord>, CoreError>;
}

/// Decisions only a person can make during a booking run.
///
/// Pluggable so the protocol runs under tests and dry runs with no UI
/// attached.
#[async_trait]
pub trait OperatorPrompts: Send + Sync {
    /// Asks whether to stack another booking on a DJ who already has
    /// `existing_count` events that day. The existing event titles are
    /// shown for context.
    async fn confirm_additional_booking(
        &self,
        dj: DjIdentity,
        existing_count: u32,
        existing_events: &[String],
    ) -> Result<bool, CoreError>;

    /// Asks the operator to pick a backup DJ, or `None` to skip.
    async fn select_backup(
        &self,
        date: Date,
        spots_remaining: u32,
        candidates: &[DjIdentity],
    ) -> Result<Option<DjIdentity>, CoreError>;
}
