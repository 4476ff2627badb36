// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry caller-typed strings (dates, DJ names, day filters)
//! and are validated into domain types at the operation boundary.
//! Responses are serializable and distinct from domain types.

use gigsync::{BackupOutcome, ProtocolOutcome};
use gigsync_domain::AvailabilitySummary;
use gigsync_journal::Transcript;
use time::Date;

/// API request to evaluate one DJ's availability on one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluateAvailabilityRequest {
    /// The DJ's short or full name.
    pub dj: String,
    /// The date, `YYYY-MM-DD` or `MM-DD`/`M/D` against `year`.
    pub date: String,
    /// The matrix year to evaluate against.
    pub year: u16,
}

/// API response for an availability evaluation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EvaluateAvailabilityResponse {
    /// The DJ's short name.
    pub dj: String,
    /// The evaluated date.
    pub date: Date,
    /// Whether the DJ can take the booking.
    pub can_book: bool,
    /// Whether the DJ can stand by as backup.
    pub can_backup: bool,
    /// An advisory note ("assign last", uncertainty, unknown cell text).
    pub note: Option<String>,
}

/// API request for one date's availability summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizeDateRequest {
    /// The date, `YYYY-MM-DD` or `MM-DD`/`M/D` against `year`.
    pub date: String,
    /// The matrix year.
    pub year: u16,
}

/// API response for a date summary.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SummarizeDateResponse {
    /// The summarized date.
    pub date: Date,
    /// The date as it appears in the matrix, e.g. `"Sat 2/21"`.
    pub sheet_date: String,
    /// `None` when the date has no matrix row.
    pub summary: Option<AvailabilitySummary>,
}

/// API request to scan a date range for open dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRangeRequest {
    /// Range start, inclusive.
    pub start: String,
    /// Range end, inclusive.
    pub end: String,
    /// The matrix year.
    pub year: u16,
    /// `"any"`, `"weekend"`, `"weekday"`, or a weekday name.
    pub day_filter: String,
    /// Keep only dates with at least this many spots.
    pub min_spots: Option<u32>,
}

/// One scanned date in a range response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScannedDateInfo {
    /// The scanned date.
    pub date: Date,
    /// The date as it appears in the matrix.
    pub sheet_date: String,
    /// Spots remaining on the date.
    pub available_spots: u32,
    /// DJs who can take the booking, short names.
    pub available_djs: Vec<String>,
    /// DJs who must be asked first, short names.
    pub maybe_djs: Vec<String>,
}

/// API response for a range scan.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScanRangeResponse {
    /// Matching dates in chronological order.
    pub dates: Vec<ScannedDateInfo>,
}

/// One fully booked date in a report response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FullyBookedDateInfo {
    /// The fully booked date.
    pub date: Date,
    /// The date as it appears in the matrix.
    pub sheet_date: String,
    /// DJs with bookings, short names.
    pub booked_djs: Vec<String>,
    /// Unassigned bookings counted in the TBA column.
    pub tba_count: u32,
    /// Whether an AAG spot is reserved.
    pub aag_reserved: bool,
    /// Assigned backups, short names.
    pub backup_djs: Vec<String>,
    /// DJs still able to take a booking, short names.
    pub available_to_book: Vec<String>,
    /// DJs still able to back up, short names.
    pub available_to_backup: Vec<String>,
}

/// API response for a fully-booked report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FullyBookedResponse {
    /// Fully booked dates in chronological order.
    pub dates: Vec<FullyBookedDateInfo>,
}

/// API request for one DJ's dates across a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DjRangeRequest {
    /// The DJ's short or full name.
    pub dj: String,
    /// Range start, inclusive.
    pub start: String,
    /// Range end, inclusive.
    pub end: String,
    /// The matrix year.
    pub year: u16,
}

/// One booked date in a per-DJ range response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DjBookedDateInfo {
    /// The booked date.
    pub date: Date,
    /// The venue, when the gig database knows it.
    pub venue: Option<String>,
}

/// API response for a per-DJ range query.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DjRangeResponse {
    /// The DJ's short name.
    pub dj: String,
    /// Dates the DJ can take a booking.
    pub available: Vec<Date>,
    /// Dates the DJ must be asked about first.
    pub maybe: Vec<Date>,
    /// Dates the DJ is already committed.
    pub booked: Vec<DjBookedDateInfo>,
    /// Dates the DJ stands by as backup.
    pub backup: Vec<Date>,
}

/// API request for bookings on the days around a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearbyBookingsRequest {
    /// Restrict to one DJ's bookings; `None` keeps everything.
    pub dj: Option<String>,
    /// The target date.
    pub date: String,
    /// The year the date string is parsed against.
    pub year: u16,
}

/// One neighboring day in a nearby-bookings response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NearbyDayInfo {
    /// Days from the target date, negative for earlier days.
    pub offset: i64,
    /// The neighboring date.
    pub date: Date,
    /// Client names of bookings on the date.
    pub clients: Vec<String>,
}

/// API response for a nearby-bookings lookup.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NearbyBookingsResponse {
    /// Neighboring days in ascending offset order.
    pub days: Vec<NearbyDayInfo>,
}

/// API request to reconcile the three systems across a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileRequest {
    /// Range start, inclusive.
    pub start: String,
    /// Range end, inclusive.
    pub end: String,
    /// The matrix year.
    pub year: u16,
    /// Whether to include the calendar as a third source.
    pub include_calendar: bool,
}

/// One drifted date in a reconcile response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DiscrepancyInfo {
    /// The drifted date.
    pub date: Date,
    /// The drift classification.
    pub kind: String,
    /// Assignees per the gig database, short names or `"TBA"`.
    pub gig: Vec<String>,
    /// Assignees per the matrix.
    pub matrix: Vec<String>,
    /// Assignees per the calendar, when it was included.
    pub calendar: Option<Vec<String>>,
}

/// API response for a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReconcileResponse {
    /// Drifted dates in chronological order. Empty means in sync.
    pub discrepancies: Vec<DiscrepancyInfo>,
}

/// API request to submit one inbound booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitBookingRequest {
    /// The booking date.
    pub date: String,
    /// The year the date string is parsed against.
    pub year: u16,
    /// The assigned DJ's name; `None` books into the TBA column.
    pub dj: Option<String>,
    /// Free-text secondary DJ name.
    pub secondary_dj: Option<String>,
    /// The client names as entered.
    pub client: String,
    /// The venue name.
    pub venue: String,
    /// The venue street address.
    pub venue_street: String,
    /// The venue city, state, and zip.
    pub venue_city_state_zip: String,
    /// Contracted setup time, 12-hour as entered.
    pub setup_time: String,
    /// Contracted clear time, 12-hour as entered.
    pub clear_time: String,
    /// The sound setup description.
    pub sound_setup: String,
    /// Whether ceremony sound is contracted.
    pub ceremony_sound: bool,
    /// Whether a planner is attached.
    pub planner: bool,
}

/// API response for a booking submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitBookingResponse {
    /// The booking date.
    pub date: Date,
    /// Terminal state of the run.
    pub outcome: ProtocolOutcome,
    /// What happened on the backup side.
    pub backup: BackupOutcome,
    /// Everything the run wrote, decided, and flagged.
    pub transcript: Transcript,
}
