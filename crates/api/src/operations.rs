// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation functions consumed by CLI/UI layers.
//!
//! Every operation validates its request, resolves the year
//! configuration, and delegates to the engine through the adapter
//! bundle. Booking submissions additionally serialize per date.

use crate::error::ApiError;
use crate::locks::DateLocks;
use crate::request_response::{
    DiscrepancyInfo, DjBookedDateInfo, DjRangeRequest, DjRangeResponse,
    EvaluateAvailabilityRequest, EvaluateAvailabilityResponse, FullyBookedDateInfo,
    FullyBookedResponse, NearbyBookingsRequest, NearbyBookingsResponse, NearbyDayInfo,
    ReconcileRequest, ReconcileResponse, ScanRangeRequest, ScanRangeResponse, ScannedDateInfo,
    SubmitBookingRequest, SubmitBookingResponse, SummarizeDateRequest, SummarizeDateResponse,
};
use crate::validation::{
    RequestValidationError, parse_request_date, parse_request_dj, validate_range,
};
use gigsync::{
    Assignee, AssignmentsByDate, CalendarAdapter, DayFilter, DriftKind, GigDatabaseAdapter,
    MatrixAdapter, OperatorPrompts, ProtocolResult, dj_range_query, fully_booked_dates,
    matrix_snapshot, nearby_bookings, reconcile, scan_range, submit_booking,
};
use gigsync_domain::{
    BookingRecord, CellEntry, DjIdentity, MatrixColumn, YearConfiguration, evaluate,
    format_sheet_date,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use time::{Date, Weekday};
use tracing::info;

/// The adapter bundle every operation runs against.
pub struct Services {
    pub matrix: Arc<dyn MatrixAdapter>,
    pub calendar: Arc<dyn CalendarAdapter>,
    pub gig: Arc<dyn GigDatabaseAdapter>,
    pub operator: Arc<dyn OperatorPrompts>,
    locks: DateLocks,
}

impl Services {
    #[must_use]
    pub fn new(
        matrix: Arc<dyn MatrixAdapter>,
        calendar: Arc<dyn CalendarAdapter>,
        gig: Arc<dyn GigDatabaseAdapter>,
        operator: Arc<dyn OperatorPrompts>,
    ) -> Self {
        Self {
            matrix,
            calendar,
            gig,
            operator,
            locks: DateLocks::new(),
        }
    }
}

fn config_for(year: u16) -> Result<YearConfiguration, ApiError> {
    YearConfiguration::for_year(year).map_err(|err| crate::error::translate_domain_error(&err))
}

fn parse_day_filter(value: &str) -> Result<DayFilter, RequestValidationError> {
    match value.to_ascii_lowercase().as_str() {
        "" | "any" => Ok(DayFilter::Any),
        "weekend" => Ok(DayFilter::Weekend),
        "weekday" => Ok(DayFilter::Weekday),
        "monday" => Ok(DayFilter::Single(Weekday::Monday)),
        "tuesday" => Ok(DayFilter::Single(Weekday::Tuesday)),
        "wednesday" => Ok(DayFilter::Single(Weekday::Wednesday)),
        "thursday" => Ok(DayFilter::Single(Weekday::Thursday)),
        "friday" => Ok(DayFilter::Single(Weekday::Friday)),
        "saturday" => Ok(DayFilter::Single(Weekday::Saturday)),
        "sunday" => Ok(DayFilter::Single(Weekday::Sunday)),
        other => Err(RequestValidationError::UnknownDayFilter(other.to_owned())),
    }
}

fn short_names(djs: &[DjIdentity]) -> Vec<String> {
    djs.iter().map(|dj| dj.as_str().to_owned()).collect()
}

const fn drift_label(kind: DriftKind) -> &'static str {
    match kind {
        DriftKind::MissingFromMatrix => "missing_from_matrix",
        DriftKind::MissingFromGigDb => "missing_from_gig_db",
        DriftKind::MissingFromCalendar => "missing_from_calendar",
        DriftKind::DjMismatch => "dj_mismatch",
    }
}

fn assignee_names(assignees: &BTreeSet<Assignee>) -> Vec<String> {
    assignees
        .iter()
        .map(|a| match a {
            Assignee::Dj(dj) => dj.as_str().to_owned(),
            Assignee::Tba => String::from("TBA"),
        })
        .collect()
}

/// Evaluates one DJ's availability on one date.
///
/// # Errors
///
/// Returns an error on invalid input or a failed matrix read.
pub async fn evaluate_availability(
    services: &Services,
    request: &EvaluateAvailabilityRequest,
) -> Result<EvaluateAvailabilityResponse, ApiError> {
    let config: YearConfiguration = config_for(request.year)?;
    let dj: DjIdentity = parse_request_dj(&request.dj)?;
    let date: Date = parse_request_date(&request.date, request.year)?;

    let cell: CellEntry = services
        .matrix
        .read_row(request.year, date)
        .await?
        .map_or_else(CellEntry::blank, |row| row.cell(MatrixColumn::Dj(dj)));

    // Woody's weekend Out flips on bold, which some matrix backends
    // only expose through a formatting query.
    let bold: bool = if dj == DjIdentity::Woody && !cell.bold {
        services
            .matrix
            .is_cell_bold(request.year, date, MatrixColumn::Dj(dj))
            .await?
    } else {
        cell.bold
    };

    let verdict = evaluate(dj, &cell.status, bold, date, &config);
    Ok(EvaluateAvailabilityResponse {
        dj: dj.as_str().to_owned(),
        date,
        can_book: verdict.can_book,
        can_backup: verdict.can_backup,
        note: verdict.note.map(|note| note.to_string()),
    })
}

/// Summarizes one date's availability.
///
/// # Errors
///
/// Returns an error on invalid input or a failed matrix read.
pub async fn summarize_date(
    services: &Services,
    request: &SummarizeDateRequest,
) -> Result<SummarizeDateResponse, ApiError> {
    let config: YearConfiguration = config_for(request.year)?;
    let date: Date = parse_request_date(&request.date, request.year)?;

    let summary = services
        .matrix
        .read_row(request.year, date)
        .await?
        .map(|row| gigsync_domain::analyze(&row, &config));

    Ok(SummarizeDateResponse {
        date,
        sheet_date: format_sheet_date(date),
        summary,
    })
}

/// Scans a date range for open dates.
///
/// # Errors
///
/// Returns an error on invalid input or a failed range fetch.
pub async fn scan_dates(
    services: &Services,
    request: &ScanRangeRequest,
) -> Result<ScanRangeResponse, ApiError> {
    let config: YearConfiguration = config_for(request.year)?;
    let start: Date = parse_request_date(&request.start, request.year)?;
    let end: Date = parse_request_date(&request.end, request.year)?;
    validate_range(start, end)?;
    let filter: DayFilter = parse_day_filter(&request.day_filter)?;

    let results = scan_range(
        services.matrix.as_ref(),
        &config,
        start,
        end,
        filter,
        request.min_spots,
    )
    .await?;

    Ok(ScanRangeResponse {
        dates: results
            .into_iter()
            .map(|entry| ScannedDateInfo {
                date: entry.date,
                sheet_date: format_sheet_date(entry.date),
                available_spots: entry.summary.available_spots,
                available_djs: short_names(&entry.summary.available_for_booking),
                maybe_djs: short_names(&entry.summary.uncertain_djs),
            })
            .collect(),
    })
}

/// Reports the fully booked dates in a range.
///
/// # Errors
///
/// Returns an error on invalid input or a failed range fetch.
pub async fn fully_booked_report(
    services: &Services,
    request: &ScanRangeRequest,
) -> Result<FullyBookedResponse, ApiError> {
    let config: YearConfiguration = config_for(request.year)?;
    let start: Date = parse_request_date(&request.start, request.year)?;
    let end: Date = parse_request_date(&request.end, request.year)?;
    validate_range(start, end)?;

    let dates = fully_booked_dates(services.matrix.as_ref(), &config, start, end).await?;

    Ok(FullyBookedResponse {
        dates: dates
            .into_iter()
            .map(|entry| FullyBookedDateInfo {
                date: entry.date,
                sheet_date: format_sheet_date(entry.date),
                booked_djs: short_names(&entry.booked_djs),
                tba_count: entry.tba_count,
                aag_reserved: entry.aag_reserved,
                backup_djs: short_names(&entry.backup_djs),
                available_to_book: short_names(&entry.available_for_booking),
                available_to_backup: short_names(&entry.available_for_backup),
            })
            .collect(),
    })
}

/// Buckets one DJ's dates across a range.
///
/// # Errors
///
/// Returns an error on invalid input or a failed fetch.
pub async fn dj_range(
    services: &Services,
    request: &DjRangeRequest,
) -> Result<DjRangeResponse, ApiError> {
    let config: YearConfiguration = config_for(request.year)?;
    let dj: DjIdentity = parse_request_dj(&request.dj)?;
    let start: Date = parse_request_date(&request.start, request.year)?;
    let end: Date = parse_request_date(&request.end, request.year)?;
    validate_range(start, end)?;

    let report = dj_range_query(
        services.matrix.as_ref(),
        Some(services.gig.as_ref()),
        &config,
        dj,
        start,
        end,
    )
    .await?;

    Ok(DjRangeResponse {
        dj: dj.as_str().to_owned(),
        available: report.available,
        maybe: report.maybe,
        booked: report
            .booked
            .into_iter()
            .map(|b| DjBookedDateInfo {
                date: b.date,
                venue: b.venue,
            })
            .collect(),
        backup: report.backup,
    })
}

/// Looks up bookings on the days around a date.
///
/// # Errors
///
/// Returns an error on invalid input or a failed lookup.
pub async fn nearby(
    services: &Services,
    request: &NearbyBookingsRequest,
) -> Result<NearbyBookingsResponse, ApiError> {
    let date: Date = parse_request_date(&request.date, request.year)?;
    let dj: Option<DjIdentity> = request
        .dj
        .as_deref()
        .map(parse_request_dj)
        .transpose()?;

    let days = nearby_bookings(services.gig.as_ref(), dj, date).await?;

    Ok(NearbyBookingsResponse {
        days: days
            .into_iter()
            .map(|day| NearbyDayInfo {
                offset: day.offset,
                date: day.date,
                clients: day.bookings.iter().map(|b| b.client.clone()).collect(),
            })
            .collect(),
    })
}

/// Reconciles the gig database, matrix, and optionally the calendar
/// across a range.
///
/// # Errors
///
/// Returns an error on invalid input or a failed snapshot fetch.
pub async fn reconcile_sources(
    services: &Services,
    request: &ReconcileRequest,
) -> Result<ReconcileResponse, ApiError> {
    let config: YearConfiguration = config_for(request.year)?;
    let start: Date = parse_request_date(&request.start, request.year)?;
    let end: Date = parse_request_date(&request.end, request.year)?;
    validate_range(start, end)?;

    let rows = services.matrix.read_range(request.year, start, end).await?;
    let matrix_snap: AssignmentsByDate = matrix_snapshot(&rows, &config);
    let gig_snap: AssignmentsByDate = gig_snapshot(services.gig.as_ref(), start, end).await?;
    let calendar_snap: Option<AssignmentsByDate> = if request.include_calendar {
        Some(calendar_snapshot(services.calendar.as_ref(), &config, start, end).await?)
    } else {
        None
    };

    let reports = reconcile(&gig_snap, &matrix_snap, calendar_snap.as_ref());
    info!(
        drifted = reports.len(),
        %start,
        %end,
        "reconciliation pass complete"
    );

    Ok(ReconcileResponse {
        discrepancies: reports
            .into_iter()
            .map(|report| DiscrepancyInfo {
                date: report.date,
                kind: drift_label(report.kind).to_owned(),
                gig: assignee_names(&report.gig),
                matrix: assignee_names(&report.matrix),
                calendar: report.calendar.as_ref().map(assignee_names),
            })
            .collect(),
    })
}

async fn gig_snapshot(
    gig: &dyn GigDatabaseAdapter,
    start: Date,
    end: Date,
) -> Result<AssignmentsByDate, ApiError> {
    let mut snapshot: AssignmentsByDate = BTreeMap::new();
    let mut date: Date = start;
    while date <= end {
        let assignees: BTreeSet<Assignee> = gig
            .bookings_for_date(date)
            .await?
            .iter()
            .map(|booking| {
                booking
                    .assigned_dj
                    .map_or(Assignee::Tba, Assignee::Dj)
            })
            .collect();
        if !assignees.is_empty() {
            snapshot.insert(date, assignees);
        }
        match date.next_day() {
            Some(next) => date = next,
            None => break,
        }
    }
    Ok(snapshot)
}

async fn calendar_snapshot(
    calendar: &dyn CalendarAdapter,
    config: &YearConfiguration,
    start: Date,
    end: Date,
) -> Result<AssignmentsByDate, ApiError> {
    let mut snapshot: AssignmentsByDate = BTreeMap::new();
    let mut date: Date = start;
    while date <= end {
        let mut assignees: BTreeSet<Assignee> = BTreeSet::new();
        for dj in config.djs() {
            let events = calendar.events_matching(date, &dj.initials_marker()).await?;
            // Backup events are not bookings.
            if events.iter().any(|title| !title.contains("BACKUP DJ")) {
                assignees.insert(Assignee::Dj(dj));
            }
        }
        // Unassigned bookings carry a "U?" marker; no DJ initials start
        // with U, so the prefix probe is unambiguous.
        if calendar.count_events(date, "[U").await? > 0 {
            assignees.insert(Assignee::Tba);
        }
        if !assignees.is_empty() {
            snapshot.insert(date, assignees);
        }
        match date.next_day() {
            Some(next) => date = next,
            None => break,
        }
    }
    Ok(snapshot)
}

/// Submits one inbound booking through the write protocol, serialized
/// per date.
///
/// # Errors
///
/// Returns an error on invalid input, an unsupported year, or a failed
/// matrix write after validation passed.
pub async fn submit(
    services: &Services,
    request: &SubmitBookingRequest,
) -> Result<SubmitBookingResponse, ApiError> {
    if request.client.trim().is_empty() {
        return Err(RequestValidationError::EmptyClient.into());
    }
    let date: Date = parse_request_date(&request.date, request.year)?;
    let dj: Option<DjIdentity> = request
        .dj
        .as_deref()
        .map(parse_request_dj)
        .transpose()?;

    let booking: BookingRecord = BookingRecord {
        date,
        assigned_dj: dj,
        secondary_dj: request.secondary_dj.clone(),
        client: request.client.clone(),
        venue: request.venue.clone(),
        venue_street: request.venue_street.clone(),
        venue_city_state_zip: request.venue_city_state_zip.clone(),
        setup_time: request.setup_time.clone(),
        clear_time: request.clear_time.clone(),
        sound_setup: request.sound_setup.clone(),
        ceremony_sound: request.ceremony_sound,
        planner: request.planner,
    };

    // One submission per date at a time; the write protocol is not
    // safe under concurrent runs against the same row.
    let _guard = services.locks.acquire(date).await;
    let result: ProtocolResult = submit_booking(
        &booking,
        services.matrix.as_ref(),
        services.calendar.as_ref(),
        services.operator.as_ref(),
    )
    .await?;

    Ok(SubmitBookingResponse {
        date,
        outcome: result.outcome,
        backup: result.backup,
        transcript: result.transcript,
    })
}
