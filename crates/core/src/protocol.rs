// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The gated booking write protocol.
//!
//! A run moves Start → Validate → {Halted | MatrixWrite} →
//! BackupAssessment → CalendarWrite → Done. Validation fails closed:
//! any adapter failure before the first write halts the run with zero
//! side effects. After the matrix is written, calendar failures are
//! recorded as inconsistencies instead of failing the run, because at
//! that point the matrix already changed and the operator must
//! reconcile by hand either way.

use crate::adapters::{AllDayEvent, CalendarAdapter, MatrixAdapter, OperatorPrompts, TimedEvent};
use crate::error::{CoreError, SourceKind};
use gigsync_domain::{
    BookingRecord, CellEntry, CellStatus, DateRow, DjIdentity, MatrixColumn, YearConfiguration,
    analyze, evaluate, increment_booked, increment_tba,
};
use gigsync_journal::{OperatorDecision, Transcript, WarningNote, WriteAction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Why a run stopped before writing anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HaltReason {
    /// The matrix and calendar disagree about the DJ's bookings.
    ValidationMismatch {
        dj: DjIdentity,
        matrix_count: u32,
        calendar_count: u32,
    },
    /// The operator declined to stack another booking.
    OperatorDeclined { dj: DjIdentity },
    /// The booked DJ has no column in the target year's matrix.
    DjNotInMatrix { dj: DjIdentity, year: u16 },
    /// An adapter failed while validating; nothing was written.
    SourceFailure { source: SourceKind, reason: String },
}

impl std::fmt::Display for HaltReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationMismatch {
                dj,
                matrix_count,
                calendar_count,
            } => write!(
                f,
                "matrix shows {matrix_count} booking(s) for {dj} but the calendar shows {calendar_count}"
            ),
            Self::OperatorDeclined { dj } => {
                write!(f, "operator declined to add another booking for {dj}")
            }
            Self::DjNotInMatrix { dj, year } => {
                write!(f, "{dj} has no column in the {year} matrix")
            }
            Self::SourceFailure { source, reason } => {
                write!(f, "{source} failed during validation: {reason}")
            }
        }
    }
}

/// What happened on the backup side of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupOutcome {
    /// Unassigned bookings carry no backup step.
    NotApplicable,
    /// The date already had a backup in the matrix.
    AlreadyAssigned(DjIdentity),
    /// A backup was selected and written.
    Assigned(DjIdentity),
    /// The selected backup already had calendar entries; the backup was
    /// not assigned and the primary booking is intact.
    ConflictDetected {
        dj: DjIdentity,
        conflicts: Vec<String>,
    },
    /// The operator chose not to assign a backup.
    Skipped,
    /// Nobody was eligible to back up the date.
    NoCandidates,
}

/// Terminal state of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolOutcome {
    Completed,
    Halted(HaltReason),
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolResult {
    pub outcome: ProtocolOutcome,
    pub backup: BackupOutcome,
    pub transcript: Transcript,
}

impl ProtocolResult {
    fn halted(reason: HaltReason, transcript: Transcript) -> Self {
        Self {
            outcome: ProtocolOutcome::Halted(reason),
            backup: BackupOutcome::NotApplicable,
            transcript,
        }
    }
}

fn validate_failure(source: SourceKind, err: &CoreError) -> HaltReason {
    HaltReason::SourceFailure {
        source,
        reason: err.to_string(),
    }
}

/// Runs the booking protocol for one inbound booking.
///
/// # Errors
///
/// Returns an error when the booking's year has no configuration, or
/// when a matrix write fails after validation passed. Adapter failures
/// during validation halt the run instead of erroring; calendar
/// failures after the matrix write become transcript warnings.
#[allow(clippy::too_many_lines)]
pub async fn submit_booking(
    booking: &BookingRecord,
    matrix: &dyn MatrixAdapter,
    calendar: &dyn CalendarAdapter,
    operator: &dyn OperatorPrompts,
) -> Result<ProtocolResult, CoreError> {
    let year: u16 = u16::try_from(booking.date.year()).unwrap_or(0);
    let config: YearConfiguration = YearConfiguration::for_year(year)?;
    let mut transcript: Transcript = Transcript::new();

    info!(date = %booking.date, client = %booking.client, "starting booking run");

    // Validate. Everything up to the first matrix write fails closed.
    let existing_row: Option<DateRow> = match matrix.read_row(year, booking.date).await {
        Ok(row) => row,
        Err(err) => {
            warn!(error = %err, "matrix read failed during validation");
            return Ok(ProtocolResult::halted(
                validate_failure(SourceKind::Matrix, &err),
                transcript,
            ));
        }
    };
    let row_exists: bool = existing_row.is_some();
    let mut row: DateRow =
        existing_row.unwrap_or_else(|| DateRow::new(booking.date, BTreeMap::new()));

    if let Some(dj) = booking.assigned_dj {
        if config.column_number(MatrixColumn::Dj(dj)).is_none() {
            return Ok(ProtocolResult::halted(
                HaltReason::DjNotInMatrix { dj, year },
                transcript,
            ));
        }

        let cell: CellEntry = row.cell(MatrixColumn::Dj(dj));
        let matrix_count: u32 = gigsync_domain::count_booked_events(&cell.raw);

        let marker: String = dj.initials_marker();
        let existing_events: Vec<String> =
            match calendar.events_matching(booking.date, &marker).await {
                Ok(events) => events,
                Err(err) => {
                    warn!(error = %err, "calendar read failed during validation");
                    return Ok(ProtocolResult::halted(
                        validate_failure(SourceKind::Calendar, &err),
                        transcript,
                    ));
                }
            };
        let calendar_count: u32 = u32::try_from(existing_events.len()).unwrap_or(u32::MAX);

        if matrix_count != calendar_count {
            warn!(
                %dj,
                matrix_count,
                calendar_count,
                "matrix/calendar mismatch, halting with zero writes"
            );
            return Ok(ProtocolResult::halted(
                HaltReason::ValidationMismatch {
                    dj,
                    matrix_count,
                    calendar_count,
                },
                transcript,
            ));
        }

        if matrix_count > 0 {
            let approved: bool = match operator
                .confirm_additional_booking(dj, matrix_count, &existing_events)
                .await
            {
                Ok(approved) => approved,
                Err(err) => {
                    return Ok(ProtocolResult::halted(
                        validate_failure(SourceKind::Calendar, &err),
                        transcript,
                    ));
                }
            };
            if approved {
                transcript.record_decision(OperatorDecision::AdditionalBookingConfirmed {
                    dj,
                    existing_count: matrix_count,
                });
            } else {
                transcript
                    .record_decision(OperatorDecision::AdditionalBookingDeclined { dj });
                return Ok(ProtocolResult::halted(
                    HaltReason::OperatorDeclined { dj },
                    transcript,
                ));
            }
        }
    }

    // MatrixWrite. From here on the run never halts; failures either
    // error out or become warnings.
    if !row_exists {
        matrix.create_row(year, booking.date).await?;
        transcript.record_action(WriteAction::MatrixRowCreated { date: booking.date });
    }

    if let Some(dj) = booking.assigned_dj {
        let column: MatrixColumn = MatrixColumn::Dj(dj);
        let cell_raw: String = row.cell(column).raw;
        // A cell holding no booking text (blank, OUT, a stale marker)
        // is overwritten outright; the increment path is only for
        // cells that already count at least one booking.
        let new_value: String = if gigsync_domain::count_booked_events(&cell_raw) == 0 {
            String::from("BOOKED")
        } else {
            increment_booked(&cell_raw)
        };
        matrix
            .write_cell(year, booking.date, column, &new_value)
            .await?;
        info!(%dj, value = %new_value, "matrix cell written");
        transcript.record_action(WriteAction::MatrixCellWritten {
            date: booking.date,
            column,
            value: new_value.clone(),
        });
        row.cells.insert(column, CellEntry::parse(&new_value));
    } else {
        let new_value: String = increment_tba(&row.cell(MatrixColumn::Tba).raw);
        matrix
            .write_cell(year, booking.date, MatrixColumn::Tba, &new_value)
            .await?;
        info!(value = %new_value, "TBA cell written");
        transcript.record_action(WriteAction::MatrixCellWritten {
            date: booking.date,
            column: MatrixColumn::Tba,
            value: new_value.clone(),
        });
        row.cells
            .insert(MatrixColumn::Tba, CellEntry::parse(&new_value));
    }

    // BackupAssessment, assigned bookings only.
    let backup: BackupOutcome = if let Some(dj) = booking.assigned_dj {
        assess_backup(booking, dj, &row, &config, matrix, calendar, operator, &mut transcript)
            .await?
    } else {
        BackupOutcome::NotApplicable
    };

    // CalendarWrite.
    write_calendar_events(booking, &backup, calendar, &mut transcript).await;

    Ok(ProtocolResult {
        outcome: ProtocolOutcome::Completed,
        backup,
        transcript,
    })
}

#[allow(clippy::too_many_arguments)]
async fn assess_backup(
    booking: &BookingRecord,
    booked_dj: DjIdentity,
    row: &DateRow,
    config: &YearConfiguration,
    matrix: &dyn MatrixAdapter,
    calendar: &dyn CalendarAdapter,
    operator: &dyn OperatorPrompts,
    transcript: &mut Transcript,
) -> Result<BackupOutcome, CoreError> {
    let year: u16 = config.year();
    let summary = analyze(row, config);

    if let Some(existing) = summary.backup_djs.first() {
        info!(dj = %existing, "backup already assigned");
        return Ok(BackupOutcome::AlreadyAssigned(*existing));
    }

    let mut candidates: Vec<DjIdentity> = Vec::new();
    for candidate in config.backup_candidates() {
        if *candidate == booked_dj
            || config
                .column_number(MatrixColumn::Dj(*candidate))
                .is_none()
        {
            continue;
        }
        let cell: CellEntry = row.cell(MatrixColumn::Dj(*candidate));
        if let CellStatus::Unknown(raw) = &cell.status {
            warn!(dj = %candidate, value = %raw, "unrecognized matrix value, candidate skipped");
            transcript.record_warning(WarningNote::UnknownCellValue {
                dj: *candidate,
                raw: raw.clone(),
            });
            continue;
        }
        // Bold formatting only matters for Woody's weekend Out, so the
        // extra adapter round trip happens for that cell alone.
        let bold: bool = if *candidate == DjIdentity::Woody
            && cell.raw.trim().eq_ignore_ascii_case("out")
        {
            cell.bold
                || matrix
                    .is_cell_bold(year, booking.date, MatrixColumn::Dj(*candidate))
                    .await?
        } else {
            cell.bold
        };
        let verdict = evaluate(*candidate, &cell.status, bold, booking.date, config);
        if verdict.can_backup {
            candidates.push(*candidate);
        }
    }

    if candidates.is_empty() {
        warn!(date = %booking.date, "no backup candidates available");
        return Ok(BackupOutcome::NoCandidates);
    }

    let Some(selected) = operator
        .select_backup(booking.date, summary.available_spots, &candidates)
        .await?
    else {
        transcript.record_decision(OperatorDecision::BackupSkipped);
        return Ok(BackupOutcome::Skipped);
    };
    transcript.record_decision(OperatorDecision::BackupSelected { dj: selected });

    // Re-validate the selection against the calendar before writing.
    let marker: String = selected.initials_marker();
    match calendar.events_matching(booking.date, &marker).await {
        Ok(conflicts) if conflicts.is_empty() => {
            matrix
                .write_cell(
                    year,
                    booking.date,
                    MatrixColumn::Dj(selected),
                    "BACKUP",
                )
                .await?;
            info!(dj = %selected, "backup written to matrix");
            transcript.record_action(WriteAction::MatrixCellWritten {
                date: booking.date,
                column: MatrixColumn::Dj(selected),
                value: String::from("BACKUP"),
            });
            Ok(BackupOutcome::Assigned(selected))
        }
        Ok(conflicts) => {
            warn!(dj = %selected, ?conflicts, "backup calendar conflict, backup not assigned");
            transcript.record_warning(WarningNote::BackupConflict {
                dj: selected,
                entries: conflicts.clone(),
            });
            Ok(BackupOutcome::ConflictDetected {
                dj: selected,
                conflicts,
            })
        }
        Err(err) => {
            // The primary booking is already in the matrix; skip the
            // backup rather than failing the run.
            warn!(error = %err, "backup conflict check failed, skipping backup");
            transcript.record_warning(WarningNote::CalendarInconsistency {
                date: booking.date,
                detail: format!("backup conflict check failed: {err}"),
            });
            Ok(BackupOutcome::Skipped)
        }
    }
}

async fn write_calendar_events(
    booking: &BookingRecord,
    backup: &BackupOutcome,
    calendar: &dyn CalendarAdapter,
    transcript: &mut Transcript,
) {
    match booking.window() {
        Ok(window) => {
            let event: TimedEvent = TimedEvent {
                date: booking.date,
                title: booking.event_title(),
                start_datetime: window.start_rfc3339(),
                end_datetime: window.end_rfc3339(),
                location: booking.location_line(),
                invitee: booking.assigned_dj.map(|dj| dj.email().to_owned()),
            };
            match calendar.create_timed_event(&event).await {
                Ok(()) => {
                    info!(title = %event.title, "timed calendar event created");
                    transcript.record_action(WriteAction::TimedCalendarEvent {
                        title: event.title,
                        start_datetime: event.start_datetime,
                        end_datetime: event.end_datetime,
                        location: event.location,
                        invitee: event.invitee,
                    });
                }
                Err(err) => {
                    warn!(error = %err, "timed event creation failed after matrix write");
                    transcript.record_warning(WarningNote::CalendarInconsistency {
                        date: booking.date,
                        detail: format!("timed event creation failed: {err}"),
                    });
                }
            }
        }
        Err(err) => {
            warn!(error = %err, "booking times unusable, skipping primary event");
            transcript.record_warning(WarningNote::CalendarInconsistency {
                date: booking.date,
                detail: format!("primary event skipped: {err}"),
            });
        }
    }

    if let BackupOutcome::Assigned(backup_dj) = backup {
        let event: AllDayEvent = AllDayEvent {
            date: booking.date,
            title: backup_dj.backup_event_title(),
            invitee: Some(backup_dj.email().to_owned()),
        };
        match calendar.create_all_day_event(&event).await {
            Ok(()) => {
                info!(title = %event.title, "all-day backup event created");
                transcript.record_action(WriteAction::AllDayCalendarEvent {
                    title: event.title,
                    date: event.date,
                    invitee: event.invitee,
                });
            }
            Err(err) => {
                warn!(error = %err, "backup event creation failed after matrix write");
                transcript.record_warning(WarningNote::CalendarInconsistency {
                    date: booking.date,
                    detail: format!("backup event creation failed: {err}"),
                });
            }
        }
    }
}
