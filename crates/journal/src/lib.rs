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
    clippy::all
)]

//! Write transcript types.
//!
//! Every booking run produces exactly one transcript capturing the
//! writes it performed, the decisions the operator made, and anything
//! that needs manual follow-up. Transcripts are append-only while a run
//! is in flight and immutable once the run returns.

use gigsync_domain::{DjIdentity, MatrixColumn};
use serde::{Deserialize, Serialize};
use time::Date;

/// One write performed against an external system.
///
/// Datetimes are stored as ISO 8601 strings with their local offset so
/// the transcript serializes without carrying a timezone database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteAction {
    /// A new date row was appended to the availability matrix.
    MatrixRowCreated { date: Date },
    /// A matrix cell was set to a new value.
    MatrixCellWritten {
        date: Date,
        column: MatrixColumn,
        value: String,
    },
    /// A timed event was created on the shared calendar.
    TimedCalendarEvent {
        title: String,
        start_datetime: String,
        end_datetime: String,
        location: String,
        invitee: Option<String>,
    },
    /// An all-day event was created on the shared calendar.
    AllDayCalendarEvent {
        title: String,
        date: Date,
        invitee: Option<String>,
    },
}

impl WriteAction {
    /// Whether this action touched the availability matrix.
    #[must_use]
    pub const fn is_matrix_write(&self) -> bool {
        matches!(
            self,
            Self::MatrixRowCreated { .. } | Self::MatrixCellWritten { .. }
        )
    }

    /// Whether this action created a calendar event.
    #[must_use]
    pub const fn is_calendar_write(&self) -> bool {
        matches!(
            self,
            Self::TimedCalendarEvent { .. } | Self::AllDayCalendarEvent { .. }
        )
    }
}

/// A choice the operator made during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorDecision {
    /// Confirmed stacking another booking on an already-booked DJ.
    AdditionalBookingConfirmed {
        dj: DjIdentity,
        existing_count: u32,
    },
    /// Declined to stack another booking; the run halted.
    AdditionalBookingDeclined { dj: DjIdentity },
    /// Picked a backup DJ from the candidate list.
    BackupSelected { dj: DjIdentity },
    /// Chose to leave the date without a backup.
    BackupSkipped,
}

/// Something the operator must follow up on by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningNote {
    /// A matrix cell held text the interpreter does not recognize.
    UnknownCellValue { dj: DjIdentity, raw: String },
    /// A calendar write failed after the matrix was already updated;
    /// the two systems now disagree.
    CalendarInconsistency { date: Date, detail: String },
    /// The chosen backup DJ already has calendar entries on the date.
    BackupConflict {
        dj: DjIdentity,
        entries: Vec<String>,
    },
}

/// The complete record of one booking run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub actions: Vec<WriteAction>,
    pub decisions: Vec<OperatorDecision>,
    pub warnings: Vec<WarningNote>,
}

impl Transcript {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            actions: Vec::new(),
            decisions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn record_action(&mut self, action: WriteAction) {
        self.actions.push(action);
    }

    pub fn record_decision(&mut self, decision: OperatorDecision) {
        self.decisions.push(decision);
    }

    pub fn record_warning(&mut self, warning: WarningNote) {
        self.warnings.push(warning);
    }

    /// Number of writes that touched the matrix.
    #[must_use]
    pub fn matrix_write_count(&self) -> usize {
        self.actions.iter().filter(|a| a.is_matrix_write()).count()
    }

    /// Number of calendar events created.
    #[must_use]
    pub fn calendar_write_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| a.is_calendar_write())
            .count()
    }

    /// True when the run performed no writes at all.
    #[must_use]
    pub fn is_side_effect_free(&self) -> bool {
        self.actions.is_empty()
    }
}
