// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One matrix row and the availability summary derived from it.

use crate::cell::{CellStatus, interpret};
use crate::config::{MatrixColumn, YearConfiguration};
use crate::dj::DjIdentity;
use crate::rules::{VerdictNote, evaluate};
use crate::tba::{count_tba_booked, parse_tba_value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

/// A single matrix cell: the operator's raw text plus its
/// interpretation. The raw text is retained so increments rewrite the
/// cell exactly as the operator left it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEntry {
    pub raw: String,
    pub status: CellStatus,
    pub bold: bool,
}

impl CellEntry {
    /// Interprets raw cell text, splitting off any bold annotation.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (status, bold): (CellStatus, bool) = interpret(raw);
        Self {
            raw: raw.to_owned(),
            status,
            bold,
        }
    }

    /// A cell known to be bold out of band, e.g. from cell formatting
    /// rather than a text annotation.
    #[must_use]
    pub fn parse_with_bold(raw: &str, bold: bool) -> Self {
        let mut entry: Self = Self::parse(raw);
        entry.bold = entry.bold || bold;
        entry
    }

    #[must_use]
    pub fn blank() -> Self {
        Self {
            raw: String::new(),
            status: CellStatus::Blank,
            bold: false,
        }
    }
}

/// One date's row of the availability matrix. Mutated only through the
/// booking write protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRow {
    pub date: Date,
    pub cells: BTreeMap<MatrixColumn, CellEntry>,
}

impl DateRow {
    #[must_use]
    pub const fn new(date: Date, cells: BTreeMap<MatrixColumn, CellEntry>) -> Self {
        Self { date, cells }
    }

    /// Builds a row from raw cell text per column. Missing columns read
    /// as blank.
    #[must_use]
    pub fn from_raw<'a, I>(date: Date, cells: I) -> Self
    where
        I: IntoIterator<Item = (MatrixColumn, &'a str)>,
    {
        let parsed: BTreeMap<MatrixColumn, CellEntry> = cells
            .into_iter()
            .map(|(column, raw)| (column, CellEntry::parse(raw)))
            .collect();
        Self::new(date, parsed)
    }

    /// The cell for a column, reading absent columns as blank.
    #[must_use]
    pub fn cell(&self, column: MatrixColumn) -> CellEntry {
        self.cells
            .get(&column)
            .cloned()
            .unwrap_or_else(CellEntry::blank)
    }
}

/// A DJ whose cell text was not recognized. The raw text is surfaced
/// so the operator can see what was actually in the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownCell {
    pub dj: DjIdentity,
    pub raw: String,
}

/// Everything derivable from one row: counts, eligibility sets, and
/// warnings. Recomputed from the row after every write, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySummary {
    /// Booked events across DJ cells and the TBA booking clauses.
    pub booked_count: u32,
    /// DJs already assigned as backup for the date.
    pub backup_count: u32,
    /// Bookings still placeable after TBA and AAG reservations.
    pub available_spots: u32,
    pub available_for_booking: Vec<DjIdentity>,
    pub available_for_backup: Vec<DjIdentity>,
    /// Full counting value of the TBA cell, AAG clause included.
    pub tba_count: u32,
    /// The AAG column holds a reservation.
    pub aag_reserved: bool,
    pub booked_djs: Vec<DjIdentity>,
    pub backup_djs: Vec<DjIdentity>,
    /// DJs whose blank cell means "ask first" rather than unavailable.
    pub uncertain_djs: Vec<DjIdentity>,
    pub warnings: Vec<UnknownCell>,
}

/// Derives the availability summary for one row.
///
/// The special columns (TBA, AAG) are tallied first, then every DJ
/// column either contributes to the booked/backup counts or runs
/// through the rule engine. Finally spots are reduced by pending TBA
/// bookings and any AAG reservation, and forced to zero when nobody
/// can cover backup.
#[must_use]
pub fn analyze(row: &DateRow, config: &YearConfiguration) -> AvailabilitySummary {
    let tba_cell: CellEntry = row.cell(MatrixColumn::Tba);
    let tba_count: u32 = parse_tba_value(&tba_cell.raw);
    let mut booked_count: u32 = count_tba_booked(&tba_cell.raw);

    let aag_reserved: bool = config.has_aag_column()
        && row.cell(MatrixColumn::Aag).status == CellStatus::Reserved;

    let mut backup_count: u32 = 0;
    let mut available_for_booking: Vec<DjIdentity> = Vec::new();
    let mut available_for_backup: Vec<DjIdentity> = Vec::new();
    let mut booked_djs: Vec<DjIdentity> = Vec::new();
    let mut backup_djs: Vec<DjIdentity> = Vec::new();
    let mut uncertain_djs: Vec<DjIdentity> = Vec::new();
    let mut warnings: Vec<UnknownCell> = Vec::new();

    for dj in config.djs() {
        let entry: CellEntry = row.cell(MatrixColumn::Dj(dj));
        match entry.status {
            CellStatus::Booked => {
                booked_count += 1;
                booked_djs.push(dj);
            }
            CellStatus::BookedMultiple(n) => {
                booked_count += n;
                booked_djs.push(dj);
            }
            CellStatus::Backup => {
                backup_count += 1;
                backup_djs.push(dj);
            }
            CellStatus::Reserved
                if dj == DjIdentity::Stephanie
                    && config.stephanie_reserved_counts_as_booked() =>
            {
                booked_count += 1;
                booked_djs.push(dj);
            }
            _ => {
                let verdict = evaluate(dj, &entry.status, entry.bold, row.date, config);
                if verdict.can_book {
                    available_for_booking.push(dj);
                }
                if verdict.can_backup {
                    available_for_backup.push(dj);
                }
                match verdict.note {
                    Some(VerdictNote::UncertainBlank) => uncertain_djs.push(dj),
                    Some(VerdictNote::UnknownValue(raw)) => {
                        warnings.push(UnknownCell { dj, raw });
                    }
                    Some(VerdictNote::AssignLast) | None => {}
                }
            }
        }
    }

    let eligible: u32 = u32::try_from(available_for_booking.len()).unwrap_or(u32::MAX);
    let reservations: u32 = tba_count + u32::from(aag_reserved);
    let mut available_spots: u32 = eligible.saturating_sub(reservations);

    // A booking needs backup coverage; with no backup assigned and no
    // one eligible, the date cannot take new work.
    if backup_count == 0 && available_for_backup.is_empty() {
        available_spots = 0;
    }

    AvailabilitySummary {
        booked_count,
        backup_count,
        available_spots,
        available_for_booking,
        available_for_backup,
        tba_count,
        aag_reserved,
        booked_djs,
        backup_djs,
        uncertain_djs,
        warnings,
    }
}
