// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-year matrix configuration.
//!
//! Each availability sheet is one calendar year. The set of DJ columns,
//! their physical positions, and the per-DJ rule toggles all vary by
//! year, so the registry is the single authority consulted before any
//! cell is read or written.
//!
//! ## Invariants
//!
//! - Configurations are loaded once and read-only for the year's lifetime
//! - An unsupported year is a typed error, never a fallback to another
//!   year's columns

use crate::dj::DjIdentity;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, Month, Weekday};

/// One column of the availability matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixColumn {
    /// A DJ's availability column.
    Dj(DjIdentity),
    /// Bookings not yet assigned to a DJ.
    Tba,
    /// The reserved-spot hold column.
    Aag,
}

impl std::fmt::Display for MatrixColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dj(dj) => write!(f, "{dj}"),
            Self::Tba => write!(f, "TBA"),
            Self::Aag => write!(f, "AAG"),
        }
    }
}

/// Column layout and rule toggles for one matrix year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearConfiguration {
    year: u16,
    /// Columns paired with their 1-indexed physical sheet positions.
    columns: Vec<(MatrixColumn, u8)>,
    /// Felipe defaults to backup-only duty from 2026 onward.
    felipe_backup_only: bool,
    /// Stephanie's weekend-only rule applies from 2027; before that her
    /// column exists but she is not in rotation.
    stephanie_active: bool,
    /// Ordered backup-candidate list presented to the operator.
    backup_candidates: Vec<DjIdentity>,
}

impl YearConfiguration {
    /// Looks up the built-in configuration for a year.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnsupportedYear` if no column mapping is
    /// defined for the year.
    pub fn for_year(year: u16) -> Result<Self, DomainError> {
        match year {
            2025 => Ok(Self {
                year,
                columns: vec![
                    (MatrixColumn::Dj(DjIdentity::Henry), 4),
                    (MatrixColumn::Dj(DjIdentity::Woody), 5),
                    (MatrixColumn::Dj(DjIdentity::Paul), 6),
                    (MatrixColumn::Dj(DjIdentity::Stefano), 7),
                    (MatrixColumn::Dj(DjIdentity::Felipe), 8),
                    (MatrixColumn::Tba, 9),
                    (MatrixColumn::Dj(DjIdentity::Stephanie), 11),
                ],
                felipe_backup_only: false,
                stephanie_active: false,
                backup_candidates: vec![
                    DjIdentity::Henry,
                    DjIdentity::Woody,
                    DjIdentity::Paul,
                    DjIdentity::Stefano,
                    DjIdentity::Felipe,
                ],
            }),
            2026 => Ok(Self {
                year,
                columns: vec![
                    (MatrixColumn::Dj(DjIdentity::Henry), 4),
                    (MatrixColumn::Dj(DjIdentity::Woody), 5),
                    (MatrixColumn::Dj(DjIdentity::Paul), 6),
                    (MatrixColumn::Dj(DjIdentity::Stefano), 7),
                    (MatrixColumn::Dj(DjIdentity::Felipe), 8),
                    (MatrixColumn::Tba, 9),
                    (MatrixColumn::Dj(DjIdentity::Stephanie), 11),
                    (MatrixColumn::Aag, 12),
                ],
                felipe_backup_only: true,
                stephanie_active: false,
                backup_candidates: vec![
                    DjIdentity::Henry,
                    DjIdentity::Woody,
                    DjIdentity::Paul,
                    DjIdentity::Stefano,
                    DjIdentity::Felipe,
                ],
            }),
            2027 => Ok(Self {
                year,
                columns: vec![
                    (MatrixColumn::Dj(DjIdentity::Henry), 4),
                    (MatrixColumn::Dj(DjIdentity::Woody), 5),
                    (MatrixColumn::Dj(DjIdentity::Paul), 6),
                    (MatrixColumn::Dj(DjIdentity::Stefano), 7),
                    (MatrixColumn::Dj(DjIdentity::Stephanie), 8),
                    (MatrixColumn::Tba, 9),
                    (MatrixColumn::Aag, 10),
                    (MatrixColumn::Dj(DjIdentity::Felipe), 12),
                ],
                felipe_backup_only: true,
                stephanie_active: true,
                backup_candidates: vec![
                    DjIdentity::Henry,
                    DjIdentity::Woody,
                    DjIdentity::Paul,
                    DjIdentity::Stefano,
                    DjIdentity::Felipe,
                    DjIdentity::Stephanie,
                ],
            }),
            _ => Err(DomainError::UnsupportedYear(year)),
        }
    }

    /// Returns the configuration year.
    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the 1-indexed physical column for a matrix column, or
    /// `None` if the column does not exist this year.
    #[must_use]
    pub fn column_number(&self, column: MatrixColumn) -> Option<u8> {
        self.columns
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, n)| *n)
    }

    /// Iterates the DJ columns in physical order.
    pub fn djs(&self) -> impl Iterator<Item = DjIdentity> + '_ {
        self.columns.iter().filter_map(|(c, _)| match c {
            MatrixColumn::Dj(dj) => Some(*dj),
            _ => None,
        })
    }

    /// Whether the year's sheet carries an AAG reserved-spot column.
    #[must_use]
    pub fn has_aag_column(&self) -> bool {
        self.column_number(MatrixColumn::Aag).is_some()
    }

    /// Whether Felipe defaults to backup-only duty this year.
    #[must_use]
    pub const fn felipe_backup_only(&self) -> bool {
        self.felipe_backup_only
    }

    /// Whether Stephanie is in rotation this year.
    #[must_use]
    pub const fn stephanie_active(&self) -> bool {
        self.stephanie_active
    }

    /// Whether a `RESERVED` status in Stephanie's column counts as a
    /// booking. Applies only in her active years.
    #[must_use]
    pub const fn stephanie_reserved_counts_as_booked(&self) -> bool {
        self.stephanie_active
    }

    /// Backup candidates in the order presented to the operator.
    #[must_use]
    pub fn backup_candidates(&self) -> &[DjIdentity] {
        &self.backup_candidates
    }
}

/// Checks whether a date falls on Saturday or Sunday.
#[must_use]
pub const fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// Parses a caller-supplied date string against a target year.
///
/// Accepts `YYYY-MM-DD` (the year must match), `MM-DD`, and `M/D`.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateFormat` if the string does not parse,
/// names an impossible calendar date, or carries a different year.
pub fn parse_matrix_date(input: &str, year: u16) -> Result<Date, DomainError> {
    let input = input.trim();
    let invalid = |reason: &str| DomainError::InvalidDateFormat {
        date_string: input.to_string(),
        reason: reason.to_string(),
    };

    let (month_day, explicit_year) = match input.split_once('-') {
        // "YYYY-MM-DD" when the first segment is a 4-digit year.
        Some((first, rest)) if first.len() == 4 => {
            let parsed_year: u16 = first
                .parse()
                .map_err(|_| invalid("year is not a number"))?;
            if parsed_year != year {
                return Err(invalid("year does not match the target sheet"));
            }
            (rest.replace('-', "/"), Some(parsed_year))
        }
        _ => (input.replace('-', "/"), None),
    };

    let (month_str, day_str) = month_day
        .split_once('/')
        .ok_or_else(|| invalid("expected MM-DD or M/D"))?;
    let month_num: u8 = month_str
        .trim()
        .parse()
        .map_err(|_| invalid("month is not a number"))?;
    let day: u8 = day_str
        .trim()
        .parse()
        .map_err(|_| invalid("day is not a number"))?;
    let month = Month::try_from(month_num).map_err(|_| invalid("month out of range"))?;

    let resolved_year = explicit_year.unwrap_or(year);
    Date::from_calendar_date(i32::from(resolved_year), month, day)
        .map_err(|e| invalid(&e.to_string()))
}

/// Formats a date the way it appears in the matrix date column,
/// e.g. `"Sat 2/21"`.
#[must_use]
pub fn format_sheet_date(date: Date) -> String {
    let day_name = match date.weekday() {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    };
    format!("{} {}/{}", day_name, u8::from(date.month()), date.day())
}
