// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request field validation.
//!
//! Every operation validates its request into domain types before any
//! adapter is touched, so malformed input never reaches the engine.

use gigsync_domain::{DjIdentity, parse_matrix_date};
use thiserror::Error;
use time::Date;

/// A request field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestValidationError {
    #[error("date '{value}' could not be parsed against year {year}")]
    UnparseableDate { value: String, year: u16 },
    #[error("'{0}' is not a known DJ")]
    UnknownDj(String),
    #[error("range start {start} is after end {end}")]
    InvertedRange { start: Date, end: Date },
    #[error("'{0}' is not a recognized day filter")]
    UnknownDayFilter(String),
    #[error("client name must not be empty")]
    EmptyClient,
}

impl RequestValidationError {
    /// The request field the error applies to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::UnparseableDate { .. } => "date",
            Self::UnknownDj(_) => "dj",
            Self::InvertedRange { .. } => "range",
            Self::UnknownDayFilter(_) => "day_filter",
            Self::EmptyClient => "client",
        }
    }
}

/// Parses a request date string (`YYYY-MM-DD`, `MM-DD`, or `M/D`)
/// against the target year.
///
/// # Errors
///
/// Returns an error if the string does not parse or names a different
/// year.
pub fn parse_request_date(value: &str, year: u16) -> Result<Date, RequestValidationError> {
    parse_matrix_date(value, year).map_err(|_| RequestValidationError::UnparseableDate {
        value: value.to_owned(),
        year,
    })
}

/// Parses a DJ short or full name.
///
/// # Errors
///
/// Returns an error if the name matches no roster entry.
pub fn parse_request_dj(value: &str) -> Result<DjIdentity, RequestValidationError> {
    DjIdentity::parse_name(value).map_err(|_| RequestValidationError::UnknownDj(value.to_owned()))
}

/// Validates that a range runs forward in time.
///
/// # Errors
///
/// Returns an error if `start` is after `end`.
pub const fn validate_range(start: Date, end: Date) -> Result<(), RequestValidationError> {
    if start.to_julian_day() > end.to_julian_day() {
        return Err(RequestValidationError::InvertedRange { start, end });
    }
    Ok(())
}
