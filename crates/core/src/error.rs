// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gigsync_domain::DomainError;
use serde::{Deserialize, Serialize};

/// The three external systems the engine reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// The availability matrix spreadsheet.
    Matrix,
    /// The shared booking calendar.
    Calendar,
    /// The gig database of inbound bookings.
    GigDatabase,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matrix => write!(f, "availability matrix"),
            Self::Calendar => write!(f, "calendar"),
            Self::GigDatabase => write!(f, "gig database"),
        }
    }
}

/// Errors that can occur while running engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// An external system could not be reached or answered with an
    /// unexpected failure.
    SourceUnavailable { source: SourceKind, reason: String },
    /// The matrix has no worksheet for the requested year.
    WorksheetNotFound { year: u16 },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::SourceUnavailable { source, reason } => {
                write!(f, "{source} unavailable: {reason}")
            }
            Self::WorksheetNotFound { year } => {
                write!(f, "No worksheet found for year {year}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
