// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation and interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A caller-supplied date string could not be parsed against the target year.
    InvalidDateFormat {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        reason: String,
    },
    /// A matrix cell held text outside the recognized status vocabulary.
    UnknownCellValue {
        /// The raw cell text.
        raw: String,
    },
    /// No column configuration exists for the requested year.
    UnsupportedYear(u16),
    /// A setup or clear time string could not be parsed.
    InvalidTimeFormat {
        /// The invalid time string.
        time_string: String,
    },
    /// A DJ name did not match any known identity.
    UnknownDj(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A calendar event window could not be expressed in the event timezone.
    EventWindowUnrepresentable {
        /// Description of the failed conversion.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateFormat {
                date_string,
                reason,
            } => {
                write!(f, "Failed to parse date '{date_string}': {reason}")
            }
            Self::UnknownCellValue { raw } => {
                write!(f, "Unrecognized matrix cell value '{raw}'")
            }
            Self::UnsupportedYear(year) => {
                write!(f, "No column configuration defined for year {year}")
            }
            Self::InvalidTimeFormat { time_string } => {
                write!(f, "Failed to parse time '{time_string}'")
            }
            Self::UnknownDj(name) => write!(f, "Unknown DJ: '{name}'"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::EventWindowUnrepresentable { reason } => {
                write!(f, "Event window could not be constructed: {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
