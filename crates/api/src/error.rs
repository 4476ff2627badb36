// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::validation::RequestValidationError;
use gigsync::CoreError;
use gigsync_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// A human-readable description of the violation.
        message: String,
    },
    /// An external system could not be reached.
    SourceUnavailable {
        /// Which system failed.
        source: String,
        /// A human-readable description of the failure.
        message: String,
    },
    /// The matrix has no worksheet for the requested year.
    WorksheetNotFound {
        /// The year with no worksheet.
        year: u16,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { message } => {
                write!(f, "Domain rule violation: {message}")
            }
            Self::SourceUnavailable { source, message } => {
                write!(f, "{source} unavailable: {message}")
            }
            Self::WorksheetNotFound { year } => {
                write!(f, "No worksheet found for year {year}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(error: CoreError) -> ApiError {
    match error {
        CoreError::DomainViolation(err) => translate_domain_error(&err),
        CoreError::SourceUnavailable { source, reason } => ApiError::SourceUnavailable {
            source: source.to_string(),
            message: reason,
        },
        CoreError::WorksheetNotFound { year } => ApiError::WorksheetNotFound { year },
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(error: &DomainError) -> ApiError {
    match error {
        DomainError::InvalidDateFormat { date_string, .. } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("'{date_string}' is not a valid date"),
        },
        DomainError::InvalidTimeFormat { time_string } => ApiError::InvalidInput {
            field: String::from("time"),
            message: format!("'{time_string}' is not a valid time"),
        },
        DomainError::UnknownDj(name) => ApiError::InvalidInput {
            field: String::from("dj"),
            message: format!("'{name}' is not a known DJ"),
        },
        other => ApiError::DomainRuleViolation {
            message: other.to_string(),
        },
    }
}

impl From<RequestValidationError> for ApiError {
    fn from(error: RequestValidationError) -> Self {
        Self::InvalidInput {
            field: error.field().to_owned(),
            message: error.to_string(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        translate_core_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gigsync::SourceKind;

    #[test]
    fn test_core_error_translation() {
        let translated: ApiError = translate_core_error(CoreError::SourceUnavailable {
            source: SourceKind::Calendar,
            reason: String::from("timeout"),
        });

        assert_eq!(
            translated,
            ApiError::SourceUnavailable {
                source: String::from("calendar"),
                message: String::from("timeout"),
            }
        );
    }

    #[test]
    fn test_unknown_dj_maps_to_invalid_input() {
        let translated: ApiError =
            translate_domain_error(&DomainError::UnknownDj(String::from("John")));

        assert!(matches!(
            translated,
            ApiError::InvalidInput { field, .. } if field == "dj"
        ));
    }
}
