// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Matrix cell interpretation.
//!
//! Raw cell text comes straight from the spreadsheet and may carry a
//! `(BOLD)` annotation appended by the formatting-aware reader. The
//! interpreter strips that annotation into a separate flag and maps the
//! remaining text onto a closed status vocabulary. Anything outside the
//! vocabulary becomes `Unknown` — a terminal safety state that every
//! downstream rule must treat as "not available", never as blank.

use serde::{Deserialize, Serialize};

/// The bold annotation appended to raw cell text by format-aware readers.
const BOLD_ANNOTATION: &str = "(bold)";

/// Normalized status of one availability matrix cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    /// Empty cell. Meaning depends on the DJ's rules.
    Blank,
    /// DJ is unavailable.
    Out,
    /// One confirmed booking.
    Booked,
    /// Multiple confirmed bookings (`BOOKED x N`).
    BookedMultiple(u32),
    /// DJ is on standby for this date.
    Backup,
    /// DJ has hit their booking limit.
    Maxed,
    /// DJ opted in for backup duty only.
    OkToBackup,
    /// DJ explicitly confirmed full availability.
    Ok,
    /// Available, but assign last.
    Last,
    /// Non-DJ-specific hold on the date.
    Reserved,
    /// Stanford-run event marker; fully available.
    Stanford,
    /// Unrecognized text. Terminal safety state: never bookable,
    /// never backup-eligible, always surfaced as a warning.
    Unknown(String),
}

impl CellStatus {
    /// Number of confirmed bookings this status represents.
    #[must_use]
    pub const fn booked_count(&self) -> u32 {
        match self {
            Self::Booked => 1,
            Self::BookedMultiple(n) => *n,
            _ => 0,
        }
    }

    /// Whether the status is a booking (`Booked` or `BookedMultiple`).
    #[must_use]
    pub const fn is_booked(&self) -> bool {
        matches!(self, Self::Booked | Self::BookedMultiple(_))
    }

    /// The cell text written to the matrix for this status.
    ///
    /// `Unknown` round-trips its raw text so an operator-visible oddity
    /// is never silently rewritten.
    #[must_use]
    pub fn write_value(&self) -> String {
        match self {
            Self::Blank => String::new(),
            Self::Out => String::from("OUT"),
            Self::Booked => String::from("BOOKED"),
            Self::BookedMultiple(n) => format!("BOOKED x {n}"),
            Self::Backup => String::from("BACKUP"),
            Self::Maxed => String::from("MAXED"),
            Self::OkToBackup => String::from("OK TO BACKUP"),
            Self::Ok => String::from("OK"),
            Self::Last => String::from("LAST"),
            Self::Reserved => String::from("RESERVED"),
            Self::Stanford => String::from("STANFORD"),
            Self::Unknown(raw) => raw.clone(),
        }
    }
}

impl std::fmt::Display for CellStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.write_value())
    }
}

/// Interprets raw cell text into a normalized status and a bold flag.
///
/// Comparison is case-insensitive; the original casing is not retained.
/// `BOOKED x N` requires a positive integer `N`, with the space before
/// `N` optional; on parse failure the cell is treated as a single
/// booking rather than rejected, because it still represents at least
/// one confirmed event.
#[must_use]
pub fn interpret(raw: &str) -> (CellStatus, bool) {
    let (text, bold) = strip_bold_annotation(raw);
    let text = text.trim();
    let lower = text.to_lowercase();

    let status = match lower.as_str() {
        "" => CellStatus::Blank,
        "out" => CellStatus::Out,
        "booked" => CellStatus::Booked,
        "backup" => CellStatus::Backup,
        "maxed" => CellStatus::Maxed,
        // Legacy synonym for Felipe's backup-only marker.
        "ok to backup" | "dad" => CellStatus::OkToBackup,
        "ok" => CellStatus::Ok,
        "last" => CellStatus::Last,
        "reserved" => CellStatus::Reserved,
        "stanford" => CellStatus::Stanford,
        _ => lower.strip_prefix("booked x").map_or_else(
            || CellStatus::Unknown(text.to_string()),
            |suffix| match suffix.trim().parse::<u32>() {
                Ok(n) if n > 0 => CellStatus::BookedMultiple(n),
                _ => CellStatus::BookedMultiple(1),
            },
        ),
    };

    (status, bold)
}

/// Removes a `(BOLD)` annotation from the text, returning the remainder
/// and whether the annotation was present.
fn strip_bold_annotation(raw: &str) -> (String, bool) {
    let lower = raw.to_ascii_lowercase();
    lower.find(BOLD_ANNOTATION).map_or_else(
        || (raw.to_string(), false),
        |idx| {
            let mut stripped = String::with_capacity(raw.len());
            stripped.push_str(&raw[..idx]);
            stripped.push_str(&raw[idx + BOLD_ANNOTATION.len()..]);
            (stripped, true)
        },
    )
}
