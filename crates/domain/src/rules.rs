// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The availability rule engine.
//!
//! Business policy genuinely differs per DJ — some work weekdays by
//! default, some opt in per date, one is backup-only from a configured
//! year — so the decision table is keyed first by identity, then by
//! status, then by weekend/weekday. Keeping the whole policy in one
//! function makes every exception auditable in one place and lets the
//! table be enumerated exhaustively in tests.
//!
//! ## Invariants
//!
//! - Pure and deterministic over (DJ, status, bold, date, year)
//! - `Unknown` always yields not-bookable, not-backup-eligible, with the
//!   raw text carried in the note so callers render a visible warning

use crate::cell::CellStatus;
use crate::config::{YearConfiguration, is_weekend};
use crate::dj::DjIdentity;
use serde::{Deserialize, Serialize};
use time::Date;

/// Caller-visible annotation on a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictNote {
    /// Available, but assign after other candidates (`LAST` marker).
    AssignLast,
    /// Blank cell for a DJ who must be asked before booking. This is a
    /// distinguished "maybe" state, not plain unavailability.
    UncertainBlank,
    /// Unrecognized cell text; carries the raw value for the warning line.
    UnknownValue(String),
}

impl std::fmt::Display for VerdictNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AssignLast => write!(f, "assign last"),
            Self::UncertainBlank => write!(f, "check with the DJ first"),
            Self::UnknownValue(raw) => {
                write!(f, "unrecognized matrix value \"{raw}\"")
            }
        }
    }
}

/// Result of evaluating one DJ's cell for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the DJ may take the primary booking.
    pub can_book: bool,
    /// Whether the DJ may be placed on standby.
    pub can_backup: bool,
    /// Optional annotation for the caller's presentation layer.
    pub note: Option<VerdictNote>,
}

impl Verdict {
    const fn plain(can_book: bool, can_backup: bool) -> Self {
        Self {
            can_book,
            can_backup,
            note: None,
        }
    }

    const fn noted(can_book: bool, can_backup: bool, note: VerdictNote) -> Self {
        Self {
            can_book,
            can_backup,
            note: Some(note),
        }
    }
}

/// Evaluates one DJ's availability from their normalized cell status.
///
/// Universal statuses are resolved first; `Blank` and `Out` then fall
/// through to the per-DJ rows of the decision table. Stephanie's
/// inactive years and Felipe's backup-only years are resolved before
/// the universal rows: no status makes Stephanie available then, and
/// for Felipe only an explicit `OK` restores bookability.
#[must_use]
pub fn evaluate(
    dj: DjIdentity,
    status: &CellStatus,
    bold: bool,
    date: Date,
    config: &YearConfiguration,
) -> Verdict {
    if dj == DjIdentity::Stephanie && !config.stephanie_active() {
        return Verdict::plain(false, false);
    }

    if dj == DjIdentity::Felipe && config.felipe_backup_only() {
        return match status {
            CellStatus::Ok => Verdict::plain(true, true),
            CellStatus::Out | CellStatus::Maxed => Verdict::plain(false, false),
            CellStatus::Unknown(raw) => {
                Verdict::noted(false, false, VerdictNote::UnknownValue(raw.clone()))
            }
            // Every other known status, blank included, leaves him
            // backup-eligible but never bookable.
            _ => Verdict::plain(false, true),
        };
    }

    // Universal rows: same answer for every DJ in rotation.
    match status {
        CellStatus::Booked
        | CellStatus::BookedMultiple(_)
        | CellStatus::Backup
        | CellStatus::Maxed
        | CellStatus::Reserved => return Verdict::plain(false, false),
        CellStatus::Stanford => return Verdict::plain(true, true),
        CellStatus::Last => {
            return Verdict::noted(true, true, VerdictNote::AssignLast);
        }
        CellStatus::Ok => return Verdict::plain(true, true),
        CellStatus::OkToBackup => return Verdict::plain(false, true),
        CellStatus::Unknown(raw) => {
            return Verdict::noted(false, false, VerdictNote::UnknownValue(raw.clone()));
        }
        CellStatus::Blank | CellStatus::Out => {}
    }

    let weekend = is_weekend(date);
    let blank = *status == CellStatus::Blank;

    match dj {
        DjIdentity::Henry => {
            if blank {
                if weekend {
                    Verdict::plain(true, true)
                } else {
                    // Weekday blanks mean backup duty only.
                    Verdict::plain(false, true)
                }
            } else {
                Verdict::plain(false, false)
            }
        }
        DjIdentity::Woody => {
            if blank {
                Verdict::plain(true, true)
            } else if weekend && !bold {
                // Plain OUT on a weekend still allows standby; bold OUT
                // is a hard no.
                Verdict::plain(false, true)
            } else {
                Verdict::plain(false, false)
            }
        }
        DjIdentity::Stefano => {
            if blank {
                Verdict::noted(false, false, VerdictNote::UncertainBlank)
            } else {
                Verdict::plain(false, false)
            }
        }
        DjIdentity::Stephanie => {
            if blank && weekend {
                Verdict::plain(true, true)
            } else {
                Verdict::plain(false, false)
            }
        }
        // Paul, and Felipe before his backup-only year.
        DjIdentity::Paul | DjIdentity::Felipe => {
            if blank {
                Verdict::plain(true, true)
            } else {
                Verdict::plain(false, false)
            }
        }
    }
}
