// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Arithmetic over the unassigned-booking ("TBA") column and over
//! per-DJ booked cells.
//!
//! TBA cells are comma-separated composites: booking clauses
//! (`BOOKED`, `BOOKED x N`) plus an optional `AAG` reservation marker.
//! Increments rewrite only the booking clause and carry the marker
//! through untouched, so "AAG" becomes "BOOKED, AAG" rather than being
//! overwritten.
//!
//! ## Invariants
//!
//! - `parse_tba_value(increment_tba(v)) == parse_tba_value(v) + 1` for
//!   every well-formed value
//! - `count_booked_events` never panics on operator-entered text; text
//!   it cannot read counts as zero

const BOOKED: &str = "BOOKED";
// No trailing space: operators sometimes enter "BOOKED x2".
const BOOKED_PREFIX: &str = "booked x";
const AAG: &str = "aag";

/// Counting value of one clause: `BOOKED` and `AAG` are each one slot,
/// `BOOKED x N` is N, anything else is zero.
fn clause_value(clause: &str) -> u32 {
    let lowered: String = clause.trim().to_ascii_lowercase();
    if lowered == "booked" || lowered == AAG {
        1
    } else if let Some(suffix) = lowered.strip_prefix(BOOKED_PREFIX) {
        suffix.trim().parse::<u32>().unwrap_or(0)
    } else {
        0
    }
}

/// Total slot count of a TBA cell, summing every comma clause.
///
/// `""` ⇒ 0, `"BOOKED"` ⇒ 1, `"BOOKED x 2, AAG"` ⇒ 3.
#[must_use]
pub fn parse_tba_value(raw: &str) -> u32 {
    raw.split(',').map(clause_value).sum()
}

/// Rewrites a TBA cell for one additional unassigned booking,
/// preserving any `AAG` marker clause.
#[must_use]
pub fn increment_tba(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::from(BOOKED);
    }

    let mut aag_clauses: Vec<&str> = Vec::new();
    let mut booked_clause: Option<&str> = None;
    for clause in raw.split(',') {
        let trimmed: &str = clause.trim();
        if trimmed.eq_ignore_ascii_case(AAG) {
            aag_clauses.push(trimmed);
        } else if booked_clause.is_none() {
            booked_clause = Some(trimmed);
        }
    }

    let new_booked: String = match booked_clause {
        None => String::from(BOOKED),
        Some(clause) => increment_booked_clause(clause),
    };

    if aag_clauses.is_empty() {
        new_booked
    } else {
        format!("{new_booked}, {}", aag_clauses.join(", "))
    }
}

fn increment_booked_clause(clause: &str) -> String {
    let lowered: String = clause.to_ascii_lowercase();
    if let Some(suffix) = lowered.strip_prefix(BOOKED_PREFIX) {
        let next: u32 = suffix.trim().parse::<u32>().map_or(2, |n| n + 1);
        format!("BOOKED x {next}")
    } else {
        // Plain BOOKED, or text we cannot read; either way the cell now
        // holds two bookings.
        String::from("BOOKED x 2")
    }
}

/// Rewrites a single DJ's booked cell for one additional event.
///
/// `""` ⇒ `"BOOKED"`, `"BOOKED"` ⇒ `"BOOKED x 2"`, `"BOOKED x N"` ⇒
/// `"BOOKED x N+1"`. Any other text is returned unchanged; callers
/// validate the cell before writing.
#[must_use]
pub fn increment_booked(raw: &str) -> String {
    let trimmed: &str = raw.trim();
    if trimmed.is_empty() {
        return String::from(BOOKED);
    }
    let lowered: String = trimmed.to_ascii_lowercase();
    if lowered == "booked" || lowered.starts_with(BOOKED_PREFIX) {
        increment_booked_clause(trimmed)
    } else {
        String::from(raw)
    }
}

/// Booked events in a composite TBA cell, ignoring `AAG` clauses.
///
/// `"BOOKED x 2, AAG"` ⇒ 2 where [`parse_tba_value`] would say 3.
#[must_use]
pub fn count_tba_booked(raw: &str) -> u32 {
    raw.split(',')
        .filter(|clause| !clause.trim().eq_ignore_ascii_case(AAG))
        .map(clause_value)
        .sum()
}

/// Number of booked events a cell represents: only the booking clause
/// counts, and unreadable text counts as zero.
#[must_use]
pub fn count_booked_events(raw: &str) -> u32 {
    let lowered: String = raw.trim().to_ascii_lowercase();
    if lowered == "booked" {
        1
    } else if let Some(suffix) = lowered.strip_prefix(BOOKED_PREFIX) {
        suffix.trim().parse::<u32>().unwrap_or(0)
    } else {
        0
    }
}
