// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inbound booking records and the display strings derived from them.

use crate::dj::{DjIdentity, unassigned_initials};
use crate::error::DomainError;
use crate::event_window::{EventWindow, event_window};
use serde::{Deserialize, Serialize};
use time::Date;

/// One booking as received from the gig database.
///
/// Times stay in their 12-hour entered form ("4:00") until an event
/// window is calculated; the matrix and calendar writes both work from
/// the derived strings, never the raw record fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub date: Date,
    /// `None` means the booking goes to the TBA column.
    pub assigned_dj: Option<DjIdentity>,
    /// Free-text secondary DJ name; only its first letter matters for
    /// an unassigned booking's initials.
    pub secondary_dj: Option<String>,
    pub client: String,
    pub venue: String,
    pub venue_street: String,
    pub venue_city_state_zip: String,
    /// Contracted setup time as entered, e.g. `"4:00"`.
    pub setup_time: String,
    /// Contracted clear time as entered, e.g. `"10:00"`.
    pub clear_time: String,
    pub sound_setup: String,
    pub ceremony_sound: bool,
    pub planner: bool,
}

impl BookingRecord {
    /// The bracketed initials this booking writes into calendar titles,
    /// falling back to unassigned initials when no DJ is set.
    #[must_use]
    pub fn initials(&self) -> String {
        self.assigned_dj.map_or_else(
            || unassigned_initials(self.secondary_dj.as_deref()),
            |dj| dj.initials().to_owned(),
        )
    }

    #[must_use]
    pub fn initials_marker(&self) -> String {
        format!("[{}]", self.initials())
    }

    /// Client names shortened for the calendar title: "Catherine
    /// MacDougall and Jacob Asmuth" becomes "Catherine and Jacob".
    #[must_use]
    pub fn client_display(&self) -> String {
        extract_client_first_names(&self.client)
    }

    /// The venue with any parenthetical annotation removed.
    #[must_use]
    pub fn venue_name(&self) -> String {
        strip_parentheticals(&self.venue)
    }

    /// Primary calendar event title: `[PB] Catherine and Jacob`, with a
    /// planner marker when a coordinator is attached.
    #[must_use]
    pub fn event_title(&self) -> String {
        let mut title: String = format!("{} {}", self.initials_marker(), self.client_display());
        if self.planner {
            title.push_str(" (planner)");
        }
        title
    }

    /// Calendar location line: venue, street, city/state/zip, skipping
    /// whichever pieces the record lacks.
    #[must_use]
    pub fn location_line(&self) -> String {
        let mut parts: Vec<String> = vec![self.venue_name()];
        if !self.venue_street.trim().is_empty() {
            parts.push(self.venue_street.trim().to_owned());
        }
        if !self.venue_city_state_zip.trim().is_empty() {
            parts.push(self.venue_city_state_zip.trim().to_owned());
        }
        parts.join(", ")
    }

    /// Resolves the calendar window for this booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the entered times do not parse or the window
    /// cannot be placed in the business timezone.
    pub fn window(&self) -> Result<EventWindow, DomainError> {
        event_window(
            self.date,
            &self.setup_time,
            &self.clear_time,
            &self.sound_setup,
            self.ceremony_sound,
        )
    }
}

/// Shortens a couple's full names to first names.
///
/// Only a name of the shape "First Last and First Last" is shortened;
/// when either side of the "and" is a single word the whole string is
/// left alone, so "Tom and Jerry" stays intact and so do corporate
/// names with no "and" at all.
#[must_use]
pub fn extract_client_first_names(client: &str) -> String {
    let Some((left, right)) = client.split_once(" and ") else {
        return client.to_owned();
    };
    let left_words: Vec<&str> = left.split_whitespace().collect();
    let right_words: Vec<&str> = right.split_whitespace().collect();
    if left_words.len() < 2 || right_words.len() < 2 {
        return client.to_owned();
    }
    format!("{} and {}", left_words[0], right_words[0])
}

/// Removes `(...)` annotations and collapses the remaining whitespace.
fn strip_parentheticals(venue: &str) -> String {
    let mut depth: u32 = 0;
    let mut kept: String = String::with_capacity(venue.len());
    for c in venue.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => kept.push(c),
            _ => {}
        }
    }
    kept.split_whitespace().collect::<Vec<&str>>().join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::date;

    fn record() -> BookingRecord {
        BookingRecord {
            date: date!(2026 - 02 - 21),
            assigned_dj: Some(DjIdentity::Paul),
            secondary_dj: None,
            client: String::from("Catherine MacDougall and Jacob Asmuth"),
            venue: String::from("Park Winters (Winters, CA)"),
            venue_street: String::from("27850 County Road 26"),
            venue_city_state_zip: String::from("Winters, CA 95694"),
            setup_time: String::from("4:00"),
            clear_time: String::from("10:00"),
            sound_setup: String::from("Standard Speakers"),
            ceremony_sound: false,
            planner: false,
        }
    }

    #[test]
    fn test_extract_couple_first_names() {
        assert_eq!(
            extract_client_first_names("Catherine MacDougall and Jacob Asmuth"),
            "Catherine and Jacob"
        );
        assert_eq!(
            extract_client_first_names("Anya Hee and Hilal Ahmad"),
            "Anya and Hilal"
        );
    }

    #[test]
    fn test_extract_leaves_non_couples_alone() {
        assert_eq!(
            extract_client_first_names("Bird Family Seder"),
            "Bird Family Seder"
        );
        assert_eq!(
            extract_client_first_names("HCF Volunteer Summit"),
            "HCF Volunteer Summit"
        );
        assert_eq!(extract_client_first_names("Tom and Jerry"), "Tom and Jerry");
        assert_eq!(
            extract_client_first_names("Johnson Wedding"),
            "Johnson Wedding"
        );
    }

    #[test]
    fn test_venue_name_strips_parenthetical() {
        assert_eq!(record().venue_name(), "Park Winters");
    }

    #[test]
    fn test_event_title() {
        let mut booking: BookingRecord = record();
        assert_eq!(booking.event_title(), "[PB] Catherine and Jacob");
        booking.planner = true;
        assert_eq!(booking.event_title(), "[PB] Catherine and Jacob (planner)");
    }

    #[test]
    fn test_unassigned_initials_from_secondary() {
        let mut booking: BookingRecord = record();
        booking.assigned_dj = None;
        booking.secondary_dj = Some(String::from("Marcus"));
        assert_eq!(booking.initials(), "UM");
        assert_eq!(booking.initials_marker(), "[UM]");

        booking.secondary_dj = None;
        assert_eq!(booking.initials(), "UP");
    }

    #[test]
    fn test_location_line_skips_missing_pieces() {
        let mut booking: BookingRecord = record();
        assert_eq!(
            booking.location_line(),
            "Park Winters, 27850 County Road 26, Winters, CA 95694"
        );
        booking.venue_street = String::new();
        booking.venue_city_state_zip = String::new();
        assert_eq!(booking.location_line(), "Park Winters");
    }

    #[test]
    fn test_window_uses_entered_times() {
        use chrono::Timelike;
        let window = record().window().unwrap();
        assert_eq!(window.start.hour(), 14);
        assert_eq!(window.end.hour(), 23);
    }
}
