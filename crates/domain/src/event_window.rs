// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar event-window calculation.
//!
//! Booking records carry 12-hour wall-clock times with no AM/PM marker
//! ("4:00" means 4 PM for a reception, "9:00" means 9 AM for a setup).
//! This module resolves them with the business heuristic, widens the
//! window by the DJ's arrival and teardown allowances, and anchors the
//! result in Pacific time.
//!
//! ## Invariants
//!
//! - Event windows never cross midnight; ends cap at 23:59
//! - An end of exactly 12:00 means midnight, so it caps immediately and
//!   takes no teardown allowance
//! - All times are wall-clock times in `America/Los_Angeles`

use crate::error::DomainError;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use time::Date;

/// Every event is anchored to the business's home timezone.
pub const BUSINESS_TZ: Tz = chrono_tz::America::Los_Angeles;

/// Minutes before the contracted setup time the DJ arrives.
///
/// Quad rigs always get two hours. A no-main-sound gig is a light
/// load-in unless ceremony sound is contracted separately.
#[must_use]
pub fn arrival_offset_minutes(sound_setup: &str, ceremony_sound: bool) -> u32 {
    let lowered: String = sound_setup.to_ascii_lowercase();
    if lowered.contains("quad") {
        120
    } else if lowered.contains("no main sound") {
        if ceremony_sound { 90 } else { 60 }
    } else if ceremony_sound {
        120
    } else {
        90
    }
}

/// Minutes of teardown added after the contracted clear time.
const TEARDOWN_MINUTES: u32 = 60;

fn parse_clock(value: &str) -> Result<(u32, u32), DomainError> {
    let trimmed: &str = value.trim();
    let invalid = || DomainError::InvalidTimeFormat {
        time_string: value.to_string(),
    };
    let (hour_str, minute_str) = trimmed.split_once(':').unwrap_or((trimmed, "0"));
    let hour: u32 = hour_str.trim().parse().map_err(|_| invalid())?;
    let minute: u32 = minute_str.trim().parse().map_err(|_| invalid())?;
    if hour == 0 || hour > 12 || minute > 59 {
        return Err(invalid());
    }
    Ok((hour, minute))
}

/// Morning hours on the 12-hour clock. Setups at 8-11 are morning work;
/// anything else is an afternoon or evening call.
const fn is_morning_hour(hour: u32) -> bool {
    hour >= 8 && hour < 12
}

/// Resolves 12-hour setup and clear times to 24-hour `(hour, minute)`
/// pairs.
///
/// Start hours 8-11 read as AM, everything else as PM. An end of
/// exactly 12:00 means midnight and caps to `(23, 59)`; `12:mm` is
/// early afternoon. Other end hours take the same 8-11 rule, then bump
/// forward twelve hours when they would not land after the start.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeFormat` if either string is not a
/// 12-hour clock time.
pub fn convert_times_to_24h(
    setup: &str,
    clear: &str,
) -> Result<((u32, u32), (u32, u32)), DomainError> {
    let (setup_hour, setup_minute) = parse_clock(setup)?;
    let (clear_hour, clear_minute) = parse_clock(clear)?;

    let start_hour: u32 = if is_morning_hour(setup_hour) {
        setup_hour
    } else if setup_hour == 12 {
        12
    } else {
        setup_hour + 12
    };

    let end: (u32, u32) = if clear_hour == 12 {
        if clear_minute == 0 {
            // Midnight; cap the visible window at the end of the day.
            (23, 59)
        } else {
            (12, clear_minute)
        }
    } else {
        let mut end_hour: u32 = if is_morning_hour(clear_hour) {
            clear_hour
        } else {
            clear_hour + 12
        };
        if (end_hour, clear_minute) <= (start_hour, setup_minute) {
            end_hour += 12;
        }
        if end_hour >= 24 {
            (23, 59)
        } else {
            (end_hour, clear_minute)
        }
    };

    Ok(((start_hour, setup_minute), end))
}

/// A resolved calendar window in the business timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl EventWindow {
    #[must_use]
    pub fn start_rfc3339(&self) -> String {
        self.start.to_rfc3339()
    }

    #[must_use]
    pub fn end_rfc3339(&self) -> String {
        self.end.to_rfc3339()
    }
}

/// Calculates the calendar window for a booking.
///
/// The contracted times are resolved through [`convert_times_to_24h`],
/// the start moves earlier by the arrival offset, and the end gains a
/// one-hour teardown capped at 23:59. When the contracted clear time is
/// exactly 12:00 the end is already capped and takes no teardown.
///
/// # Arguments
///
/// * `date` - Event date
/// * `setup` / `clear` - Contracted 12-hour times as entered ("4:00")
/// * `sound_setup` - Sound package description
/// * `ceremony_sound` - Whether ceremony sound is contracted
///
/// # Errors
///
/// Returns an error if a time string does not parse, the arrival offset
/// would push the start before midnight, or the wall-clock datetime
/// cannot be resolved in the business timezone.
pub fn event_window(
    date: Date,
    setup: &str,
    clear: &str,
    sound_setup: &str,
    ceremony_sound: bool,
) -> Result<EventWindow, DomainError> {
    let ((start_hour, start_minute), (end_hour, end_minute)) =
        convert_times_to_24h(setup, clear)?;

    let arrival: u32 = arrival_offset_minutes(sound_setup, ceremony_sound);
    let start_total: i64 =
        i64::from(start_hour * 60 + start_minute) - i64::from(arrival);
    if start_total < 0 {
        return Err(DomainError::EventWindowUnrepresentable {
            reason: format!(
                "arrival offset of {arrival} minutes pushes a {setup} setup before midnight"
            ),
        });
    }

    let end_capped: bool = (end_hour, end_minute) == (23, 59);
    let end_total: u32 = if end_capped {
        23 * 60 + 59
    } else {
        (end_hour * 60 + end_minute + TEARDOWN_MINUTES).min(23 * 60 + 59)
    };

    let naive_date: NaiveDate = NaiveDate::from_ymd_opt(
        date.year(),
        date.month() as u32,
        u32::from(date.day()),
    )
    .ok_or_else(|| DomainError::EventWindowUnrepresentable {
        reason: format!("invalid event date: {date}"),
    })?;

    let resolve = |total_minutes: i64| -> Result<DateTime<Tz>, DomainError> {
        let hour: u32 = u32::try_from(total_minutes / 60).unwrap_or(0);
        let minute: u32 = u32::try_from(total_minutes % 60).unwrap_or(0);
        let naive_time: NaiveTime = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| DomainError::EventWindowUnrepresentable {
                reason: format!("invalid wall-clock time {hour}:{minute:02}"),
            })?;
        BUSINESS_TZ
            .from_local_datetime(&naive_date.and_time(naive_time))
            .single()
            .ok_or_else(|| DomainError::EventWindowUnrepresentable {
                reason: format!(
                    "could not resolve {naive_date} {naive_time} in {BUSINESS_TZ} (ambiguous or non-existent due to DST)"
                ),
            })
    };

    Ok(EventWindow {
        start: resolve(start_total)?,
        end: resolve(i64::from(end_total))?,
    })
}
