// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Nearby-booking lookups around a target date.
//!
//! When weighing a new booking it helps to see what the roster already
//! has on the surrounding days. The six neighbor lookups are
//! independent, so they run concurrently and the results are reordered
//! by offset before returning.

use crate::adapters::GigDatabaseAdapter;
use crate::error::CoreError;
use futures::future::join_all;
use gigsync_domain::{BookingRecord, DjIdentity};
use time::{Date, Duration};

/// How far either side of the target date a neighbor lookup reaches.
pub const NEIGHBOR_SPAN_DAYS: i64 = 3;

/// Bookings on one day near the target date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearbyDay {
    /// Days from the target date, negative for earlier days. Never zero.
    pub offset: i64,
    pub date: Date,
    pub bookings: Vec<BookingRecord>,
}

/// Fetches one DJ's bookings for the three days before and after
/// `date`, concurrently, returned in ascending offset order. The
/// target date itself is excluded; callers already have it in hand.
/// With no DJ given, every booking on the neighboring days is kept.
///
/// # Errors
///
/// Returns an error if any lookup fails or an offset date is out of
/// calendar range.
pub async fn nearby_bookings(
    gig: &dyn GigDatabaseAdapter,
    dj: Option<DjIdentity>,
    date: Date,
) -> Result<Vec<NearbyDay>, CoreError> {
    let offsets: Vec<i64> = (-NEIGHBOR_SPAN_DAYS..=NEIGHBOR_SPAN_DAYS)
        .filter(|offset| *offset != 0)
        .collect();

    let lookups = offsets.iter().map(|offset| async move {
        let neighbor: Date = date.checked_add(Duration::days(*offset)).ok_or_else(|| {
            CoreError::DomainViolation(gigsync_domain::DomainError::DateArithmeticOverflow {
                operation: format!("offsetting {date} by {offset} days"),
            })
        })?;
        let mut bookings: Vec<BookingRecord> = gig.bookings_for_date(neighbor).await?;
        if let Some(dj) = dj {
            bookings.retain(|b| b.assigned_dj == Some(dj));
        }
        Ok::<NearbyDay, CoreError>(NearbyDay {
            offset: *offset,
            date: neighbor,
            bookings,
        })
    });

    let mut days: Vec<NearbyDay> = join_all(lookups)
        .await
        .into_iter()
        .collect::<Result<Vec<NearbyDay>, CoreError>>()?;
    // join_all preserves input order, but sort anyway so the contract
    // does not hinge on it.
    days.sort_by_key(|day| day.offset);
    Ok(days)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::memory::InMemoryGigDatabase;
    use time::macros::date;

    fn booking(date: Date, client: &str) -> BookingRecord {
        BookingRecord {
            date,
            assigned_dj: None,
            secondary_dj: None,
            client: client.to_owned(),
            venue: String::new(),
            venue_street: String::new(),
            venue_city_state_zip: String::new(),
            setup_time: "4:00".to_owned(),
            clear_time: "10:00".to_owned(),
            sound_setup: String::new(),
            ceremony_sound: false,
            planner: false,
        }
    }

    #[tokio::test]
    async fn test_neighbors_in_offset_order() {
        let gig: InMemoryGigDatabase = InMemoryGigDatabase::new();
        gig.seed_booking(booking(date!(2026 - 02 - 20), "Amy and Ben"))
            .await;
        gig.seed_booking(booking(date!(2026 - 02 - 24), "Cara and Dan"))
            .await;

        let days: Vec<NearbyDay> = nearby_bookings(&gig, None, date!(2026 - 02 - 21))
            .await
            .unwrap();

        assert_eq!(days.len(), 6);
        let offsets: Vec<i64> = days.iter().map(|d| d.offset).collect();
        assert_eq!(offsets, vec![-3, -2, -1, 1, 2, 3]);
        assert_eq!(days[2].bookings.len(), 1);
        assert_eq!(days[2].bookings[0].client, "Amy and Ben");
        assert_eq!(days[5].bookings.len(), 1);
        assert_eq!(days[5].bookings[0].client, "Cara and Dan");
    }

    #[tokio::test]
    async fn test_target_date_excluded() {
        let gig: InMemoryGigDatabase = InMemoryGigDatabase::new();
        gig.seed_booking(booking(date!(2026 - 02 - 21), "Eve and Finn"))
            .await;

        let days: Vec<NearbyDay> = nearby_bookings(&gig, None, date!(2026 - 02 - 21))
            .await
            .unwrap();

        assert!(days.iter().all(|d| d.offset != 0));
        assert!(days.iter().all(|d| d.bookings.is_empty()));
    }

    #[tokio::test]
    async fn test_dj_filter_drops_other_assignments() {
        let gig: InMemoryGigDatabase = InMemoryGigDatabase::new();
        let mut paul: BookingRecord = booking(date!(2026 - 02 - 20), "Amy and Ben");
        paul.assigned_dj = Some(DjIdentity::Paul);
        let mut woody: BookingRecord = booking(date!(2026 - 02 - 20), "Cara and Dan");
        woody.assigned_dj = Some(DjIdentity::Woody);
        gig.seed_booking(paul).await;
        gig.seed_booking(woody).await;

        let days: Vec<NearbyDay> =
            nearby_bookings(&gig, Some(DjIdentity::Paul), date!(2026 - 02 - 21))
                .await
                .unwrap();

        let friday: &NearbyDay = days.iter().find(|d| d.offset == -1).unwrap();
        assert_eq!(friday.bookings.len(), 1);
        assert_eq!(friday.bookings[0].client, "Amy and Ben");
    }
}
