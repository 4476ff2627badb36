// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time-boxed cache over the gig database.
//!
//! Gig database lookups are the slowest reads the engine makes, and
//! scans hit the same dates repeatedly. Entries expire after one hour
//! so a long-running session never serves bookings staler than that.

use crate::adapters::GigDatabaseAdapter;
use crate::error::CoreError;
use async_trait::async_trait;
use gigsync_domain::BookingRecord;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use time::Date;
use tokio::sync::Mutex;
use tracing::debug;

const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

struct CacheEntry {
    fetched_at: Instant,
    bookings: Vec<BookingRecord>,
}

/// Caches `bookings_for_date` results per date with a fixed TTL.
pub struct CachedGigDatabase<G> {
    inner: G,
    ttl: Duration,
    entries: Mutex<HashMap<Date, CacheEntry>>,
}

impl<G: GigDatabaseAdapter> CachedGigDatabase<G> {
    pub fn new(inner: G) -> Self {
        Self::with_ttl(inner, DEFAULT_TTL)
    }

    pub fn with_ttl(inner: G, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Looks up a date as of `now`, refetching when the cached entry is
    /// older than the TTL. `now` is injected so expiry is testable.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying lookup fails. A failed
    /// refetch leaves no entry behind.
    pub async fn bookings_as_of(
        &self,
        date: Date,
        now: Instant,
    ) -> Result<Vec<BookingRecord>, CoreError> {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get(&date) {
            if now.duration_since(entry.fetched_at) < self.ttl {
                return Ok(entry.bookings.clone());
            }
            debug!(%date, "gig cache entry expired");
            entries.remove(&date);
        }

        let bookings: Vec<BookingRecord> = self.inner.bookings_for_date(date).await?;
        entries.insert(
            date,
            CacheEntry {
                fetched_at: now,
                bookings: bookings.clone(),
            },
        );
        Ok(bookings)
    }

    /// Drops every cached entry.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

#[async_trait]
impl<G: GigDatabaseAdapter> GigDatabaseAdapter for CachedGigDatabase<G> {
    async fn bookings_for_date(&self, date: Date) -> Result<Vec<BookingRecord>, CoreError> {
        self.bookings_as_of(date, Instant::now()).await
    }
}
