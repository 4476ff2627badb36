// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-date write serialization.
//!
//! The booking protocol is not concurrency-safe for two runs touching
//! the same date, so submissions acquire a per-date async mutex before
//! entering the protocol. Different dates proceed independently.

use std::collections::HashMap;
use std::sync::Arc;
use time::Date;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of one async mutex per date.
#[derive(Debug, Default)]
pub struct DateLocks {
    locks: Mutex<HashMap<Date, Arc<Mutex<()>>>>,
}

impl DateLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for a date, waiting if another submission for
    /// the same date holds it.
    pub async fn acquire(&self, date: Date) -> OwnedMutexGuard<()> {
        let lock: Arc<Mutex<()>> = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(date).or_default())
        };
        lock.lock_owned().await
    }
}
