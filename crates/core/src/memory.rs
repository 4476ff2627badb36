// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory adapter implementations.
//!
//! These back dry runs and tests. Each adapter keeps a ledger of the
//! writes it received so callers can assert on exactly what would have
//! hit the real systems.

use crate::adapters::{
    AllDayEvent, CalendarAdapter, GigDatabaseAdapter, MatrixAdapter, OperatorPrompts, TimedEvent,
};
use crate::error::CoreError;
use async_trait::async_trait;
use gigsync_domain::{BookingRecord, CellEntry, DateRow, DjIdentity, MatrixColumn};
use std::collections::{BTreeMap, HashSet};
use time::Date;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct MatrixState {
    /// year -> date -> column -> raw text
    sheets: BTreeMap<u16, BTreeMap<Date, BTreeMap<MatrixColumn, String>>>,
    bold: HashSet<(u16, Date, MatrixColumn)>,
    writes: Vec<(Date, MatrixColumn, String)>,
}

/// A matrix held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryMatrix {
    state: Mutex<MatrixState>,
}

impl InMemoryMatrix {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty worksheet for a year. Reads against years with
    /// no worksheet fail with `WorksheetNotFound`.
    pub async fn add_worksheet(&self, year: u16) {
        let mut state = self.state.lock().await;
        state.sheets.entry(year).or_default();
    }

    /// Seeds one cell's raw text.
    pub async fn seed_cell(&self, year: u16, date: Date, column: MatrixColumn, raw: &str) {
        let mut state = self.state.lock().await;
        state
            .sheets
            .entry(year)
            .or_default()
            .entry(date)
            .or_default()
            .insert(column, raw.to_owned());
    }

    /// Marks a cell bold.
    pub async fn seed_bold(&self, year: u16, date: Date, column: MatrixColumn) {
        let mut state = self.state.lock().await;
        state.bold.insert((year, date, column));
    }

    /// Every write received, in order.
    pub async fn writes(&self) -> Vec<(Date, MatrixColumn, String)> {
        self.state.lock().await.writes.clone()
    }

    fn build_row(
        state: &MatrixState,
        year: u16,
        date: Date,
        cells: &BTreeMap<MatrixColumn, String>,
    ) -> DateRow {
        let parsed: BTreeMap<MatrixColumn, CellEntry> = cells
            .iter()
            .map(|(column, raw)| {
                let bold: bool = state.bold.contains(&(year, date, *column));
                (*column, CellEntry::parse_with_bold(raw, bold))
            })
            .collect();
        DateRow::new(date, parsed)
    }
}

#[async_trait]
impl MatrixAdapter for InMemoryMatrix {
    async fn read_row(&self, year: u16, date: Date) -> Result<Option<DateRow>, CoreError> {
        let state = self.state.lock().await;
        let sheet = state
            .sheets
            .get(&year)
            .ok_or(CoreError::WorksheetNotFound { year })?;
        Ok(sheet
            .get(&date)
            .map(|cells| Self::build_row(&state, year, date, cells)))
    }

    async fn read_range(
        &self,
        year: u16,
        start: Date,
        end: Date,
    ) -> Result<Vec<DateRow>, CoreError> {
        let state = self.state.lock().await;
        let sheet = state
            .sheets
            .get(&year)
            .ok_or(CoreError::WorksheetNotFound { year })?;
        Ok(sheet
            .range(start..=end)
            .map(|(date, cells)| Self::build_row(&state, year, *date, cells))
            .collect())
    }

    async fn create_row(&self, year: u16, date: Date) -> Result<(), CoreError> {
        let mut state = self.state.lock().await;
        if !state.sheets.contains_key(&year) {
            return Err(CoreError::WorksheetNotFound { year });
        }
        if let Some(sheet) = state.sheets.get_mut(&year) {
            sheet.entry(date).or_default();
        }
        Ok(())
    }

    async fn write_cell(
        &self,
        year: u16,
        date: Date,
        column: MatrixColumn,
        value: &str,
    ) -> Result<(), CoreError> {
        let mut state = self.state.lock().await;
        if !state.sheets.contains_key(&year) {
            return Err(CoreError::WorksheetNotFound { year });
        }
        if let Some(sheet) = state.sheets.get_mut(&year) {
            sheet
                .entry(date)
                .or_default()
                .insert(column, value.to_owned());
        }
        state.writes.push((date, column, value.to_owned()));
        Ok(())
    }

    async fn is_cell_bold(
        &self,
        year: u16,
        date: Date,
        column: MatrixColumn,
    ) -> Result<bool, CoreError> {
        let state = self.state.lock().await;
        Ok(state.bold.contains(&(year, date, column)))
    }
}

#[derive(Debug, Default)]
struct CalendarState {
    /// date -> event titles already on the calendar
    existing: BTreeMap<Date, Vec<String>>,
    timed_created: Vec<TimedEvent>,
    all_day_created: Vec<AllDayEvent>,
    /// When set, every write fails with this reason.
    fail_writes: Option<String>,
}

/// A calendar held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryCalendar {
    state: Mutex<CalendarState>,
}

impl InMemoryCalendar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a pre-existing event title on a date.
    pub async fn seed_event(&self, date: Date, title: &str) {
        let mut state = self.state.lock().await;
        state.existing.entry(date).or_default().push(title.to_owned());
    }

    /// Makes every subsequent write fail, for exercising the
    /// matrix-updated-but-calendar-failed path.
    pub async fn fail_writes(&self, reason: &str) {
        let mut state = self.state.lock().await;
        state.fail_writes = Some(reason.to_owned());
    }

    pub async fn timed_events_created(&self) -> Vec<TimedEvent> {
        self.state.lock().await.timed_created.clone()
    }

    pub async fn all_day_events_created(&self) -> Vec<AllDayEvent> {
        self.state.lock().await.all_day_created.clone()
    }
}

#[async_trait]
impl CalendarAdapter for InMemoryCalendar {
    async fn count_events(&self, date: Date, initials_marker: &str) -> Result<u32, CoreError> {
        let titles: Vec<String> = self.events_matching(date, initials_marker).await?;
        Ok(u32::try_from(titles.len()).unwrap_or(u32::MAX))
    }

    async fn events_matching(
        &self,
        date: Date,
        initials_marker: &str,
    ) -> Result<Vec<String>, CoreError> {
        let state = self.state.lock().await;
        let mut titles: Vec<String> = Vec::new();
        if let Some(existing) = state.existing.get(&date) {
            titles.extend(existing.iter().filter(|t| t.contains(initials_marker)).cloned());
        }
        titles.extend(
            state
                .timed_created
                .iter()
                .filter(|e| e.date == date && e.title.contains(initials_marker))
                .map(|e| e.title.clone()),
        );
        titles.extend(
            state
                .all_day_created
                .iter()
                .filter(|e| e.date == date && e.title.contains(initials_marker))
                .map(|e| e.title.clone()),
        );
        Ok(titles)
    }

    async fn create_timed_event(&self, event: &TimedEvent) -> Result<(), CoreError> {
        let mut state = self.state.lock().await;
        if let Some(reason) = &state.fail_writes {
            return Err(CoreError::SourceUnavailable {
                source: crate::error::SourceKind::Calendar,
                reason: reason.clone(),
            });
        }
        state.timed_created.push(event.clone());
        Ok(())
    }

    async fn create_all_day_event(&self, event: &AllDayEvent) -> Result<(), CoreError> {
        let mut state = self.state.lock().await;
        if let Some(reason) = &state.fail_writes {
            return Err(CoreError::SourceUnavailable {
                source: crate::error::SourceKind::Calendar,
                reason: reason.clone(),
            });
        }
        state.all_day_created.push(event.clone());
        Ok(())
    }
}

/// A gig database held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryGigDatabase {
    bookings: Mutex<BTreeMap<Date, Vec<BookingRecord>>>,
}

impl InMemoryGigDatabase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_booking(&self, booking: BookingRecord) {
        let mut bookings = self.bookings.lock().await;
        bookings.entry(booking.date).or_default().push(booking);
    }
}

#[async_trait]
impl GigDatabaseAdapter for InMemoryGigDatabase {
    async fn bookings_for_date(&self, date: Date) -> Result<Vec<BookingRecord>, CoreError> {
        let bookings = self.bookings.lock().await;
        Ok(bookings.get(&date).cloned().unwrap_or_default())
    }
}

/// An operator whose answers are scripted up front.
#[derive(Debug)]
pub struct ScriptedOperator {
    confirm_additional: bool,
    backup_choice: Option<DjIdentity>,
    prompts_seen: Mutex<Vec<String>>,
}

impl ScriptedOperator {
    /// An operator who approves stacked bookings and picks the given
    /// backup (or skips when `None`).
    #[must_use]
    pub const fn new(confirm_additional: bool, backup_choice: Option<DjIdentity>) -> Self {
        Self {
            confirm_additional,
            backup_choice,
            prompts_seen: Mutex::const_new(Vec::new()),
        }
    }

    /// The prompts shown, in order, for asserting on flow.
    pub async fn prompts_seen(&self) -> Vec<String> {
        self.prompts_seen.lock().await.clone()
    }
}

#[async_trait]
impl OperatorPrompts for ScriptedOperator {
    async fn confirm_additional_booking(
        &self,
        dj: DjIdentity,
        existing_count: u32,
        _existing_events: &[String],
    ) -> Result<bool, CoreError> {
        let mut seen = self.prompts_seen.lock().await;
        seen.push(format!("confirm_additional:{dj}:{existing_count}"));
        Ok(self.confirm_additional)
    }

    async fn select_backup(
        &self,
        date: Date,
        _spots_remaining: u32,
        candidates: &[DjIdentity],
    ) -> Result<Option<DjIdentity>, CoreError> {
        let mut seen = self.prompts_seen.lock().await;
        seen.push(format!("select_backup:{date}:{}", candidates.len()));
        Ok(self
            .backup_choice
            .filter(|choice| candidates.contains(choice)))
    }
}
