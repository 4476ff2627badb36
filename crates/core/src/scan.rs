// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk availability scanning over date ranges.
//!
//! Each scan fetches the whole range in one batched read and derives
//! summaries date by date. Only dates with a matrix row appear in scan
//! results; a date with no row has no availability data to report.

use crate::adapters::{GigDatabaseAdapter, MatrixAdapter};
use crate::error::CoreError;
use gigsync_domain::{
    AvailabilitySummary, CellStatus, DateRow, DjIdentity, MatrixColumn, YearConfiguration,
    analyze, evaluate, is_weekend,
};
use serde::{Deserialize, Serialize};
use time::{Date, Weekday};
use tracing::debug;

/// Which days of the week a scan includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayFilter {
    Any,
    Weekend,
    Weekday,
    Single(Weekday),
}

impl DayFilter {
    #[must_use]
    pub fn matches(self, date: Date) -> bool {
        match self {
            Self::Any => true,
            Self::Weekend => is_weekend(date),
            Self::Weekday => !is_weekend(date),
            Self::Single(weekday) => date.weekday() == weekday,
        }
    }
}

/// One scanned date with its derived summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateAvailability {
    pub date: Date,
    pub summary: AvailabilitySummary,
}

/// Scans an inclusive date range, keeping dates that pass the day
/// filter and meet the minimum-spots floor.
///
/// # Errors
///
/// Returns an error if the range fetch fails or the year has no
/// configuration.
pub async fn scan_range(
    matrix: &dyn MatrixAdapter,
    config: &YearConfiguration,
    start: Date,
    end: Date,
    filter: DayFilter,
    min_spots: Option<u32>,
) -> Result<Vec<DateAvailability>, CoreError> {
    let rows: Vec<DateRow> = matrix.read_range(config.year(), start, end).await?;
    debug!(rows = rows.len(), %start, %end, "scanning range");

    Ok(rows
        .into_iter()
        .filter(|row| filter.matches(row.date))
        .filter_map(|row| {
            let summary: AvailabilitySummary = analyze(&row, config);
            min_spots
                .is_none_or(|floor| summary.available_spots >= floor)
                .then_some(DateAvailability {
                    date: row.date,
                    summary,
                })
        })
        .collect())
}

/// One fully booked date, with everything the report line shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullyBookedDate {
    pub date: Date,
    pub booked_djs: Vec<DjIdentity>,
    pub tba_count: u32,
    pub aag_reserved: bool,
    pub backup_djs: Vec<DjIdentity>,
    pub available_for_booking: Vec<DjIdentity>,
    pub available_for_backup: Vec<DjIdentity>,
    pub uncertain_djs: Vec<DjIdentity>,
}

/// Finds the dates in a range with no spots left.
///
/// # Errors
///
/// Returns an error if the range fetch fails.
pub async fn fully_booked_dates(
    matrix: &dyn MatrixAdapter,
    config: &YearConfiguration,
    start: Date,
    end: Date,
) -> Result<Vec<FullyBookedDate>, CoreError> {
    let rows: Vec<DateRow> = matrix.read_range(config.year(), start, end).await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let summary: AvailabilitySummary = analyze(&row, config);
            (summary.available_spots == 0).then_some(FullyBookedDate {
                date: row.date,
                booked_djs: summary.booked_djs,
                tba_count: summary.tba_count,
                aag_reserved: summary.aag_reserved,
                backup_djs: summary.backup_djs,
                available_for_booking: summary.available_for_booking,
                available_for_backup: summary.available_for_backup,
                uncertain_djs: summary.uncertain_djs,
            })
        })
        .collect())
}

/// A booked date in a per-DJ report, with the venue when the gig
/// database knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedDate {
    pub date: Date,
    pub venue: Option<String>,
}

/// One DJ's dates in a range, bucketed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DjRangeReport {
    pub available: Vec<Date>,
    /// Dates where the DJ must be asked before booking.
    pub maybe: Vec<Date>,
    pub booked: Vec<BookedDate>,
    pub backup: Vec<Date>,
}

/// Buckets every date in a range for one DJ.
///
/// Booked, Stanford, and Reserved cells count as booked here: the
/// question this report answers is "where is this DJ committed", not
/// "what counts toward the date's spots".
///
/// # Errors
///
/// Returns an error if the range fetch or a gig database lookup fails.
pub async fn dj_range_query(
    matrix: &dyn MatrixAdapter,
    gig: Option<&dyn GigDatabaseAdapter>,
    config: &YearConfiguration,
    dj: DjIdentity,
    start: Date,
    end: Date,
) -> Result<DjRangeReport, CoreError> {
    let rows: Vec<DateRow> = matrix.read_range(config.year(), start, end).await?;
    let mut report: DjRangeReport = DjRangeReport::default();

    for row in rows {
        if config.column_number(MatrixColumn::Dj(dj)).is_none() {
            continue;
        }
        let cell = row.cell(MatrixColumn::Dj(dj));
        match &cell.status {
            status if status.is_booked() => {
                report.booked.push(BookedDate {
                    date: row.date,
                    venue: venue_for(gig, dj, row.date).await?,
                });
            }
            CellStatus::Stanford | CellStatus::Reserved => {
                report.booked.push(BookedDate {
                    date: row.date,
                    venue: venue_for(gig, dj, row.date).await?,
                });
            }
            CellStatus::Backup => report.backup.push(row.date),
            CellStatus::Blank if dj == DjIdentity::Stefano => {
                report.maybe.push(row.date);
            }
            status => {
                let verdict = evaluate(dj, status, cell.bold, row.date, config);
                if verdict.can_book {
                    report.available.push(row.date);
                }
            }
        }
    }

    Ok(report)
}

async fn venue_for(
    gig: Option<&dyn GigDatabaseAdapter>,
    dj: DjIdentity,
    date: Date,
) -> Result<Option<String>, CoreError> {
    let Some(gig) = gig else {
        return Ok(None);
    };
    let bookings = gig.bookings_for_date(date).await?;
    Ok(bookings
        .iter()
        .find(|b| b.assigned_dj == Some(dj))
        .map(gigsync_domain::BookingRecord::venue_name))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::memory::InMemoryMatrix;
    use time::macros::date;

    fn cfg() -> YearConfiguration {
        YearConfiguration::for_year(2026).unwrap()
    }

    async fn seeded_matrix() -> InMemoryMatrix {
        let matrix: InMemoryMatrix = InMemoryMatrix::new();
        matrix.add_worksheet(2026).await;
        // Saturday 2/21: wide open.
        matrix
            .seed_cell(
                2026,
                date!(2026 - 02 - 21),
                MatrixColumn::Dj(DjIdentity::Henry),
                "",
            )
            .await;
        // Sunday 2/22: everyone committed or out.
        for (dj, value) in [
            (DjIdentity::Henry, "BOOKED"),
            (DjIdentity::Woody, "BACKUP"),
            (DjIdentity::Paul, "BOOKED"),
            (DjIdentity::Stefano, "OUT"),
            (DjIdentity::Felipe, "OUT"),
        ] {
            matrix
                .seed_cell(2026, date!(2026 - 02 - 22), MatrixColumn::Dj(dj), value)
                .await;
        }
        // Wednesday 2/25: open weekday.
        matrix
            .seed_cell(
                2026,
                date!(2026 - 02 - 25),
                MatrixColumn::Dj(DjIdentity::Paul),
                "",
            )
            .await;
        matrix
    }

    #[tokio::test]
    async fn test_scan_range_weekend_filter() {
        let matrix: InMemoryMatrix = seeded_matrix().await;
        let results: Vec<DateAvailability> = scan_range(
            &matrix,
            &cfg(),
            date!(2026 - 02 - 20),
            date!(2026 - 02 - 26),
            DayFilter::Weekend,
            None,
        )
        .await
        .unwrap();

        let dates: Vec<Date> = results.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date!(2026 - 02 - 21), date!(2026 - 02 - 22)]);
    }

    #[tokio::test]
    async fn test_scan_range_min_spots_floor() {
        let matrix: InMemoryMatrix = seeded_matrix().await;
        let results: Vec<DateAvailability> = scan_range(
            &matrix,
            &cfg(),
            date!(2026 - 02 - 20),
            date!(2026 - 02 - 26),
            DayFilter::Any,
            Some(1),
        )
        .await
        .unwrap();

        // The fully committed Sunday drops out.
        assert!(results.iter().all(|r| r.date != date!(2026 - 02 - 22)));
        assert!(results.iter().all(|r| r.summary.available_spots >= 1));
    }

    #[tokio::test]
    async fn test_scan_range_single_weekday() {
        let matrix: InMemoryMatrix = seeded_matrix().await;
        let results: Vec<DateAvailability> = scan_range(
            &matrix,
            &cfg(),
            date!(2026 - 02 - 20),
            date!(2026 - 02 - 26),
            DayFilter::Single(Weekday::Wednesday),
            None,
        )
        .await
        .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].date, date!(2026 - 02 - 25));
    }

    #[tokio::test]
    async fn test_fully_booked_report() {
        let matrix: InMemoryMatrix = seeded_matrix().await;
        let report: Vec<FullyBookedDate> = fully_booked_dates(
            &matrix,
            &cfg(),
            date!(2026 - 02 - 20),
            date!(2026 - 02 - 26),
        )
        .await
        .unwrap();

        assert_eq!(report.len(), 1);
        let sunday: &FullyBookedDate = &report[0];
        assert_eq!(sunday.date, date!(2026 - 02 - 22));
        assert_eq!(sunday.booked_djs, vec![DjIdentity::Henry, DjIdentity::Paul]);
        assert_eq!(sunday.backup_djs, vec![DjIdentity::Woody]);
        assert!(sunday.available_for_booking.is_empty());
    }

    #[tokio::test]
    async fn test_dj_range_buckets() {
        let matrix: InMemoryMatrix = seeded_matrix().await;
        let report: DjRangeReport = dj_range_query(
            &matrix,
            None,
            &cfg(),
            DjIdentity::Henry,
            date!(2026 - 02 - 20),
            date!(2026 - 02 - 26),
        )
        .await
        .unwrap();

        assert_eq!(report.available, vec![date!(2026 - 02 - 21)]);
        assert_eq!(report.booked.len(), 1);
        assert_eq!(report.booked[0].date, date!(2026 - 02 - 22));
        assert!(report.backup.is_empty());
    }

    #[tokio::test]
    async fn test_dj_range_stefano_blank_is_maybe() {
        let matrix: InMemoryMatrix = InMemoryMatrix::new();
        matrix.add_worksheet(2026).await;
        matrix
            .seed_cell(
                2026,
                date!(2026 - 02 - 21),
                MatrixColumn::Dj(DjIdentity::Stefano),
                "",
            )
            .await;

        let report: DjRangeReport = dj_range_query(
            &matrix,
            None,
            &cfg(),
            DjIdentity::Stefano,
            date!(2026 - 02 - 20),
            date!(2026 - 02 - 22),
        )
        .await
        .unwrap();

        assert_eq!(report.maybe, vec![date!(2026 - 02 - 21)]);
        assert!(report.available.is_empty());
    }

    #[tokio::test]
    async fn test_missing_worksheet_errors() {
        let matrix: InMemoryMatrix = InMemoryMatrix::new();
        let result = scan_range(
            &matrix,
            &cfg(),
            date!(2026 - 02 - 20),
            date!(2026 - 02 - 26),
            DayFilter::Any,
            None,
        )
        .await;

        assert_eq!(
            result,
            Err(CoreError::WorksheetNotFound { year: 2026 })
        );
    }
}
