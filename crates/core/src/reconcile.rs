// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Three-way reconciliation between the gig database, the matrix, and
//! the calendar.
//!
//! Reconciliation compares fully fetched snapshots only; it never reads
//! live sources mid-comparison and never resolves drift itself. The
//! output is advisory, in chronological order, with in-sync dates
//! excluded.

use gigsync_domain::{CellStatus, DateRow, DjIdentity, MatrixColumn, YearConfiguration};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use time::Date;

/// One assignment slot on a date: a named DJ or a pending TBA booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assignee {
    Dj(DjIdentity),
    Tba,
}

/// Assignment sets per date, as observed in one source.
pub type AssignmentsByDate = BTreeMap<Date, BTreeSet<Assignee>>;

/// How a date's sources disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftKind {
    /// The gig database has the booking but the matrix does not.
    MissingFromMatrix,
    /// The matrix shows a booking the gig database does not have.
    MissingFromGigDb,
    /// The gig database and matrix agree but the calendar has nothing.
    MissingFromCalendar,
    /// The sources name different DJs.
    DjMismatch,
}

/// One date where the sources disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscrepancyReport {
    pub date: Date,
    pub kind: DriftKind,
    pub gig: BTreeSet<Assignee>,
    pub matrix: BTreeSet<Assignee>,
    /// `None` when no calendar snapshot was supplied.
    pub calendar: Option<BTreeSet<Assignee>>,
}

/// A date where the matrix and calendar disagree about backups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupDiscrepancy {
    pub date: Date,
    pub matrix: BTreeSet<DjIdentity>,
    pub calendar: BTreeSet<DjIdentity>,
}

/// Derives a matrix assignment snapshot from fetched rows.
///
/// Booked DJ cells contribute their DJ; a TBA cell holding bookings
/// contributes one TBA placeholder; Reserved holds are excluded.
#[must_use]
pub fn matrix_snapshot(rows: &[DateRow], config: &YearConfiguration) -> AssignmentsByDate {
    let mut snapshot: AssignmentsByDate = BTreeMap::new();
    for row in rows {
        let mut assignees: BTreeSet<Assignee> = BTreeSet::new();
        for dj in config.djs() {
            if row.cell(MatrixColumn::Dj(dj)).status.is_booked() {
                assignees.insert(Assignee::Dj(dj));
            }
        }
        let tba_raw: String = row.cell(MatrixColumn::Tba).raw;
        if gigsync_domain::count_tba_booked(&tba_raw) > 0 {
            assignees.insert(Assignee::Tba);
        }
        if !assignees.is_empty() {
            snapshot.insert(row.date, assignees);
        }
    }
    snapshot
}

/// Derives a matrix backup snapshot from fetched rows.
#[must_use]
pub fn backup_snapshot(
    rows: &[DateRow],
    config: &YearConfiguration,
) -> BTreeMap<Date, BTreeSet<DjIdentity>> {
    let mut snapshot: BTreeMap<Date, BTreeSet<DjIdentity>> = BTreeMap::new();
    for row in rows {
        let backups: BTreeSet<DjIdentity> = config
            .djs()
            .filter(|dj| row.cell(MatrixColumn::Dj(*dj)).status == CellStatus::Backup)
            .collect();
        if !backups.is_empty() {
            snapshot.insert(row.date, backups);
        }
    }
    snapshot
}

/// Compares the three sources date by date.
///
/// Classification is first-match-wins: in-sync dates are excluded,
/// then missing-from-matrix, missing-from-gig-db, missing-from-calendar,
/// and everything else is a DJ mismatch.
#[must_use]
pub fn reconcile(
    gig: &AssignmentsByDate,
    matrix: &AssignmentsByDate,
    calendar: Option<&AssignmentsByDate>,
) -> Vec<DiscrepancyReport> {
    let mut dates: BTreeSet<Date> = BTreeSet::new();
    dates.extend(gig.keys().copied());
    dates.extend(matrix.keys().copied());
    if let Some(calendar) = calendar {
        dates.extend(calendar.keys().copied());
    }

    let empty: BTreeSet<Assignee> = BTreeSet::new();
    let mut reports: Vec<DiscrepancyReport> = Vec::new();
    for date in dates {
        let gig_set: &BTreeSet<Assignee> = gig.get(&date).unwrap_or(&empty);
        let matrix_set: &BTreeSet<Assignee> = matrix.get(&date).unwrap_or(&empty);
        let calendar_set: Option<&BTreeSet<Assignee>> =
            calendar.map(|c| c.get(&date).unwrap_or(&empty));

        let in_sync: bool = gig_set == matrix_set
            && calendar_set.is_none_or(|c| c == gig_set);
        if in_sync {
            continue;
        }

        let kind: DriftKind = if !gig_set.is_empty()
            && matrix_set.is_empty()
            && calendar_set.is_none_or(|c| c == gig_set)
        {
            DriftKind::MissingFromMatrix
        } else if !matrix_set.is_empty() && gig_set.is_empty() {
            DriftKind::MissingFromGigDb
        } else if !gig_set.is_empty()
            && calendar_set.is_some_and(BTreeSet::is_empty)
            && matrix_set == gig_set
        {
            DriftKind::MissingFromCalendar
        } else {
            DriftKind::DjMismatch
        };

        reports.push(DiscrepancyReport {
            date,
            kind,
            gig: gig_set.clone(),
            matrix: matrix_set.clone(),
            calendar: calendar_set.cloned(),
        });
    }
    reports
}

/// Compares matrix backup assignments against calendar backup events by
/// set equality per date.
#[must_use]
pub fn reconcile_backups(
    matrix: &BTreeMap<Date, BTreeSet<DjIdentity>>,
    calendar: &BTreeMap<Date, BTreeSet<DjIdentity>>,
) -> Vec<BackupDiscrepancy> {
    let mut dates: BTreeSet<Date> = BTreeSet::new();
    dates.extend(matrix.keys().copied());
    dates.extend(calendar.keys().copied());

    let empty: BTreeSet<DjIdentity> = BTreeSet::new();
    dates
        .into_iter()
        .filter_map(|date| {
            let matrix_set: &BTreeSet<DjIdentity> = matrix.get(&date).unwrap_or(&empty);
            let calendar_set: &BTreeSet<DjIdentity> = calendar.get(&date).unwrap_or(&empty);
            (matrix_set != calendar_set).then(|| BackupDiscrepancy {
                date,
                matrix: matrix_set.clone(),
                calendar: calendar_set.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::date;

    fn set(assignees: &[Assignee]) -> BTreeSet<Assignee> {
        assignees.iter().copied().collect()
    }

    fn by_date(entries: &[(Date, &[Assignee])]) -> AssignmentsByDate {
        entries
            .iter()
            .map(|(date, assignees)| (*date, set(assignees)))
            .collect()
    }

    const D1: Date = date!(2026 - 02 - 21);
    const D2: Date = date!(2026 - 02 - 28);

    #[test]
    fn test_identical_sets_produce_empty_report() {
        let gig: AssignmentsByDate = by_date(&[(D1, &[Assignee::Dj(DjIdentity::Paul)])]);
        let matrix: AssignmentsByDate = gig.clone();
        let calendar: AssignmentsByDate = gig.clone();

        assert!(reconcile(&gig, &matrix, Some(&calendar)).is_empty());
        assert!(reconcile(&gig, &matrix, None).is_empty());
    }

    #[test]
    fn test_missing_from_matrix() {
        let gig: AssignmentsByDate = by_date(&[(D1, &[Assignee::Dj(DjIdentity::Paul)])]);
        let matrix: AssignmentsByDate = AssignmentsByDate::new();
        let calendar: AssignmentsByDate = gig.clone();

        let reports = reconcile(&gig, &matrix, Some(&calendar));
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].kind, DriftKind::MissingFromMatrix);
        assert_eq!(reports[0].date, D1);
    }

    #[test]
    fn test_missing_from_matrix_without_calendar_source() {
        let gig: AssignmentsByDate = by_date(&[(D1, &[Assignee::Tba])]);
        let matrix: AssignmentsByDate = AssignmentsByDate::new();

        let reports = reconcile(&gig, &matrix, None);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].kind, DriftKind::MissingFromMatrix);
        assert_eq!(reports[0].calendar, None);
    }

    #[test]
    fn test_missing_from_gig_db() {
        let gig: AssignmentsByDate = AssignmentsByDate::new();
        let matrix: AssignmentsByDate = by_date(&[(D1, &[Assignee::Dj(DjIdentity::Woody)])]);

        let reports = reconcile(&gig, &matrix, None);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].kind, DriftKind::MissingFromGigDb);
    }

    #[test]
    fn test_missing_from_calendar() {
        let gig: AssignmentsByDate = by_date(&[(D1, &[Assignee::Dj(DjIdentity::Paul)])]);
        let matrix: AssignmentsByDate = gig.clone();
        let calendar: AssignmentsByDate = AssignmentsByDate::new();

        let reports = reconcile(&gig, &matrix, Some(&calendar));
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].kind, DriftKind::MissingFromCalendar);
    }

    #[test]
    fn test_dj_mismatch() {
        let gig: AssignmentsByDate = by_date(&[(D1, &[Assignee::Dj(DjIdentity::Paul)])]);
        let matrix: AssignmentsByDate = by_date(&[(D1, &[Assignee::Dj(DjIdentity::Woody)])]);

        let reports = reconcile(&gig, &matrix, None);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].kind, DriftKind::DjMismatch);
    }

    #[test]
    fn test_mismatched_calendar_beats_missing_from_matrix() {
        // Gig and calendar disagree, so even with an empty matrix this
        // is a mismatch, not a missing-from-matrix.
        let gig: AssignmentsByDate = by_date(&[(D1, &[Assignee::Dj(DjIdentity::Paul)])]);
        let matrix: AssignmentsByDate = AssignmentsByDate::new();
        let calendar: AssignmentsByDate =
            by_date(&[(D1, &[Assignee::Dj(DjIdentity::Woody)])]);

        let reports = reconcile(&gig, &matrix, Some(&calendar));
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].kind, DriftKind::DjMismatch);
    }

    #[test]
    fn test_reports_in_chronological_order() {
        let gig: AssignmentsByDate = by_date(&[
            (D2, &[Assignee::Dj(DjIdentity::Paul)]),
            (D1, &[Assignee::Dj(DjIdentity::Henry)]),
        ]);
        let matrix: AssignmentsByDate = AssignmentsByDate::new();

        let reports = reconcile(&gig, &matrix, None);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].date, D1);
        assert_eq!(reports[1].date, D2);
    }

    #[test]
    fn test_matrix_snapshot_excludes_reserved() {
        let config = YearConfiguration::for_year(2027).unwrap();
        let row: DateRow = DateRow::from_raw(
            date!(2027 - 03 - 06),
            vec![
                (MatrixColumn::Dj(DjIdentity::Paul), "BOOKED"),
                (MatrixColumn::Dj(DjIdentity::Stephanie), "RESERVED"),
                (MatrixColumn::Tba, "BOOKED, AAG"),
            ],
        );

        let snapshot: AssignmentsByDate = matrix_snapshot(&[row], &config);
        let assignees = snapshot.get(&date!(2027 - 03 - 06)).unwrap();
        assert!(assignees.contains(&Assignee::Dj(DjIdentity::Paul)));
        assert!(assignees.contains(&Assignee::Tba));
        assert!(!assignees.contains(&Assignee::Dj(DjIdentity::Stephanie)));
    }

    #[test]
    fn test_matrix_snapshot_aag_only_tba_is_not_a_booking() {
        let config = YearConfiguration::for_year(2026).unwrap();
        let row: DateRow =
            DateRow::from_raw(D1, vec![(MatrixColumn::Tba, "AAG")]);

        assert!(matrix_snapshot(&[row], &config).is_empty());
    }

    #[test]
    fn test_backup_reconciliation_is_set_equality() {
        let mut matrix: BTreeMap<Date, BTreeSet<DjIdentity>> = BTreeMap::new();
        matrix.insert(D1, [DjIdentity::Woody].into_iter().collect());
        let mut calendar: BTreeMap<Date, BTreeSet<DjIdentity>> = BTreeMap::new();
        calendar.insert(D1, [DjIdentity::Woody].into_iter().collect());

        assert!(reconcile_backups(&matrix, &calendar).is_empty());

        calendar.insert(D1, [DjIdentity::Henry].into_iter().collect());
        let drift = reconcile_backups(&matrix, &calendar);
        assert_eq!(drift.len(), 1);
        assert_eq!(drift[0].date, D1);
    }
}
