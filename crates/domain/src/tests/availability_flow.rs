// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cross-module flows: raw sheet text through interpretation, the rule
//! engine, and the row analyzer.

use crate::{
    AvailabilitySummary, DateRow, DjIdentity, MatrixColumn, YearConfiguration, analyze,
    format_sheet_date, parse_matrix_date,
};
use time::Date;

fn config() -> YearConfiguration {
    YearConfiguration::for_year(2026).unwrap()
}

fn saturday() -> Date {
    parse_matrix_date("2/21", 2026).unwrap()
}

#[test]
fn typical_saturday_row_from_sheet_text() {
    // Henry booked, Woody covering backup, Paul open, Stefano silent,
    // Felipe opted out, one unassigned booking pending.
    let row: DateRow = DateRow::from_raw(
        saturday(),
        vec![
            (MatrixColumn::Dj(DjIdentity::Henry), "BOOKED"),
            (MatrixColumn::Dj(DjIdentity::Woody), "BACKUP"),
            (MatrixColumn::Dj(DjIdentity::Paul), ""),
            (MatrixColumn::Dj(DjIdentity::Stefano), ""),
            (MatrixColumn::Dj(DjIdentity::Felipe), "OUT"),
            (MatrixColumn::Tba, "BOOKED"),
        ],
    );

    let summary: AvailabilitySummary = analyze(&row, &config());
    assert_eq!(summary.booked_count, 2);
    assert_eq!(summary.backup_count, 1);
    assert_eq!(summary.tba_count, 1);
    assert_eq!(summary.booked_djs, vec![DjIdentity::Henry]);
    assert_eq!(summary.backup_djs, vec![DjIdentity::Woody]);
    // Paul is the only open primary, and the pending TBA booking
    // consumes his spot.
    assert_eq!(summary.available_for_booking, vec![DjIdentity::Paul]);
    assert_eq!(summary.available_spots, 0);
    assert_eq!(summary.uncertain_djs, vec![DjIdentity::Stefano]);
}

#[test]
fn bold_annotation_flows_through_to_the_rules() {
    let plain: DateRow = DateRow::from_raw(
        saturday(),
        vec![(MatrixColumn::Dj(DjIdentity::Woody), "OUT")],
    );
    let bold: DateRow = DateRow::from_raw(
        saturday(),
        vec![(MatrixColumn::Dj(DjIdentity::Woody), "OUT (bold)")],
    );

    let plain_summary: AvailabilitySummary = analyze(&plain, &config());
    let bold_summary: AvailabilitySummary = analyze(&bold, &config());
    assert!(plain_summary.available_for_backup.contains(&DjIdentity::Woody));
    assert!(!bold_summary.available_for_backup.contains(&DjIdentity::Woody));
}

#[test]
fn sheet_date_round_trip() {
    let date: Date = parse_matrix_date("2026-02-21", 2026).unwrap();
    assert_eq!(format_sheet_date(date), "Sat 2/21");
}
