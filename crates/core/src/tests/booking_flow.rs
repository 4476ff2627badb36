// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end booking runs against the in-memory adapters.

use crate::adapters::MatrixAdapter;
use crate::error::SourceKind;
use crate::memory::{InMemoryCalendar, InMemoryMatrix, ScriptedOperator};
use crate::protocol::{
    BackupOutcome, HaltReason, ProtocolOutcome, ProtocolResult, submit_booking,
};
use gigsync_domain::{BookingRecord, DjIdentity, MatrixColumn};
use gigsync_journal::{WarningNote, WriteAction};
use time::Date;
use time::macros::date;

const SATURDAY: Date = date!(2026 - 02 - 21);

fn booking(assigned: Option<DjIdentity>) -> BookingRecord {
    BookingRecord {
        date: SATURDAY,
        assigned_dj: assigned,
        secondary_dj: None,
        client: "Catherine MacDougall and Jacob Asmuth".to_owned(),
        venue: "Thomas Fogarty Winery".to_owned(),
        venue_street: "19501 Skyline Blvd".to_owned(),
        venue_city_state_zip: "Woodside, CA 94062".to_owned(),
        setup_time: "4:00".to_owned(),
        clear_time: "10:00".to_owned(),
        sound_setup: "Standard".to_owned(),
        ceremony_sound: false,
        planner: false,
    }
}

async fn fresh_matrix() -> InMemoryMatrix {
    let matrix: InMemoryMatrix = InMemoryMatrix::new();
    matrix.add_worksheet(2026).await;
    matrix
        .seed_cell(2026, SATURDAY, MatrixColumn::Dj(DjIdentity::Paul), "")
        .await;
    matrix
}

#[tokio::test]
async fn test_assigned_booking_full_run() {
    let matrix: InMemoryMatrix = fresh_matrix().await;
    let calendar: InMemoryCalendar = InMemoryCalendar::new();
    let operator: ScriptedOperator = ScriptedOperator::new(true, Some(DjIdentity::Woody));

    let result: ProtocolResult =
        submit_booking(&booking(Some(DjIdentity::Paul)), &matrix, &calendar, &operator)
            .await
            .unwrap();

    assert_eq!(result.outcome, ProtocolOutcome::Completed);
    assert_eq!(result.backup, BackupOutcome::Assigned(DjIdentity::Woody));

    let writes: Vec<(Date, MatrixColumn, String)> = matrix.writes().await;
    assert_eq!(
        writes,
        vec![
            (
                SATURDAY,
                MatrixColumn::Dj(DjIdentity::Paul),
                "BOOKED".to_owned()
            ),
            (
                SATURDAY,
                MatrixColumn::Dj(DjIdentity::Woody),
                "BACKUP".to_owned()
            ),
        ]
    );

    let timed = calendar.timed_events_created().await;
    assert_eq!(timed.len(), 1);
    assert_eq!(timed[0].title, "[PB] Catherine and Jacob");
    assert!(timed[0].start_datetime.contains("14:30"));
    assert!(timed[0].end_datetime.contains("23:00"));
    assert_eq!(
        timed[0].location,
        "Thomas Fogarty Winery, 19501 Skyline Blvd, Woodside, CA 94062"
    );
    assert_eq!(timed[0].invitee.as_deref(), Some("paul@bigfundj.com"));

    let all_day = calendar.all_day_events_created().await;
    assert_eq!(all_day.len(), 1);
    assert_eq!(all_day[0].title, "[WM] BACKUP DJ");
    assert_eq!(result.transcript.calendar_write_count(), 2);
}

#[tokio::test]
async fn test_unassigned_booking_goes_to_tba() {
    let matrix: InMemoryMatrix = fresh_matrix().await;
    matrix
        .seed_cell(2026, SATURDAY, MatrixColumn::Tba, "BOOKED")
        .await;
    let calendar: InMemoryCalendar = InMemoryCalendar::new();
    let operator: ScriptedOperator = ScriptedOperator::new(true, None);

    let result: ProtocolResult = submit_booking(&booking(None), &matrix, &calendar, &operator)
        .await
        .unwrap();

    assert_eq!(result.outcome, ProtocolOutcome::Completed);
    assert_eq!(result.backup, BackupOutcome::NotApplicable);
    assert_eq!(
        matrix.writes().await,
        vec![(SATURDAY, MatrixColumn::Tba, "BOOKED x 2".to_owned())]
    );

    let timed = calendar.timed_events_created().await;
    assert_eq!(timed.len(), 1);
    assert_eq!(timed[0].title, "[UP] Catherine and Jacob");
    assert!(calendar.all_day_events_created().await.is_empty());
}

#[tokio::test]
async fn test_mismatch_halts_with_zero_writes() {
    let matrix: InMemoryMatrix = fresh_matrix().await;
    matrix
        .seed_cell(2026, SATURDAY, MatrixColumn::Dj(DjIdentity::Paul), "BOOKED")
        .await;
    // Calendar has no matching event, so the sources disagree.
    let calendar: InMemoryCalendar = InMemoryCalendar::new();
    let operator: ScriptedOperator = ScriptedOperator::new(true, None);

    let result: ProtocolResult =
        submit_booking(&booking(Some(DjIdentity::Paul)), &matrix, &calendar, &operator)
            .await
            .unwrap();

    assert_eq!(
        result.outcome,
        ProtocolOutcome::Halted(HaltReason::ValidationMismatch {
            dj: DjIdentity::Paul,
            matrix_count: 1,
            calendar_count: 0,
        })
    );
    assert!(result.transcript.is_side_effect_free());
    assert!(matrix.writes().await.is_empty());
    assert!(calendar.timed_events_created().await.is_empty());
}

#[tokio::test]
async fn test_halt_never_creates_the_row() {
    let matrix: InMemoryMatrix = InMemoryMatrix::new();
    matrix.add_worksheet(2026).await;
    let calendar: InMemoryCalendar = InMemoryCalendar::new();
    // Calendar shows a booking the (absent) matrix row does not.
    calendar.seed_event(SATURDAY, "[PB] Alice and Bob").await;
    let operator: ScriptedOperator = ScriptedOperator::new(true, None);

    let result: ProtocolResult =
        submit_booking(&booking(Some(DjIdentity::Paul)), &matrix, &calendar, &operator)
            .await
            .unwrap();

    assert!(matches!(
        result.outcome,
        ProtocolOutcome::Halted(HaltReason::ValidationMismatch { .. })
    ));
    assert!(matrix.writes().await.is_empty());
    // The row is only created once validation passes.
    assert!(
        matrix
            .read_row(2026, SATURDAY)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_stacked_booking_needs_operator_approval() {
    let matrix: InMemoryMatrix = fresh_matrix().await;
    matrix
        .seed_cell(2026, SATURDAY, MatrixColumn::Dj(DjIdentity::Paul), "BOOKED")
        .await;
    let calendar: InMemoryCalendar = InMemoryCalendar::new();
    calendar.seed_event(SATURDAY, "[PB] Alice and Bob").await;
    let operator: ScriptedOperator = ScriptedOperator::new(false, None);

    let result: ProtocolResult =
        submit_booking(&booking(Some(DjIdentity::Paul)), &matrix, &calendar, &operator)
            .await
            .unwrap();

    assert_eq!(
        result.outcome,
        ProtocolOutcome::Halted(HaltReason::OperatorDeclined {
            dj: DjIdentity::Paul
        })
    );
    assert!(matrix.writes().await.is_empty());
    assert_eq!(
        operator.prompts_seen().await,
        vec!["confirm_additional:Paul:1".to_owned()]
    );
}

#[tokio::test]
async fn test_approved_stacked_booking_increments_cell() {
    let matrix: InMemoryMatrix = fresh_matrix().await;
    matrix
        .seed_cell(2026, SATURDAY, MatrixColumn::Dj(DjIdentity::Paul), "BOOKED")
        .await;
    let calendar: InMemoryCalendar = InMemoryCalendar::new();
    calendar.seed_event(SATURDAY, "[PB] Alice and Bob").await;
    let operator: ScriptedOperator = ScriptedOperator::new(true, None);

    let result: ProtocolResult =
        submit_booking(&booking(Some(DjIdentity::Paul)), &matrix, &calendar, &operator)
            .await
            .unwrap();

    assert_eq!(result.outcome, ProtocolOutcome::Completed);
    assert_eq!(
        matrix.writes().await,
        vec![(
            SATURDAY,
            MatrixColumn::Dj(DjIdentity::Paul),
            "BOOKED x 2".to_owned()
        )]
    );
}

#[tokio::test]
async fn test_out_cell_is_overwritten_with_booked() {
    let matrix: InMemoryMatrix = fresh_matrix().await;
    matrix
        .seed_cell(2026, SATURDAY, MatrixColumn::Dj(DjIdentity::Paul), "OUT")
        .await;
    let calendar: InMemoryCalendar = InMemoryCalendar::new();
    let operator: ScriptedOperator = ScriptedOperator::new(true, None);

    let result: ProtocolResult =
        submit_booking(&booking(Some(DjIdentity::Paul)), &matrix, &calendar, &operator)
            .await
            .unwrap();

    // Non-booked text counts as zero bookings, so validation passes
    // and the write replaces the cell instead of leaving it as-is.
    assert_eq!(result.outcome, ProtocolOutcome::Completed);
    assert_eq!(
        matrix.writes().await,
        vec![(
            SATURDAY,
            MatrixColumn::Dj(DjIdentity::Paul),
            "BOOKED".to_owned()
        )]
    );
    assert_eq!(calendar.timed_events_created().await.len(), 1);
}

#[tokio::test]
async fn test_unreadable_candidate_cell_warns_and_is_skipped() {
    let matrix: InMemoryMatrix = fresh_matrix().await;
    matrix
        .seed_cell(
            2026,
            SATURDAY,
            MatrixColumn::Dj(DjIdentity::Henry),
            "sabbatical",
        )
        .await;
    let calendar: InMemoryCalendar = InMemoryCalendar::new();
    let operator: ScriptedOperator = ScriptedOperator::new(true, None);

    let result: ProtocolResult =
        submit_booking(&booking(Some(DjIdentity::Paul)), &matrix, &calendar, &operator)
            .await
            .unwrap();

    assert_eq!(result.outcome, ProtocolOutcome::Completed);
    assert_eq!(result.backup, BackupOutcome::Skipped);
    assert!(result.transcript.warnings.contains(
        &WarningNote::UnknownCellValue {
            dj: DjIdentity::Henry,
            raw: "sabbatical".to_owned(),
        }
    ));
}

#[tokio::test]
async fn test_backup_conflict_leaves_primary_intact() {
    let matrix: InMemoryMatrix = fresh_matrix().await;
    let calendar: InMemoryCalendar = InMemoryCalendar::new();
    // Woody already has something on the calendar that day.
    calendar.seed_event(SATURDAY, "[WM] Corporate party").await;
    let operator: ScriptedOperator = ScriptedOperator::new(true, Some(DjIdentity::Woody));

    let result: ProtocolResult =
        submit_booking(&booking(Some(DjIdentity::Paul)), &matrix, &calendar, &operator)
            .await
            .unwrap();

    assert_eq!(result.outcome, ProtocolOutcome::Completed);
    assert_eq!(
        result.backup,
        BackupOutcome::ConflictDetected {
            dj: DjIdentity::Woody,
            conflicts: vec!["[WM] Corporate party".to_owned()],
        }
    );
    // Only the primary booking reached the matrix.
    assert_eq!(matrix.writes().await.len(), 1);
    assert!(result.transcript.warnings.iter().any(|w| matches!(
        w,
        WarningNote::BackupConflict { dj: DjIdentity::Woody, .. }
    )));
    assert!(calendar.all_day_events_created().await.is_empty());
}

#[tokio::test]
async fn test_existing_backup_short_circuits_assessment() {
    let matrix: InMemoryMatrix = fresh_matrix().await;
    matrix
        .seed_cell(2026, SATURDAY, MatrixColumn::Dj(DjIdentity::Henry), "BACKUP")
        .await;
    let calendar: InMemoryCalendar = InMemoryCalendar::new();
    let operator: ScriptedOperator = ScriptedOperator::new(true, Some(DjIdentity::Woody));

    let result: ProtocolResult =
        submit_booking(&booking(Some(DjIdentity::Paul)), &matrix, &calendar, &operator)
            .await
            .unwrap();

    assert_eq!(
        result.backup,
        BackupOutcome::AlreadyAssigned(DjIdentity::Henry)
    );
    // No backup prompt was shown.
    assert!(operator.prompts_seen().await.is_empty());
}

#[tokio::test]
async fn test_calendar_failure_after_matrix_write_warns() {
    let matrix: InMemoryMatrix = fresh_matrix().await;
    let calendar: InMemoryCalendar = InMemoryCalendar::new();
    calendar.fail_writes("service unavailable").await;
    let operator: ScriptedOperator = ScriptedOperator::new(true, None);

    let result: ProtocolResult =
        submit_booking(&booking(Some(DjIdentity::Paul)), &matrix, &calendar, &operator)
            .await
            .unwrap();

    // The run still completes; the inconsistency is recorded instead.
    assert_eq!(result.outcome, ProtocolOutcome::Completed);
    assert_eq!(matrix.writes().await.len(), 1);
    assert!(result.transcript.warnings.iter().any(|w| matches!(
        w,
        WarningNote::CalendarInconsistency { date, .. } if *date == SATURDAY
    )));
    assert!(calendar.timed_events_created().await.is_empty());
}

#[tokio::test]
async fn test_missing_worksheet_halts_as_source_failure() {
    let matrix: InMemoryMatrix = InMemoryMatrix::new();
    let calendar: InMemoryCalendar = InMemoryCalendar::new();
    let operator: ScriptedOperator = ScriptedOperator::new(true, None);

    let result: ProtocolResult =
        submit_booking(&booking(Some(DjIdentity::Paul)), &matrix, &calendar, &operator)
            .await
            .unwrap();

    assert!(matches!(
        result.outcome,
        ProtocolOutcome::Halted(HaltReason::SourceFailure {
            source: SourceKind::Matrix,
            ..
        })
    ));
    assert!(result.transcript.is_side_effect_free());
}

#[tokio::test]
async fn test_new_row_created_after_validation_passes() {
    let matrix: InMemoryMatrix = InMemoryMatrix::new();
    matrix.add_worksheet(2026).await;
    let calendar: InMemoryCalendar = InMemoryCalendar::new();
    let operator: ScriptedOperator = ScriptedOperator::new(true, None);

    let result: ProtocolResult =
        submit_booking(&booking(Some(DjIdentity::Paul)), &matrix, &calendar, &operator)
            .await
            .unwrap();

    assert_eq!(result.outcome, ProtocolOutcome::Completed);
    assert!(
        result
            .transcript
            .actions
            .iter()
            .any(|a| matches!(a, WriteAction::MatrixRowCreated { date } if *date == SATURDAY))
    );
    assert!(matrix.read_row(2026, SATURDAY).await.unwrap().is_some());
}
