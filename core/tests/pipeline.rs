//! End-to-end runs: resolve date, generate, analyze, write.

use chrono::NaiveDate;
use stage_fixture_core::{
    csv_io::read_records,
    error::FixtureError,
    pipeline::{FixtureRun, RunRequest},
    stage::StageCode,
};
use std::path::Path;

fn request(output: &Path, count: usize, date: Option<&str>) -> RunRequest {
    RunRequest {
        count,
        output: output.to_path_buf(),
        date_override: date.map(str::to_string),
        today: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
        seed: 0xFEED_BEEF_1234_ABCD,
    }
}

#[test]
fn full_run_writes_what_it_analyzed() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("run.csv");

    let outcome = FixtureRun::default().execute(&request(&out, 1_000, None)).unwrap();

    assert_eq!(outcome.month_end_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    assert_eq!(outcome.report.total, 1_000);
    let total: usize = StageCode::ALL.into_iter().map(|s| outcome.report.stage_count(s)).sum();
    assert_eq!(total, 1_000);

    let written = read_records(&out).unwrap();
    assert_eq!(written, outcome.records);
}

#[test]
fn malformed_date_aborts_before_any_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.csv");

    let err = FixtureRun::default()
        .execute(&request(&out, 100, Some("2024-13-40")))
        .unwrap_err();

    assert!(matches!(err, FixtureError::InvalidDate { .. }), "{err}");
    assert!(!out.exists());
}

#[test]
fn zero_records_is_rejected_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.csv");
    let err = FixtureRun::default().execute(&request(&out, 0, None)).unwrap_err();
    assert!(matches!(err, FixtureError::InvalidRecordCount { count: 0 }), "{err}");
    assert!(!out.exists());
}

#[test]
fn same_request_same_output() {
    let dir = tempfile::tempdir().unwrap();
    let run = FixtureRun::default();
    let a = run.execute(&request(&dir.path().join("a.csv"), 200, Some("2025-04-30"))).unwrap();
    let b = run.execute(&request(&dir.path().join("b.csv"), 200, Some("2025-04-30"))).unwrap();
    assert_eq!(a.records, b.records);
    assert_eq!(
        std::fs::read(dir.path().join("a.csv")).unwrap(),
        std::fs::read(dir.path().join("b.csv")).unwrap()
    );
}
