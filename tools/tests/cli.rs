//! Exit behaviour of the stage-fixture binary.

use std::path::Path;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stage-fixture"))
        .args(args)
        .output()
        .expect("failed to launch stage-fixture")
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn malformed_date_exits_2_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("x.csv");
    let result = run(&["-d", "2024-13-40", "-o", arg(&out), "--seed", "1"]);

    assert_eq!(result.status.code(), Some(2));
    assert!(!result.stderr.is_empty(), "error should go to stderr");
    assert!(!out.exists());
}

#[test]
fn zero_records_exits_2_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("x.csv");
    let result = run(&["-n", "0", "-o", arg(&out), "--seed", "1"]);

    assert_eq!(result.status.code(), Some(2));
    assert!(!result.stderr.is_empty(), "error should go to stderr");
    assert!(!out.exists());
}

#[test]
fn seeded_run_writes_the_batch_and_reports_it() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("fixtures.csv");
    let result = run(&["-n", "25", "-d", "2024-02-29", "-o", arg(&out), "--seed", "7"]);

    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Saved 25 records"), "{stdout}");

    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 26);
    assert!(text.lines().skip(1).all(|l| l.contains(",2024-02-29,")));
}
