//! Integration tests for the aba CLI.
//!
//! These tests run the actual binary against the files in `tests/data`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Run the binary with the given arguments and return stdout
fn run_aba(args: &[&str]) -> String {
    let mut cmd = Command::cargo_bin("aba").unwrap();
    let assert = cmd.args(args).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_decode_payroll() {
    let output = run_aba(&["decode", &test_data_path("payroll.aba")]);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("bsb,account_number,"));
    assert_eq!(
        lines[1],
        "062-000,12345678,,53,1250.00,Paul Smith,Salary Jan,062-001,87654321,EXAMPLE PAYROLL,0.00"
    );
    for (line, title) in lines[1..]
        .iter()
        .zip(["Paul Smith", "John Dickson", "Peter Jackson", "Sacha Belle"])
    {
        assert!(line.contains(title), "{} missing from {}", title, line);
    }
}

#[test]
fn test_decode_drops_invalid_details() {
    let output = run_aba(&["decode", &test_data_path("invalid_details.aba")]);
    let lines: Vec<&str> = output.lines().skip(1).collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Paul Smith"));
    assert!(lines[1].contains("Sacha Belle"));
}

#[test]
fn test_decode_unknown_record_type_fails() {
    let mut cmd = Command::cargo_bin("aba").unwrap();
    cmd.args(["decode", &test_data_path("unknown_type.aba")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected record type"));
}

#[test]
fn test_encode_payments() {
    let output = run_aba(&[
        "encode",
        &test_data_path("payments.csv"),
        "MBL",
        "Macquarie Bank LTD",
        "181",
        "WeeklyDebit",
    ]);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|l| l.len() == 120));
    assert!(lines[0].starts_with("0                 01MBL       Macquarie Bank LTD        000181WeeklyDebit "));
    assert_eq!(&lines[2][62..80], "SuperstarHeroBUTTH");
    assert_eq!(
        &lines[4][..80],
        "7999-999            000000000000000020000000002000                        000003"
    );
}

#[test]
fn test_encode_invalid_record_writes_nothing() {
    let mut cmd = Command::cargo_bin("aba").unwrap();
    cmd.args([
        "encode",
        &test_data_path("bad_bsb.csv"),
        "MBL",
        "Macquarie Bank LTD",
        "181",
    ])
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("record 1"));
}

#[test]
fn test_encode_then_decode_file() {
    let dir = tempfile::tempdir().unwrap();
    let aba_path = dir.path().join("payments.aba");

    let encoded = run_aba(&[
        "encode",
        &test_data_path("payments.csv"),
        "MBL",
        "Macquarie Bank LTD",
        "181",
    ]);
    fs::write(&aba_path, encoded).unwrap();

    let decoded = run_aba(&["decode", aba_path.to_str().unwrap()]);
    let lines: Vec<&str> = decoded.lines().skip(1).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("888-123,3424,,50,10.00,DEMO DEMO,"));
    assert!(lines[2].starts_with("182-222,260070750,,13,20.00,Macquarie Account,ABLE,"));
}

#[test]
fn test_missing_arguments() {
    let mut cmd = Command::cargo_bin("aba").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing argument"));

    let mut cmd = Command::cargo_bin("aba").unwrap();
    cmd.args(["encode", &test_data_path("payments.csv"), "MBL"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing argument"));
}
