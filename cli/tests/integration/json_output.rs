//! JSON output integration tests for bcopy CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, patterned};
use serde_json::Value;

fn run_json(args: &[&std::ffi::OsStr]) -> (Option<i32>, Value) {
    let mut cmd = cargo_bin_cmd!("bcopy");
    let output = cmd.arg("--output").arg("json").args(args).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let line = stdout.lines().last().unwrap_or_default();
    (output.status.code(), serde_json::from_str(line).unwrap())
}

#[test]
fn test_json_copied_with_verification() {
    let fx = TestFixture::new();
    let src = fx.source_file("data.bin", &patterned(9000));
    let dst = fx.dst.path().join("data.bin");

    let (code, value) = run_json(&["--verify".as_ref(), src.as_os_str(), dst.as_os_str()]);

    assert_eq!(code, Some(0));
    assert_eq!(value["schema_version"], "1.0");
    assert_eq!(value["outcome"], "copied");
    assert_eq!(value["bytes_copied"], 9000);
    assert_eq!(value["verification"]["identical"], true);
    assert_eq!(value["verification"]["mismatch_kind"], "none");
    assert!(value["verification"]["mismatch_offset"].is_null());
}

#[test]
fn test_json_stdout_has_no_progress_line() {
    let fx = TestFixture::new();
    let src = fx.source_file("data.bin", &patterned(9000));
    let dst = fx.dst.path().join("data.bin");

    let mut cmd = cargo_bin_cmd!("bcopy");
    let output = cmd
        .args(["--output", "json"])
        .arg(&src)
        .arg(&dst)
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(!stdout.contains("Copied:"));
    assert_eq!(stdout.lines().count(), 1);
}

#[test]
fn test_json_skipped_mismatch() {
    let fx = TestFixture::new();
    let src = fx.source_file("data.txt", b"abcdef");
    let dst = fx.existing_destination("data.txt", b"abcxef");

    let (code, value) = run_json(&[
        "-n".as_ref(),
        "-v".as_ref(),
        src.as_os_str(),
        dst.as_os_str(),
    ]);

    assert_eq!(code, Some(3));
    assert_eq!(value["outcome"], "skipped");
    assert!(value.get("bytes_copied").is_none());
    assert_eq!(value["verification"]["identical"], false);
    assert_eq!(value["verification"]["mismatch_kind"], "content");
    assert_eq!(value["verification"]["mismatch_offset"], 3);
}

#[test]
fn test_json_failure_record() {
    let fx = TestFixture::new();
    let missing = fx.src.path().join("missing.bin");
    let dst = fx.dst.path().join("out.bin");

    let (code, value) = run_json(&[missing.as_os_str(), dst.as_os_str()]);

    assert_eq!(code, Some(1));
    assert_eq!(value["outcome"], "failed");
    assert_eq!(value["error_code"], "source_not_found");
}
