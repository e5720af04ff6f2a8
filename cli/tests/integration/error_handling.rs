//! Error handling integration tests for bcopy CLI.
//!
//! These tests verify proper error handling behaviors:
//! - A missing source is reported before the destination is touched
//! - A directory at the destination path is never replaced
//! - Open failures and usage errors exit with code 1

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_source_not_found() {
    let fx = TestFixture::new();

    let mut cmd = cargo_bin_cmd!("bcopy");
    cmd.arg("/nonexistent/path/file.txt")
        .arg(fx.dst.path().join("file.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Source file does not exist"))
        .stderr(predicate::str::contains("error[source_not_found]"));

    assert!(!fx.dst.path().join("file.txt").exists());
}

/// A missing source must not truncate an existing destination, even with -y.
#[test]
fn test_source_not_found_leaves_destination() {
    let fx = TestFixture::new();
    let dst = fx.existing_destination("file.txt", b"keep me");

    let mut cmd = cargo_bin_cmd!("bcopy");
    cmd.arg("-y")
        .arg(fx.src.path().join("missing.txt"))
        .arg(&dst)
        .assert()
        .code(1);

    assert_eq!(fs::read_to_string(&dst).unwrap(), "keep me");
}

#[test]
fn test_source_is_directory() {
    let fx = TestFixture::new();

    let mut cmd = cargo_bin_cmd!("bcopy");
    cmd.arg(fx.src.path())
        .arg(fx.dst.path().join("out"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is a directory"));
}

#[test]
fn test_missing_destination_directory() {
    let fx = TestFixture::new();
    let src = fx.source_file("test.txt", b"content");

    let mut cmd = cargo_bin_cmd!("bcopy");
    cmd.arg(&src)
        .arg(fx.dst.path().join("no/such/dir/test.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to open"));

    assert!(!fx.dst.path().join("no").exists());
}

#[test]
fn test_copy_onto_itself_refused() {
    let fx = TestFixture::new();
    let src = fx.source_file("test.txt", b"precious");

    let mut cmd = cargo_bin_cmd!("bcopy");
    cmd.arg("-y")
        .arg(&src)
        .arg(&src)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("same file"));

    assert_eq!(fs::read_to_string(&src).unwrap(), "precious");
}

#[test]
fn test_missing_source_argument_is_usage_error() {
    let mut cmd = cargo_bin_cmd!("bcopy");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_conflicting_flags_rejected() {
    let fx = TestFixture::new();
    let src = fx.source_file("test.txt", b"content");

    let mut cmd = cargo_bin_cmd!("bcopy");
    cmd.args(["-y", "-n"])
        .arg(&src)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_source() {
    use std::os::unix::fs::PermissionsExt;

    let fx = TestFixture::new();
    let src = fx.source_file("secret.txt", b"secret");
    fs::set_permissions(&src, fs::Permissions::from_mode(0o000)).unwrap();

    // Root can read anything
    if fs::read(&src).is_ok() {
        return;
    }

    let mut cmd = cargo_bin_cmd!("bcopy");
    cmd.arg(&src)
        .arg(fx.dst.path().join("secret.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[permission_denied]"));

    fs::set_permissions(&src, fs::Permissions::from_mode(0o644)).unwrap();
}

/// An out-of-range chunk size is rejected before the destination is opened.
#[test]
fn test_oversized_chunk_size_leaves_destination() {
    let fx = TestFixture::new();
    let src = fx.source_file("data.bin", b"new content");
    let dst = fx.existing_destination("data.bin", b"keep me");

    let mut cmd = cargo_bin_cmd!("bcopy");
    cmd.args(["-y", "-q", "--chunk-size", "4000000000000"])
        .arg(&src)
        .arg(&dst)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--chunk-size"));

    assert_eq!(fs::read_to_string(&dst).unwrap(), "keep me");
}

#[test]
fn test_zero_chunk_size_rejected() {
    let fx = TestFixture::new();
    let src = fx.source_file("data.bin", b"content");

    let mut cmd = cargo_bin_cmd!("bcopy");
    cmd.args(["--chunk-size", "0"])
        .arg(&src)
        .arg(fx.dst.path().join("data.bin"))
        .assert()
        .code(1);

    assert!(!fx.dst.path().join("data.bin").exists());
}

#[cfg(unix)]
#[test]
fn test_device_source_rejected() {
    let fx = TestFixture::new();
    let dst = fx.dst.path().join("zero.out");

    let mut cmd = cargo_bin_cmd!("bcopy");
    cmd.args(["-q", "--no-sync", "/dev/zero"])
        .arg(&dst)
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a regular file"))
        .stderr(predicate::str::contains("error[invalid_input]"));

    assert!(!dst.exists());
}
