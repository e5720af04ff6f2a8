//! Boundary cases integration tests for bcopy CLI.
//!
//! These tests verify behavior at edge cases and boundary conditions:
//! - Empty files
//! - Sizes at and around chunk boundaries
//! - Non-default chunk sizes
//! - Files with special characters in names

use super::common::{TestFixture, patterned};
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;

// =============================================================================
// Empty File Tests
// =============================================================================

/// Test copying an empty file (0 bytes).
#[test]
fn test_copy_empty_file() {
    let fx = TestFixture::new();
    let src = fx.source_file("empty.txt", b"");
    let dst = fx.dst.path().join("empty.txt");

    let mut cmd = cargo_bin_cmd!("bcopy");
    cmd.arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied: 0.00 MB of 0.00 MB"));

    assert!(dst.exists());
    assert_eq!(fs::metadata(&dst).unwrap().len(), 0);
}

// =============================================================================
// Chunk Boundary Tests
// =============================================================================

/// Sizes at exact multiples of the 4096-byte chunk must neither duplicate
/// nor drop the boundary chunk.
#[rstest]
#[case::one_byte(1)]
#[case::one_short_of_chunk(4095)]
#[case::exact_chunk(4096)]
#[case::one_past_chunk(4097)]
#[case::two_chunks(8192)]
#[case::many_chunks(40_960)]
fn test_copy_chunk_boundaries(#[case] size: usize) {
    let fx = TestFixture::new();
    let data = patterned(size);
    let src = fx.source_file("boundary.bin", &data);
    let dst = fx.dst.path().join("boundary.bin");

    let mut cmd = cargo_bin_cmd!("bcopy");
    cmd.arg("--verify")
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .stdout(predicate::str::contains("Files are identical"));

    fx.assert_file_bytes(&dst, &data);
}

#[rstest]
#[case(1)]
#[case(1000)]
#[case(1024 * 1024)]
fn test_copy_with_custom_chunk_size(#[case] chunk: usize) {
    let fx = TestFixture::new();
    let data = patterned(12_345);
    let src = fx.source_file("chunked.bin", &data);
    let dst = fx.dst.path().join("chunked.bin");

    let mut cmd = cargo_bin_cmd!("bcopy");
    cmd.args(["--quiet", "--verify", "--chunk-size"])
        .arg(chunk.to_string())
        .arg(&src)
        .arg(&dst)
        .assert()
        .success();

    fx.assert_file_bytes(&dst, &data);
}

/// Test copying a file without fsync.
#[test]
fn test_copy_without_sync() {
    let fx = TestFixture::new();
    let data = patterned(100_000);
    let src = fx.source_file("nosync.bin", &data);
    let dst = fx.dst.path().join("nosync.bin");

    let mut cmd = cargo_bin_cmd!("bcopy");
    cmd.arg("--no-sync").arg(&src).arg(&dst).assert().success();

    fx.assert_file_bytes(&dst, &data);
}

// =============================================================================
// Special Character Filename Tests
// =============================================================================

#[rstest]
#[case("file with spaces.txt")]
#[case("file-with-dash.txt")]
#[case("file.multiple.dots.txt")]
#[case("file[bracket].txt")]
#[case("文件.txt")]
#[case("café.txt")]
fn test_special_filenames_into_directory(#[case] name: &str) {
    let fx = TestFixture::new();
    let content = format!("content of {}", name);
    let src = fx.source_file(name, content.as_bytes());

    let mut cmd = cargo_bin_cmd!("bcopy");
    cmd.arg(&src).arg(fx.dst.path()).assert().success();

    assert_eq!(
        fs::read_to_string(fx.dst.path().join(name)).unwrap(),
        content
    );
}
