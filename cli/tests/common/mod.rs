//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A test fixture that provides source and destination directories.
pub struct TestFixture {
    pub src: TempDir,
    pub dst: TempDir,
}

impl TestFixture {
    /// Create a new test fixture with fresh source and destination directories.
    pub fn new() -> Self {
        Self {
            src: TempDir::new().expect("Failed to create temp source dir"),
            dst: TempDir::new().expect("Failed to create temp dest dir"),
        }
    }

    /// Write a source file and return its path.
    pub fn source_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.src.path().join(name);
        fs::write(&path, content).expect("Failed to write source file");
        path
    }

    /// Write a destination file and return its path.
    pub fn existing_destination(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.dst.path().join(name);
        fs::write(&path, content).expect("Failed to write destination file");
        path
    }

    /// Check that a file exists and has exactly the expected bytes.
    pub fn assert_file_bytes(&self, path: &Path, expected: &[u8]) {
        assert!(path.exists(), "File does not exist: {:?}", path);
        let actual = fs::read(path).expect("Failed to read file");
        assert_eq!(actual.len(), expected.len(), "File length mismatch");
        assert!(actual == expected, "File content mismatch");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic non-repeating-per-chunk test data.
pub fn patterned(len: usize) -> Vec<u8> {
    (0..len).map(|i| ((i * 131 + i / 4096) % 256) as u8).collect()
}
