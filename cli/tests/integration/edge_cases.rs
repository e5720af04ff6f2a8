//! Edge case integration tests for bcopy CLI.
//!
//! These tests cover edge cases and boundary conditions:
//! - Empty files and chunk-boundary sizes
//! - Tunable chunk size and fsync
//! - Special filenames

#[path = "../common/mod.rs"]
mod common;

#[path = "edge_cases/boundary_cases.rs"]
mod boundary_cases;
