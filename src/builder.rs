//! Builder API for ergonomic copy-and-verify operations.
//!
//! The builder pattern provides a fluent interface for configuring and
//! executing a copy. It runs the steps in a fixed order: source pre-check,
//! destination-exists policy, copy, then (optionally) verification.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use bytecopy::CopyBuilder;
//!
//! // Copy, replacing any existing destination
//! let report = CopyBuilder::new("disk.img", "backup/disk.img")
//!     .overwrite()
//!     .run()?;
//! println!("Copied {} bytes", report.bytes_copied());
//! # Ok::<(), bytecopy::Error>(())
//! ```
//!
//! ## With Verification and Progress
//!
//! ```no_run
//! use bytecopy::{AlwaysNo, CopyBuilder, LineProgress, ProgressSink};
//!
//! let mut progress = LineProgress::stdout();
//! let report = CopyBuilder::new("disk.img", "backup/disk.img")
//!     .verify()
//!     .run_with(&mut progress, &mut AlwaysNo)?;
//! progress.finish();
//!
//! if report.verified() == Some(false) {
//!     eprintln!("copy differs from source");
//! }
//! # Ok::<(), bytecopy::Error>(())
//! ```

use crate::copy::copy_file_with_options;
use crate::error::Result;
use crate::options::{CopyOptions, OnConflict};
use crate::progress::{NoProgress, ProgressSink};
use crate::resolve::{AlwaysNo, Confirm, Decision, check_source, resolve_conflict};
use crate::verify::{ComparisonResult, verify_with_options};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// What happened to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The file was copied
    Copied {
        /// Number of bytes written to the destination
        bytes: u64,
    },
    /// The destination existed and was left untouched by policy
    Skipped,
    /// The destination existed and overwriting was declined
    Declined,
}

/// Result of [`CopyBuilder::run`].
#[derive(Debug, Clone)]
pub struct CopyReport {
    /// What happened to the destination
    pub outcome: CopyOutcome,
    /// Verification result, if verification was requested and ran
    pub verification: Option<ComparisonResult>,
    /// Wall-clock time of the whole operation
    pub duration: Duration,
}

impl CopyReport {
    /// Bytes written (0 unless the file was copied).
    #[must_use]
    pub fn bytes_copied(&self) -> u64 {
        match self.outcome {
            CopyOutcome::Copied { bytes } => bytes,
            CopyOutcome::Skipped | CopyOutcome::Declined => 0,
        }
    }

    /// `Some(true)` if verification ran and found the files identical,
    /// `Some(false)` if it found a mismatch, `None` if it did not run.
    #[must_use]
    pub fn verified(&self) -> Option<bool> {
        self.verification.map(|r| r.is_identical())
    }
}

/// A builder for configuring and executing a single-file copy.
///
/// # Example
///
/// ```no_run
/// use bytecopy::CopyBuilder;
///
/// let report = CopyBuilder::new("/data/archive.tar", "/backup/archive.tar")
///     .skip_existing()
///     .verify()
///     .chunk_size(64 * 1024)
///     .run()?;
/// # Ok::<(), bytecopy::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CopyBuilder {
    src: PathBuf,
    dst: PathBuf,
    options: CopyOptions,
    on_conflict: OnConflict,
    verify: bool,
}

impl CopyBuilder {
    /// Create a new `CopyBuilder` for an already-resolved source and
    /// destination file path.
    ///
    /// Uses default options (4096-byte chunks, fsync, ask before
    /// overwriting, no verification).
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            options: CopyOptions::default(),
            on_conflict: OnConflict::default(),
            verify: false,
        }
    }

    /// Re-read both files after the copy and compare them byte for byte.
    ///
    /// A destination skipped by policy is verified too.
    #[must_use]
    pub fn verify(mut self) -> Self {
        self.verify = true;
        self
    }

    /// Replace an existing destination without asking.
    #[must_use]
    pub fn overwrite(mut self) -> Self {
        self.on_conflict = OnConflict::Overwrite;
        self
    }

    /// Leave an existing destination untouched.
    #[must_use]
    pub fn skip_existing(mut self) -> Self {
        self.on_conflict = OnConflict::Skip;
        self
    }

    /// Set the conflict resolution strategy.
    #[must_use]
    pub fn on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.on_conflict = on_conflict;
        self
    }

    /// Set the chunk size used by both the copy and the verification.
    #[must_use]
    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.options = self.options.with_chunk_size(bytes);
        self
    }

    /// Skip the final fsync of the destination.
    #[must_use]
    pub fn no_fsync(mut self) -> Self {
        self.options = self.options.without_fsync();
        self
    }

    /// Replace all copy options at once.
    #[must_use]
    pub fn options(mut self, options: CopyOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the current options.
    #[must_use]
    pub fn get_options(&self) -> &CopyOptions {
        &self.options
    }

    /// Run without progress output, declining any overwrite prompt.
    pub fn run(self) -> Result<CopyReport> {
        self.run_with(&mut NoProgress, &mut AlwaysNo)
    }

    /// Run with a progress sink and a confirmation capability.
    ///
    /// `confirm` is only consulted when the destination exists and the
    /// policy is [`OnConflict::Ask`].
    ///
    /// # Errors
    ///
    /// Source pre-check, conflict and copy errors are returned as-is. A
    /// verification mismatch is not an error; see [`CopyReport::verified`].
    pub fn run_with<S, C>(self, progress: &mut S, confirm: &mut C) -> Result<CopyReport>
    where
        S: ProgressSink + ?Sized,
        C: Confirm + ?Sized,
    {
        let start = Instant::now();

        check_source(&self.src)?;

        let outcome = match resolve_conflict(&self.dst, self.on_conflict, confirm)? {
            Decision::Proceed => {
                let bytes = copy_file_with_options(&self.src, &self.dst, &self.options, progress)?;
                CopyOutcome::Copied { bytes }
            }
            Decision::Skip => CopyOutcome::Skipped,
            Decision::Decline => CopyOutcome::Declined,
        };

        let verification = match outcome {
            CopyOutcome::Copied { .. } | CopyOutcome::Skipped if self.verify => {
                Some(verify_with_options(&self.src, &self.dst, &self.options)?)
            }
            _ => None,
        };

        Ok(CopyReport {
            outcome,
            verification,
            duration: start.elapsed(),
        })
    }
}
