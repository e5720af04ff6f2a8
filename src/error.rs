//! Error types for bytecopy.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur during copy and verification, the [`Result`] type alias,
//! and the stable [`ErrorCode`] classification used by front ends.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Open | [`Error::Open`] |
//! | IO | [`Error::Io`] |
//! | Source | [`Error::SourceNotFound`], [`Error::IsADirectory`], [`Error::NotARegularFile`] |
//! | Request | [`Error::SourceHasNoFilename`], [`Error::SameFile`] |
//!
//! A verification mismatch is not an error: it is reported through
//! [`ComparisonResult`](crate::ComparisonResult).

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for bytecopy operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// This helper function detects storage-full conditions across platforms.
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC` (errno 28) |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
///
/// # Example
///
/// ```no_run
/// use std::io;
/// use bytecopy::is_no_space_error;
///
/// let error = io::Error::new(io::ErrorKind::StorageFull, "disk full");
/// if is_no_space_error(&error) {
///     println!("Destination has no space!");
/// }
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    #[cfg(unix)]
    {
        // The raw OS error might be available even if kind() isn't StorageFull
        if let Some(raw_error) = error.raw_os_error() {
            const ENOSPC: i32 = 28;
            return raw_error == ENOSPC;
        }
    }

    #[cfg(windows)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ERROR_DISK_FULL: i32 = 112;
            return raw_error == ERROR_DISK_FULL;
        }
    }

    false
}

/// Stable, machine-readable classification of an [`Error`].
///
/// The string form (see [`ErrorCode::as_str`]) is part of the CLI's
/// output contract and does not change between releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Source path does not exist
    SourceNotFound,
    /// Permission denied while opening, reading or writing
    PermissionDenied,
    /// Destination storage is full
    NoSpace,
    /// Any other IO failure
    IoError,
    /// The request itself is invalid (non-regular source, missing file name)
    InvalidInput,
    /// Failure outside of the copy itself (e.g. output serialization)
    Internal,
}

impl ErrorCode {
    /// The stable string form of this code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SourceNotFound => "source_not_found",
            Self::PermissionDenied => "permission_denied",
            Self::NoSpace => "no_space",
            Self::IoError => "io_error",
            Self::InvalidInput => "invalid_input",
            Self::Internal => "internal",
        }
    }

    /// Classify a raw IO error.
    #[must_use]
    pub fn from_io(error: &io::Error) -> Self {
        if is_no_space_error(error) {
            return Self::NoSpace;
        }
        if error.kind() == io::ErrorKind::PermissionDenied {
            return Self::PermissionDenied;
        }
        Self::IoError
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during copy and verification.
///
/// All errors include the path involved to aid debugging.
/// Use the [`std::error::Error`] trait methods to access underlying
/// causes where applicable.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A file could not be opened (missing, permission denied, parent
    /// directory absent)
    #[error("Failed to open {path}: {source}")]
    Open {
        /// The path that could not be opened
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// A read, write or sync failed after the streams were open
    ///
    /// A partially written destination is left on disk as-is.
    #[error("IO error on {path}: {source}")]
    Io {
        /// The file being read or written when the failure occurred
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Source path does not exist
    #[error("Source file does not exist: {0}")]
    SourceNotFound(PathBuf),

    /// Path is a directory where a regular file is required
    #[error("Path is a directory: {0}")]
    IsADirectory(PathBuf),

    /// Source is a device, FIFO or socket rather than a regular file
    #[error("Source is not a regular file: {0}")]
    NotARegularFile(PathBuf),

    /// Source has no file name to derive a destination from
    #[error("Source has no filename: {0}")]
    SourceHasNoFilename(PathBuf),

    /// Source and destination are the same file
    ///
    /// Truncating the destination would destroy the source, so the copy
    /// is refused before anything is opened for writing.
    #[error("Source and destination are the same file: {0}")]
    SameFile(PathBuf),
}

impl Error {
    /// Classify this error into a stable [`ErrorCode`].
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Open { source, .. } | Self::Io { source, .. } => ErrorCode::from_io(source),
            Self::SourceNotFound(_) => ErrorCode::SourceNotFound,
            Self::IsADirectory(_)
            | Self::NotARegularFile(_)
            | Self::SourceHasNoFilename(_)
            | Self::SameFile(_) => ErrorCode::InvalidInput,
        }
    }

    pub(crate) fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
