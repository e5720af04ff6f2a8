//! Post-copy verification by lockstep byte comparison.
//!
//! Both files are re-read from the start in equal-sized chunks, one chunk
//! from each per iteration, and compared directly. No hashing is involved
//! and filesystem metadata (size, mtime) is never trusted: a truncated or
//! padded destination is only detected by actually reading past the point
//! where the two streams diverge.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::options::{CopyOptions, MAX_CHUNK_SIZE};
use crate::utils::stream::{StreamError, read_full};

/// How two streams diverged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MismatchKind {
    /// The streams are identical
    None,
    /// One stream ended before the other
    Size,
    /// Same length so far, different bytes
    Content,
}

impl MismatchKind {
    /// Stable string form used in machine-readable output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Size => "size",
            Self::Content => "content",
        }
    }
}

/// Outcome of a verification pass.
///
/// For [`MismatchKind::Content`] the offset is the first differing byte;
/// for [`MismatchKind::Size`] it is where the shorter stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonResult {
    identical: bool,
    mismatch_offset: Option<u64>,
    mismatch_kind: MismatchKind,
}

impl ComparisonResult {
    pub(crate) fn identical() -> Self {
        Self {
            identical: true,
            mismatch_offset: None,
            mismatch_kind: MismatchKind::None,
        }
    }

    pub(crate) fn size_mismatch(offset: u64) -> Self {
        Self {
            identical: false,
            mismatch_offset: Some(offset),
            mismatch_kind: MismatchKind::Size,
        }
    }

    pub(crate) fn content_mismatch(offset: u64) -> Self {
        Self {
            identical: false,
            mismatch_offset: Some(offset),
            mismatch_kind: MismatchKind::Content,
        }
    }

    /// Whether the two streams were byte-for-byte equal.
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.identical
    }

    /// Byte offset of the divergence, if any.
    #[must_use]
    pub fn mismatch_offset(&self) -> Option<u64> {
        self.mismatch_offset
    }

    /// Kind of divergence ([`MismatchKind::None`] when identical).
    #[must_use]
    pub fn mismatch_kind(&self) -> MismatchKind {
        self.mismatch_kind
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.mismatch_kind, self.mismatch_offset) {
            (MismatchKind::None, _) => f.write_str("identical"),
            (MismatchKind::Size, Some(offset)) => {
                write!(f, "size mismatch: one file ends at byte {offset}")
            }
            (MismatchKind::Content, Some(offset)) => {
                write!(f, "content mismatch at byte {offset}")
            }
            (MismatchKind::Size, None) => f.write_str("size mismatch"),
            (MismatchKind::Content, None) => f.write_str("content mismatch"),
        }
    }
}

/// Compare two files with the default chunk size.
///
/// See [`verify_with_options`].
pub fn verify(src: &Path, dst: &Path) -> Result<ComparisonResult> {
    verify_with_options(src, dst, &CopyOptions::default())
}

/// Compare two files byte for byte, reading both in lockstep chunks of
/// `options.chunk_size` bytes.
///
/// Neither file is modified.
///
/// # Errors
///
/// - Either file cannot be opened ([`Error::Open`]), e.g. the destination
///   was removed after the copy
/// - A read fails part-way ([`Error::Io`])
pub fn verify_with_options(
    src: &Path,
    dst: &Path,
    options: &CopyOptions,
) -> Result<ComparisonResult> {
    let mut src_file = File::open(src).map_err(|e| Error::open(src, e))?;
    let mut dst_file = File::open(dst).map_err(|e| Error::open(dst, e))?;

    let result = compare(&mut src_file, &mut dst_file, options.chunk_size())
        .map_err(|e| e.into_error(src, dst))?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        src = %src.display(),
        dst = %dst.display(),
        result = %result,
        "verification finished"
    );

    Ok(result)
}

/// Compare two readers in lockstep chunks of `chunk_size` bytes.
///
/// Each chunk read keeps reading until the chunk is full or the stream
/// ends, so a reader that returns data in small pieces is not mistaken
/// for a shorter one.
///
/// # Example
///
/// ```
/// use bytecopy::{MismatchKind, compare_streams};
///
/// let result = compare_streams(&b"hello world"[..], &b"hello there"[..], 4096)?;
/// assert_eq!(result.mismatch_kind(), MismatchKind::Content);
/// assert_eq!(result.mismatch_offset(), Some(6));
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn compare_streams<A: Read, B: Read>(
    mut a: A,
    mut b: B,
    chunk_size: usize,
) -> io::Result<ComparisonResult> {
    compare(&mut a, &mut b, chunk_size).map_err(io::Error::from)
}

pub(crate) fn compare<A, B>(
    a: &mut A,
    b: &mut B,
    chunk_size: usize,
) -> std::result::Result<ComparisonResult, StreamError>
where
    A: Read + ?Sized,
    B: Read + ?Sized,
{
    let chunk_size = chunk_size.clamp(1, MAX_CHUNK_SIZE);
    let mut a_buf = vec![0u8; chunk_size];
    let mut b_buf = vec![0u8; chunk_size];
    let mut offset: u64 = 0;

    loop {
        let a_n = read_full(a, &mut a_buf).map_err(StreamError::source)?;
        let b_n = read_full(b, &mut b_buf).map_err(StreamError::destination)?;

        if a_n != b_n {
            return Ok(ComparisonResult::size_mismatch(
                offset + a_n.min(b_n) as u64,
            ));
        }
        if a_n == 0 {
            return Ok(ComparisonResult::identical());
        }
        if let Some(i) = a_buf[..a_n]
            .iter()
            .zip(&b_buf[..b_n])
            .position(|(x, y)| x != y)
        {
            return Ok(ComparisonResult::content_mismatch(offset + i as u64));
        }

        offset += a_n as u64;
    }
}
