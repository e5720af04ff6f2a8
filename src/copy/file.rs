//! Single file copy operations.
//!
//! This module opens the source and destination files and drives the
//! chunked loop in [`super::stream`] between them.

use crate::error::{Error, Result};
use crate::options::CopyOptions;
use crate::progress::ProgressSink;
use crate::utils::is_same_file;
use std::fs::{File, OpenOptions};
use std::path::Path;

use super::stream::transfer;

/// Copy a single file with default [`CopyOptions`].
///
/// See [`copy_file_with_options`].
pub fn copy_file<S: ProgressSink + ?Sized>(
    src: &Path,
    dst: &Path,
    progress: &mut S,
) -> Result<u64> {
    copy_file_with_options(src, dst, &CopyOptions::default(), progress)
}

/// Copy a single file in fixed-size chunks, reporting progress after each.
///
/// The destination is created or truncated; its parent directory must
/// already exist. The total size is taken from the opened source's metadata
/// before streaming starts.
///
/// # Arguments
///
/// * `src` - Source file path
/// * `dst` - Destination file path
/// * `options` - Copy options (chunk size, fsync)
/// * `progress` - Sink notified with (transferred, total, MB/s) per chunk
///
/// # Returns
///
/// The number of bytes copied.
///
/// # Errors
///
/// Returns an error if:
/// - Either file cannot be opened ([`Error::Open`])
/// - Source is a directory ([`Error::IsADirectory`]) or otherwise not a
///   regular file ([`Error::NotARegularFile`])
/// - Source and destination are the same file ([`Error::SameFile`])
/// - A read, write or fsync fails mid-copy ([`Error::Io`]); whatever was
///   written so far stays on disk
pub fn copy_file_with_options<S: ProgressSink + ?Sized>(
    src: &Path,
    dst: &Path,
    options: &CopyOptions,
    progress: &mut S,
) -> Result<u64> {
    let src_file = File::open(src).map_err(|e| Error::open(src, e))?;
    let src_meta = src_file.metadata().map_err(|e| Error::io(src, e))?;

    if src_meta.is_dir() {
        return Err(Error::IsADirectory(src.to_path_buf()));
    }
    if !src_meta.is_file() {
        return Err(Error::NotARegularFile(src.to_path_buf()));
    }
    if is_same_file(src, dst).map_err(|e| Error::open(dst, e))? {
        return Err(Error::SameFile(dst.to_path_buf()));
    }

    let total = src_meta.len();
    let chunk_size = options.chunk_size();

    let dst_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dst)
        .map_err(|e| Error::open(dst, e))?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        src = %src.display(),
        dst = %dst.display(),
        total,
        chunk_size,
        "starting copy"
    );

    let state = transfer(&mut &src_file, &mut &dst_file, total, chunk_size, progress)
        .map_err(|e| e.into_error(src, dst))?;

    if options.fsync {
        dst_file.sync_all().map_err(|e| Error::io(dst, e))?;
    }

    let copied = state.bytes_transferred();
    if copied != total {
        options.warn(&format!(
            "source {} changed size during copy: expected {} bytes, copied {}",
            src.display(),
            total,
            copied
        ));
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        dst = %dst.display(),
        bytes = copied,
        elapsed_ms = state.elapsed().as_millis() as u64,
        "copy finished"
    );

    Ok(copied)
}

// =============================================================================
// Tests
// =============================================================================
