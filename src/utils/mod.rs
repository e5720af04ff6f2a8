//! Internal helpers shared by the copy engine and the verifier.

pub(crate) mod stream;

use std::fs;
use std::io;
use std::path::Path;

/// Check whether two paths name the same underlying file.
///
/// Returns `Ok(false)` if either path does not exist. On Unix this compares
/// (dev, ino); elsewhere it compares canonicalized paths.
#[cfg(unix)]
pub(crate) fn is_same_file(a: &Path, b: &Path) -> io::Result<bool> {
    use std::os::unix::fs::MetadataExt;
    let (a_meta, b_meta) = match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a_meta), Ok(b_meta)) => (a_meta, b_meta),
        (Err(e), _) | (_, Err(e)) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        (Err(e), _) | (_, Err(e)) => return Err(e),
    };
    Ok(a_meta.dev() == b_meta.dev() && a_meta.ino() == b_meta.ino())
}

#[cfg(not(unix))]
pub(crate) fn is_same_file(a: &Path, b: &Path) -> io::Result<bool> {
    let (a_path, b_path) = match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a_path), Ok(b_path)) => (a_path, b_path),
        (Err(e), _) | (_, Err(e)) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        (Err(e), _) | (_, Err(e)) => return Err(e),
    };
    Ok(a_path == b_path)
}
