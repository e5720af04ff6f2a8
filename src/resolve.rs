//! Path resolution and destination-exists policy.
//!
//! Everything here runs strictly before the copy engine: the engine itself
//! never checks for an existing destination and never prompts. Prompting
//! goes through the injected [`Confirm`] capability so callers decide how
//! (or whether) to ask.

use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::options::OnConflict;

/// Prompt shown when the destination already exists and the policy is
/// [`OnConflict::Ask`].
pub const OVERWRITE_PROMPT: &str = "File already exists. Overwrite? (y/n): ";

/// Capability to ask a yes/no question.
pub trait Confirm {
    /// Ask `prompt`; `true` means yes.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Answers every question with yes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysYes;

impl Confirm for AlwaysYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Answers every question with no.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysNo;

impl Confirm for AlwaysNo {
    fn confirm(&mut self, _prompt: &str) -> bool {
        false
    }
}

/// What to do about the destination once the conflict policy is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Run the copy (destination missing, or overwrite allowed)
    Proceed,
    /// Destination exists and the policy says leave it alone
    Skip,
    /// Destination exists and the user declined to overwrite it
    Decline,
}

/// Check that the source exists and is a regular file.
///
/// Called before any destination mutation so a missing source never
/// truncates an existing destination.
pub fn check_source(src: &Path) -> Result<Metadata> {
    match fs::metadata(src) {
        Ok(meta) if meta.is_dir() => Err(Error::IsADirectory(src.to_path_buf())),
        Ok(meta) if !meta.is_file() => Err(Error::NotARegularFile(src.to_path_buf())),
        Ok(meta) => Ok(meta),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(Error::SourceNotFound(src.to_path_buf()))
        }
        Err(e) => Err(Error::open(src, e)),
    }
}

/// Work out the concrete destination file path.
///
/// | `destination` | Result |
/// |---------------|--------|
/// | `None` | `cwd` joined with the source file name |
/// | an existing directory | that directory joined with the source file name |
/// | anything else | the path as given |
pub fn resolve_destination(
    src: &Path,
    destination: Option<&Path>,
    cwd: &Path,
) -> Result<PathBuf> {
    let file_name = || {
        src.file_name()
            .ok_or_else(|| Error::SourceHasNoFilename(src.to_path_buf()))
    };

    match destination {
        None => Ok(cwd.join(file_name()?)),
        Some(dir) if dir.is_dir() => Ok(dir.join(file_name()?)),
        Some(path) => Ok(path.to_path_buf()),
    }
}

/// Apply the destination-exists policy.
///
/// A directory sitting at the destination path is never replaced and
/// yields [`Error::IsADirectory`] regardless of policy.
pub fn resolve_conflict<C: Confirm + ?Sized>(
    dst: &Path,
    on_conflict: OnConflict,
    confirm: &mut C,
) -> Result<Decision> {
    match fs::metadata(dst) {
        Ok(meta) if meta.is_dir() => Err(Error::IsADirectory(dst.to_path_buf())),
        Ok(_) => Ok(match on_conflict {
            OnConflict::Skip => Decision::Skip,
            OnConflict::Overwrite => Decision::Proceed,
            OnConflict::Ask if confirm.confirm(OVERWRITE_PROMPT) => Decision::Proceed,
            OnConflict::Ask => Decision::Decline,
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Decision::Proceed),
        Err(e) => Err(Error::open(dst, e)),
    }
}
