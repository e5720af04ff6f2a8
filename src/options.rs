//! Configuration options for copy and verification.

/// Default number of bytes moved per read/write or read/compare cycle.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Largest accepted chunk size (64 MiB).
pub const MAX_CHUNK_SIZE: usize = 64 << 20;

/// Behavior when the destination file already exists
///
/// The copy engine itself never consults this: it always truncates and
/// writes. The policy is applied by [`resolve_conflict`](crate::resolve_conflict)
/// before the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OnConflict {
    /// Leave the existing destination untouched
    Skip,
    /// Replace the destination without asking
    Overwrite,
    /// Ask through a [`Confirm`](crate::Confirm) capability (default)
    #[default]
    Ask,
}

/// Options for copy and verification
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CopyOptions {
    /// Bytes moved per read/write cycle (default: 4096)
    ///
    /// The verifier uses the same chunk size so both passes see the file
    /// in identical slices. Clamped to `1..=MAX_CHUNK_SIZE` when used.
    pub chunk_size: usize,

    /// Whether to fsync the destination before returning (default: true)
    ///
    /// Disabling this is faster but a crash shortly after the copy may
    /// lose data that the engine already reported as written.
    pub fsync: bool,

    /// Callback for warnings (optional)
    ///
    /// If not set and `tracing` feature is enabled, warnings are logged via tracing.
    /// Otherwise, warnings are silently ignored.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            fsync: true,
            warn_handler: None,
        }
    }
}

impl CopyOptions {
    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Set the chunk size
    ///
    /// Value is clamped to `1..=`[`MAX_CHUNK_SIZE`].
    #[must_use]
    pub fn with_chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = bytes.clamp(1, MAX_CHUNK_SIZE);
        self
    }

    /// Disable fsync for faster (but less durable) copies
    #[must_use]
    pub fn without_fsync(mut self) -> Self {
        self.fsync = false;
        self
    }

    /// The effective chunk size, in range even if the field was set directly.
    pub(crate) fn chunk_size(&self) -> usize {
        self.chunk_size.clamp(1, MAX_CHUNK_SIZE)
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }
}
