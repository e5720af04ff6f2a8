//! # bytecopy
//!
//! Chunked single-file copy with live progress and byte-for-byte
//! verification.
//!
//! ## Core Features
//!
//! - **Streaming copy**: fixed-size chunks (4096 bytes by default), each
//!   written before the next is read
//! - **Live progress**: a [`ProgressSink`] is notified after every chunk with
//!   bytes transferred, total size and average speed
//! - **Verification**: a lockstep re-read of both files that reports the
//!   first size or content divergence, without hashing and without trusting
//!   filesystem metadata
//! - **Explicit conflict policy**: skip, overwrite, or ask through an
//!   injected [`Confirm`] capability, always applied before the copy starts
//!
//! ## Quick Start with Builder API
//!
//! ```no_run
//! use bytecopy::CopyBuilder;
//!
//! let report = CopyBuilder::new("data.bin", "backup/data.bin")
//!     .overwrite()
//!     .verify()
//!     .run()?;
//! println!("Copied {} bytes, identical: {:?}", report.bytes_copied(), report.verified());
//! # Ok::<(), bytecopy::Error>(())
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use bytecopy::{
//!     CopyOptions, LineProgress, ProgressSink, copy_file_with_options, verify_with_options,
//! };
//! use std::path::Path;
//!
//! let options = CopyOptions::default()
//!     .with_chunk_size(64 * 1024)
//!     .without_fsync();
//!
//! let (src, dst) = (Path::new("data.bin"), Path::new("copy.bin"));
//! let mut progress = LineProgress::stdout();
//! copy_file_with_options(src, dst, &options, &mut progress)?;
//! progress.finish();
//!
//! let result = verify_with_options(src, dst, &options)?;
//! println!("{result}");
//! # Ok::<(), bytecopy::Error>(())
//! ```
//!
//! ## Failure Semantics
//!
//! The destination is opened with truncation and written in place. If a
//! read or write fails part-way, whatever was written stays on disk; there
//! is no rollback and no retry. Verification never modifies either file.
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `progress` | Progress bar sink with indicatif |
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`CopyOptions`] and [`ComparisonResult`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod copy;
mod error;
mod options;
mod progress;
mod resolve;
mod utils;
mod verify;

pub use builder::{CopyBuilder, CopyOutcome, CopyReport};
pub use copy::{TransferState, copy_file, copy_file_with_options, copy_stream};
pub use error::{Error, ErrorCode, Result, is_no_space_error};
pub use options::{CopyOptions, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, OnConflict};
pub use progress::{LineProgress, NoProgress, ProgressSink, bytes_to_mb, format_progress_line};
pub use resolve::{
    AlwaysNo, AlwaysYes, Confirm, Decision, OVERWRITE_PROMPT, check_source, resolve_conflict,
    resolve_destination,
};
pub use verify::{ComparisonResult, MismatchKind, compare_streams, verify, verify_with_options};

#[cfg(feature = "progress")]
#[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
pub use progress::{BarProgress, create_progress_bar};
