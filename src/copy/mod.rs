//! The streaming copy engine.
//!
//! The engine has no conflict-resolution logic: it always truncates and
//! writes the destination it is given. Existence checks and overwrite
//! policy live in [`crate::resolve`].

mod file;
mod stream;

// Re-export public API
pub use file::{copy_file, copy_file_with_options};
pub use stream::{TransferState, copy_stream};
