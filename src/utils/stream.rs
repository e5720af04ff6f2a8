//! Chunk-level read helpers and side-tagged stream errors.

use std::io::{self, Read};
use std::path::Path;

use crate::error::Error;

/// Which of the two streams an IO failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Source,
    Destination,
}

/// An IO failure tagged with the stream it happened on, so file-level
/// callers can attach the right path.
#[derive(Debug)]
pub(crate) struct StreamError {
    pub side: Side,
    pub error: io::Error,
}

impl StreamError {
    pub(crate) fn source(error: io::Error) -> Self {
        Self {
            side: Side::Source,
            error,
        }
    }

    pub(crate) fn destination(error: io::Error) -> Self {
        Self {
            side: Side::Destination,
            error,
        }
    }

    pub(crate) fn into_error(self, src: &Path, dst: &Path) -> Error {
        match self.side {
            Side::Source => Error::io(src, self.error),
            Side::Destination => Error::io(dst, self.error),
        }
    }
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        e.error
    }
}

/// Read until `buf` is full or the stream ends.
///
/// Returns the number of bytes placed in `buf`; anything less than
/// `buf.len()` means end of stream was reached.
pub(crate) fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
