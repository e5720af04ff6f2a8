//! The chunked read/write loop and its transfer bookkeeping.

use std::io::{self, Read, Write};
use std::time::{Duration, Instant};

use crate::options::MAX_CHUNK_SIZE;
use crate::progress::{ProgressSink, bytes_to_mb};
use crate::utils::stream::StreamError;

/// Counters for one in-flight copy.
///
/// `bytes_transferred` only ever grows, and [`total_bytes`](Self::total_bytes)
/// never reports less than it, so observers always see
/// `0 <= transferred <= total`.
#[derive(Debug, Clone)]
pub struct TransferState {
    total_bytes: u64,
    bytes_transferred: u64,
    started_at: Instant,
}

impl TransferState {
    /// Start tracking a transfer of `total_bytes`, timing from now.
    #[must_use]
    pub fn new(total_bytes: u64) -> Self {
        Self {
            total_bytes,
            bytes_transferred: 0,
            started_at: Instant::now(),
        }
    }

    /// Record `n` more bytes written.
    pub fn advance(&mut self, n: u64) {
        self.bytes_transferred = self.bytes_transferred.saturating_add(n);
    }

    /// Bytes written so far.
    #[must_use]
    pub fn bytes_transferred(&self) -> u64 {
        self.bytes_transferred
    }

    /// Size probed before streaming, raised to the transferred count if the
    /// source grew while being copied.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes.max(self.bytes_transferred)
    }

    /// Wall-clock time since the transfer started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Average speed in MB/s since the start; 0.0 before any measurable
    /// time has passed.
    #[must_use]
    pub fn speed_mbps(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            bytes_to_mb(self.bytes_transferred) / secs
        } else {
            0.0
        }
    }

    fn report<S: ProgressSink + ?Sized>(&self, sink: &mut S) {
        sink.report(self.bytes_transferred(), self.total_bytes(), self.speed_mbps());
    }
}

/// Copy `reader` into `writer` in chunks of `chunk_size` bytes.
///
/// Each chunk is written in full before the next read is issued, and
/// `progress` is notified after every chunk. An empty reader still yields
/// exactly one report. `total` is the size announced to the sink.
/// `chunk_size` is clamped to `1..=`[`MAX_CHUNK_SIZE`](crate::MAX_CHUNK_SIZE).
///
/// Returns the number of bytes copied.
///
/// # Example
///
/// ```
/// use bytecopy::{NoProgress, copy_stream};
///
/// let data = vec![7u8; 10_000];
/// let mut out = Vec::new();
/// let copied = copy_stream(&data[..], &mut out, data.len() as u64, 4096, &mut NoProgress)?;
/// assert_eq!(copied, 10_000);
/// assert_eq!(out, data);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn copy_stream<R, W, S>(
    mut reader: R,
    mut writer: W,
    total: u64,
    chunk_size: usize,
    progress: &mut S,
) -> io::Result<u64>
where
    R: Read,
    W: Write,
    S: ProgressSink + ?Sized,
{
    transfer(&mut reader, &mut writer, total, chunk_size, progress)
        .map(|state| state.bytes_transferred())
        .map_err(io::Error::from)
}

pub(crate) fn transfer<R, W, S>(
    reader: &mut R,
    writer: &mut W,
    total: u64,
    chunk_size: usize,
    progress: &mut S,
) -> Result<TransferState, StreamError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
    S: ProgressSink + ?Sized,
{
    let mut buf = vec![0u8; chunk_size.clamp(1, MAX_CHUNK_SIZE)];
    let mut state = TransferState::new(total);
    let mut chunks: u64 = 0;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(StreamError::source(e)),
        };
        writer
            .write_all(&buf[..n])
            .map_err(StreamError::destination)?;
        state.advance(n as u64);
        chunks += 1;
        state.report(progress);
    }

    if chunks == 0 {
        state.report(progress);
    }

    writer.flush().map_err(StreamError::destination)?;
    Ok(state)
}
