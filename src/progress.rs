//! Progress reporting.
//!
//! The copy engine notifies a [`ProgressSink`] after every chunk it writes.
//! Reporting is synchronous and runs on the copying thread, so a sink that
//! blocks directly delays the next read.
//!
//! | Sink | Output |
//! |------|--------|
//! | [`LineProgress`] | `Copied: X.XX MB of Y.YY MB \| Speed: Z.ZZ MB/s`, redrawn in place |
//! | [`NoProgress`] | nothing |
//! | any `FnMut(u64, u64, f64)` | whatever the closure does |
//! | `BarProgress` | an indicatif progress bar (requires `progress` feature) |

use std::io::{self, Write};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Observer notified with transfer statistics after each chunk.
pub trait ProgressSink {
    /// Called with the cumulative bytes transferred, the total size and
    /// the average speed in MB/s since the copy started.
    fn report(&mut self, transferred: u64, total: u64, speed_mbps: f64);

    /// Called by the front end once no more updates will follow.
    fn finish(&mut self) {}
}

impl<F> ProgressSink for F
where
    F: FnMut(u64, u64, f64),
{
    fn report(&mut self, transferred: u64, total: u64, speed_mbps: f64) {
        self(transferred, total, speed_mbps)
    }
}

/// A sink that discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _transferred: u64, _total: u64, _speed_mbps: f64) {}
}

/// Convert a byte count to megabytes (1 MB = 1,048,576 bytes).
#[inline]
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Render one progress line without the trailing carriage return.
///
/// ```
/// use bytecopy::format_progress_line;
///
/// let line = format_progress_line(5 * 1024 * 1024, 10 * 1024 * 1024, 12.5);
/// assert_eq!(line, "Copied: 5.00 MB of 10.00 MB | Speed: 12.50 MB/s");
/// ```
#[must_use]
pub fn format_progress_line(transferred: u64, total: u64, speed_mbps: f64) -> String {
    format!(
        "Copied: {:.2} MB of {:.2} MB | Speed: {:.2} MB/s",
        bytes_to_mb(transferred),
        bytes_to_mb(total),
        speed_mbps
    )
}

/// Single-line progress display redrawn in place with a carriage return.
///
/// Terminal write failures are ignored: losing a progress update must
/// never fail the copy.
#[derive(Debug)]
pub struct LineProgress<W: Write> {
    out: W,
    drawn: bool,
}

impl LineProgress<io::Stdout> {
    /// Draw on standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LineProgress<W> {
    /// Draw on an arbitrary writer.
    pub fn new(out: W) -> Self {
        Self { out, drawn: false }
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressSink for LineProgress<W> {
    fn report(&mut self, transferred: u64, total: u64, speed_mbps: f64) {
        let line = format_progress_line(transferred, total, speed_mbps);
        let _ = write!(self.out, "{line}\r");
        let _ = self.out.flush();
        self.drawn = true;
    }

    /// Terminate the progress line so later output starts on a fresh line.
    ///
    /// Does nothing if no update was ever drawn.
    fn finish(&mut self) {
        if self.drawn {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
            self.drawn = false;
        }
    }
}

#[cfg(feature = "progress")]
mod bar {
    use super::{ProgressSink, bytes_to_mb};
    use indicatif::{ProgressBar, ProgressStyle};

    /// Create a default progress bar for a single-file copy
    #[must_use]
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb
    }

    /// Progress sink backed by an indicatif [`ProgressBar`]
    #[derive(Debug, Clone)]
    pub struct BarProgress(ProgressBar);

    impl BarProgress {
        /// Wrap an existing bar.
        #[must_use]
        pub fn new(bar: ProgressBar) -> Self {
            Self(bar)
        }

        /// The wrapped bar, e.g. to call `finish_and_clear`.
        #[must_use]
        pub fn bar(&self) -> &ProgressBar {
            &self.0
        }
    }

    impl ProgressSink for BarProgress {
        fn report(&mut self, transferred: u64, total: u64, speed_mbps: f64) {
            self.0.set_length(total);
            self.0.set_position(transferred);
            self.0.set_message(format!(
                "{:.2} MB of {:.2} MB | {:.2} MB/s",
                bytes_to_mb(transferred),
                bytes_to_mb(total),
                speed_mbps
            ));
        }

        fn finish(&mut self) {
            self.0.finish_and_clear();
        }
    }
}

#[cfg(feature = "progress")]
#[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
pub use bar::{BarProgress, create_progress_bar};
