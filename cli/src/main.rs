//! bcopy - Byte Copy
//!
//! Copy a single file with live progress and optional byte-for-byte
//! verification, powered by bytecopy.

use bytecopy::{
    BarProgress, ComparisonResult, Confirm, CopyBuilder, CopyOptions, CopyOutcome, CopyReport,
    DEFAULT_CHUNK_SIZE, Error as BytecopyError, ErrorCode, LineProgress, MAX_CHUNK_SIZE, NoProgress,
    OnConflict, ProgressSink, create_progress_bar, resolve_destination, verify_with_options,
};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Value, json};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`, `bytecopy=trace`).
const LOG_ENV: &str = "BCOPY_LOG";

/// Exit code when verification finds the files differ.
const EXIT_VERIFY_FAILED: i32 = 3;

/// bcopy - Copy a file with progress and verification
///
/// Copies SOURCE to DESTINATION in fixed-size chunks, showing bytes copied
/// and transfer speed as it goes.
///
/// Usage:
///   bcopy SOURCE                 copy into the current directory
///   bcopy SOURCE DIRECTORY       copy into DIRECTORY under the same name
///   bcopy SOURCE FILE            copy to FILE
#[derive(Parser, Debug)]
#[command(name = "bcopy", version, about, long_about = None)]
struct Args {
    /// Source file
    source: PathBuf,

    /// Destination file or directory (default: current directory)
    destination: Option<PathBuf>,

    /// Verify the copy after completion
    #[arg(short = 'v', long)]
    verify: bool,

    /// Overwrite the destination file without asking
    #[arg(short = 'y', long = "yes", conflicts_with = "no_clobber")]
    overwrite: bool,

    /// Skip copying if the destination file exists
    #[arg(short = 'n', long = "no-clobber")]
    no_clobber: bool,

    /// Disable the progress display
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Show a progress bar instead of the single-line display
    #[arg(long, conflicts_with = "quiet")]
    bar: bool,

    /// Bytes read and written per chunk
    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = DEFAULT_CHUNK_SIZE,
        value_parser = parse_chunk_size
    )]
    chunk_size: usize,

    /// Do not fsync the destination after copying (faster but less safe)
    #[arg(long)]
    no_sync: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    output: OutputMode,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

fn parse_chunk_size(value: &str) -> Result<usize, String> {
    let bytes: usize = value.parse().map_err(|e| format!("{e}"))?;
    if (1..=MAX_CHUNK_SIZE).contains(&bytes) {
        Ok(bytes)
    } else {
        Err(format!("must be between 1 and {MAX_CHUNK_SIZE}"))
    }
}

impl Args {
    fn on_conflict(&self) -> OnConflict {
        if self.no_clobber {
            OnConflict::Skip
        } else if self.overwrite {
            OnConflict::Overwrite
        } else {
            OnConflict::Ask
        }
    }

    fn copy_options(&self) -> CopyOptions {
        let options = CopyOptions::default().with_chunk_size(self.chunk_size);
        if self.no_sync {
            options.without_fsync()
        } else {
            options
        }
    }

    fn show_progress(&self) -> bool {
        self.output == OutputMode::Human && !self.quiet
    }
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to determine current directory: {source}")]
    CurrentDir { source: io::Error },

    #[error("{source}")]
    Resolve { source: BytecopyError },

    #[error("Failed to copy file: {path}: {source}")]
    CopyFile { path: PathBuf, source: BytecopyError },

    #[error("Failed to verify file: {path}: {source}")]
    VerifyFile { path: PathBuf, source: BytecopyError },

    #[error("Failed to serialize JSON output: {source}")]
    JsonSerialize { source: serde_json::Error },
}

impl CliError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::CurrentDir { source } => ErrorCode::from_io(source),
            Self::Resolve { source }
            | Self::CopyFile { source, .. }
            | Self::VerifyFile { source, .. } => source.code(),
            Self::JsonSerialize { .. } => ErrorCode::Internal,
        }
    }
}

/// How a run that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Done,
    VerificationFailed,
}

/// Reads a y/n answer from stdin, writing the prompt to stderr so that
/// stdout stays clean for progress and JSON output.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{prompt}");
        let _ = stderr.flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim_start().chars().next(), Some('y' | 'Y')),
            Err(_) => false,
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => {
            // --help and --version are not errors
            let code = if error.use_stderr() { 1 } else { 0 };
            let _ = error.print();
            std::process::exit(code);
        }
    };

    init_logging();

    match run(&args) {
        Ok(Status::Done) => {}
        Ok(Status::VerificationFailed) => std::process::exit(EXIT_VERIFY_FAILED),
        Err(error) => {
            if args.output == OutputMode::Json {
                let _ = print_json_value(&failure_json(&args, &error));
            }
            eprintln!("error[{}]: {}", error.code(), error);
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> CliResult<Status> {
    let cwd = std::env::current_dir().map_err(|source| CliError::CurrentDir { source })?;
    let dest = resolve_destination(&args.source, args.destination.as_deref(), &cwd)
        .map_err(|source| CliError::Resolve { source })?;

    tracing::debug!(
        source = %args.source.display(),
        destination = %dest.display(),
        on_conflict = ?args.on_conflict(),
        "resolved paths"
    );

    let options = args.copy_options();
    let mut progress = make_progress(args);

    let result = CopyBuilder::new(&args.source, &dest)
        .options(options.clone())
        .on_conflict(args.on_conflict())
        .run_with(progress.as_mut(), &mut StdinConfirm);
    progress.finish();

    let mut report = result.map_err(|source| CliError::CopyFile {
        path: args.source.clone(),
        source,
    })?;

    if args.verify && report.outcome != CopyOutcome::Declined {
        if args.output == OutputMode::Human {
            print_outcome(&report);
        }
        report.verification = Some(verify_with_spinner(args, &dest, &options)?);
    }

    match args.output {
        OutputMode::Human => {
            if report.verification.is_none() {
                print_outcome(&report);
            }
            if let Some(result) = report.verification {
                print_verification(&result);
            }
        }
        OutputMode::Json => print_json_value(&report_json(args, &dest, &report))?,
    }

    match report.verified() {
        Some(false) => Ok(Status::VerificationFailed),
        _ => Ok(Status::Done),
    }
}

fn make_progress(args: &Args) -> Box<dyn ProgressSink> {
    if !args.show_progress() {
        Box::new(NoProgress)
    } else if args.bar {
        Box::new(BarProgress::new(create_progress_bar(0)))
    } else {
        Box::new(LineProgress::stdout())
    }
}

fn verify_with_spinner(
    args: &Args,
    dest: &Path,
    options: &CopyOptions,
) -> CliResult<ComparisonResult> {
    let spinner = if args.show_progress() {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner().template("{spinner:.green} {msg}");
        match style {
            Ok(style) => {
                pb.set_style(style);
                pb.enable_steady_tick(Duration::from_millis(100));
                pb.set_message(format!("Verifying {}...", dest.display()));
                Some(pb)
            }
            Err(_) => None,
        }
    } else {
        None
    };

    let result = verify_with_options(&args.source, dest, options);

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    result.map_err(|source| CliError::VerifyFile {
        path: dest.to_path_buf(),
        source,
    })
}

fn print_outcome(report: &CopyReport) {
    match report.outcome {
        CopyOutcome::Copied { bytes } => println!(
            "Copy completed! ({} in {:.2?})",
            format_bytes(bytes),
            report.duration
        ),
        CopyOutcome::Skipped => println!("File already exists. Skipping copy."),
        CopyOutcome::Declined => println!("Copy operation cancelled."),
    }
}

fn print_verification(result: &ComparisonResult) {
    if result.is_identical() {
        println!("Verification successful: Files are identical.");
    } else {
        eprintln!("Verification failed: Files differ! ({result})");
    }
}

fn outcome_str(outcome: CopyOutcome) -> &'static str {
    match outcome {
        CopyOutcome::Copied { .. } => "copied",
        CopyOutcome::Skipped => "skipped",
        CopyOutcome::Declined => "declined",
    }
}

fn verification_json(result: &ComparisonResult) -> Value {
    json!({
        "identical": result.is_identical(),
        "mismatch_kind": result.mismatch_kind().as_str(),
        "mismatch_offset": result.mismatch_offset(),
    })
}

fn report_json(args: &Args, dest: &Path, report: &CopyReport) -> Value {
    let mut obj = serde_json::Map::new();
    obj.insert("schema_version".to_owned(), Value::String("1.0".to_owned()));
    obj.insert("source".to_owned(), Value::String(display_path(&args.source)));
    obj.insert("destination".to_owned(), Value::String(display_path(dest)));
    obj.insert(
        "outcome".to_owned(),
        Value::String(outcome_str(report.outcome).to_owned()),
    );

    if let CopyOutcome::Copied { bytes } = report.outcome {
        obj.insert("bytes_copied".to_owned(), Value::Number(bytes.into()));
    }
    obj.insert(
        "duration_ms".to_owned(),
        Value::Number((report.duration.as_millis() as u64).into()),
    );
    obj.insert(
        "verification".to_owned(),
        report
            .verification
            .as_ref()
            .map_or(Value::Null, verification_json),
    );

    Value::Object(obj)
}

fn failure_json(args: &Args, error: &CliError) -> Value {
    json!({
        "schema_version": "1.0",
        "source": display_path(&args.source),
        "outcome": "failed",
        "error_code": error.code().as_str(),
        "error_message": error.to_string(),
    })
}

fn print_json_value(value: &Value) -> CliResult<()> {
    let serialized =
        serde_json::to_string(value).map_err(|source| CliError::JsonSerialize { source })?;
    println!("{serialized}");
    Ok(())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
