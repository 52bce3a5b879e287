use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::FailurePolicy;
use crate::domain::KeyMode;
use crate::render::OutputFormat;
use crate::trend::CountMode;

#[derive(Parser, Debug)]
#[command(
    name = "scantrend",
    about = "Turn domain scan logs into per-TLD trend series and status breakdowns",
    version,
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Grouping key derived from each domain
    #[arg(short, long, global = true, value_enum)]
    pub key_mode: Option<KeyMode>,

    /// Count every row, or only rows whose port status is open
    #[arg(short, long, global = true, value_enum)]
    pub count_mode: Option<CountMode>,

    /// Bucket rows without a scan date as "undefined" instead of skipping them
    #[arg(long, global = true)]
    pub keep_missing_dates: bool,

    /// Scan date format (chrono syntax or "rfc3339"); repeat to try several
    #[arg(short, long, global = true)]
    pub date_format: Vec<String>,

    /// Port status text that marks a row as active
    #[arg(long, global = true)]
    pub active_marker: Option<String>,

    /// Keep or clear the last good result when a reload fails
    #[arg(long, global = true, value_enum)]
    pub on_parse_failure: Option<FailurePolicy>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Path to a TOML settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of worker threads
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Aggregate a scan log into a date-indexed trend
    Trend {
        /// Scan results CSV file
        file: PathBuf,
    },
    /// Show the HTTP status distribution of a scan log
    Status {
        /// Scan results CSV file
        file: PathBuf,
    },
    /// Read open/refresh/show/status/quit commands from stdin
    Session {
        /// File to open before reading commands
        file: Option<PathBuf>,
    },
}
