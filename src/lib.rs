pub mod analysis;
pub mod args;
pub mod config;
pub mod dates;
pub mod domain;
pub mod ingest;
pub mod palette;
pub mod record;
pub mod render;
pub mod session;
pub mod snapshot;
pub mod status;
pub mod trend;
pub mod utils;

pub use analysis::analyze_scan_file;
pub use args::{Args, Command};
pub use config::{FailurePolicy, Settings};
pub use domain::{extract_key, KeyMode};
pub use record::ScanRecord;
pub use session::Session;
pub use snapshot::Snapshot;
pub use trend::{aggregate, CountMode, TrendOptions, TrendPoint, TrendSeries};
