use anyhow::Result;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::config::Settings;
use crate::ingest;
use crate::snapshot::Snapshot;

pub fn analyze_scan_file(path: &Path, settings: &Settings) -> Result<Snapshot> {
    let total_start_time = Instant::now();
    info!(action = "start", component = "analysis", file_path = ?path, "Starting scan log analysis");

    let table = ingest::read_scan_file(path)?;
    let snapshot = Snapshot::build(path.to_path_buf(), &table, settings);

    info!(
        action = "complete",
        component = "analysis",
        series_count = snapshot.series.keys.len(),
        point_count = snapshot.series.points.len(),
        status_count = snapshot.status.len(),
        duration_ms = total_start_time.elapsed().as_millis(),
        "Analysis completed successfully"
    );
    Ok(snapshot)
}
