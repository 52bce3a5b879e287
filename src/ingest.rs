use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::record::{ColumnMap, ScanRecord};

#[derive(Debug, Clone, Default)]
pub struct ScanTable {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl ScanTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self, columns: &ColumnMap) -> Vec<ScanRecord<'_>> {
        let headers: Vec<&str> = self.headers.iter().collect();
        let resolved = columns.resolve(&headers);
        self.rows
            .iter()
            .map(|row| {
                let cell = |index: Option<usize>| index.and_then(|i| row.get(i));
                ScanRecord {
                    domain_name: cell(resolved.domain),
                    scan_date: cell(resolved.scan_date),
                    port_status: cell(resolved.port_status),
                    http_status: cell(resolved.http_status),
                }
            })
            .collect()
    }
}

/// Parses CSV text with a header row. Rows with a different field count than
/// the header are rejected.
pub fn parse_scan_csv<R: Read>(reader: R) -> Result<ScanTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .context("Failed to read CSV header row")?
        .clone();

    let mut rows = Vec::new();
    for (index, row) in reader.records().enumerate() {
        // +2: one for the header, one for 1-based numbering
        let row = row.with_context(|| format!("Malformed CSV row at line {}", index + 2))?;
        rows.push(row);
    }

    Ok(ScanTable { headers, rows })
}

pub fn read_scan_file(path: &Path) -> Result<ScanTable> {
    let start_time = Instant::now();
    info!(action = "start", component = "csv_ingest", file_path = ?path, "Reading scan log");

    if !path.exists() {
        anyhow::bail!("Scan file not found: {:?}", path);
    }

    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let table = parse_scan_csv(file).with_context(|| format!("Failed to parse {:?}", path))?;

    info!(
        action = "complete",
        component = "csv_ingest",
        row_count = table.len(),
        column_count = table.headers.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Scan log parsed"
    );
    Ok(table)
}
