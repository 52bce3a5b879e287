use clap::ValueEnum;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Instant;
use tracing::{info, warn};

use crate::dates::DateParser;
use crate::domain::{extract_key, KeyMode};
use crate::record::ScanRecord;

pub const MISSING_DATE_LABEL: &str = "undefined";

// Points serialize flat, so no series may be called `date`
pub const DATE_FIELD: &str = "date";

/// Which observations add to a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CountMode {
    /// Every row counts once.
    #[default]
    All,
    /// Only rows whose port status contains the active marker count; other
    /// rows still create a zero bucket for their date.
    Active,
}

#[derive(Debug, Clone)]
pub struct TrendOptions {
    pub key_mode: KeyMode,
    pub count_mode: CountMode,
    pub skip_missing_dates: bool,
    pub active_marker: String,
    pub dates: DateParser,
    pub workers: Option<usize>,
}

impl Default for TrendOptions {
    fn default() -> Self {
        Self {
            key_mode: KeyMode::default(),
            count_mode: CountMode::default(),
            skip_missing_dates: true,
            active_marker: "open".to_string(),
            dates: DateParser::default(),
            workers: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, u32>,
}

impl TrendPoint {
    pub fn value(&self, key: &str) -> Option<u32> {
        self.values.get(key).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrendSeries {
    pub keys: Vec<String>,
    pub points: Vec<TrendPoint>,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

impl TrendSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Default)]
struct Tally {
    counts: HashMap<String, HashMap<String, u32>>,
    first_seen: HashMap<String, usize>,
    skipped: usize,
}

impl Tally {
    fn observe(mut self, index: usize, record: &ScanRecord<'_>, options: &TrendOptions) -> Self {
        let date = match record.scan_date.filter(|d| !d.trim().is_empty()) {
            Some(date) => date,
            None if options.skip_missing_dates => {
                self.skipped += 1;
                return self;
            }
            None => MISSING_DATE_LABEL,
        };

        let key = extract_key(record.domain_name, options.key_mode);
        let hit = match options.count_mode {
            CountMode::All => 1,
            CountMode::Active => u32::from(record.is_active(&options.active_marker)),
        };

        *self
            .counts
            .entry(key)
            .or_default()
            .entry(date.to_string())
            .or_insert(0) += hit;
        self.first_seen
            .entry(date.to_string())
            .and_modify(|seen| *seen = (*seen).min(index))
            .or_insert(index);
        self
    }

    fn merge(mut self, other: Tally) -> Self {
        for (key, dates) in other.counts {
            let bucket = self.counts.entry(key).or_default();
            for (date, count) in dates {
                *bucket.entry(date).or_insert(0) += count;
            }
        }
        for (date, index) in other.first_seen {
            self.first_seen
                .entry(date)
                .and_modify(|seen| *seen = (*seen).min(index))
                .or_insert(index);
        }
        self.skipped += other.skipped;
        self
    }
}

fn tally(records: &[ScanRecord<'_>], options: &TrendOptions) -> Tally {
    let run = || {
        // Per-worker tallies, merged afterwards
        let partials: Vec<Tally> = records
            .par_iter()
            .enumerate()
            .fold(Tally::default, |acc, (index, record)| {
                acc.observe(index, record, options)
            })
            .collect();

        partials.into_iter().fold(Tally::default(), Tally::merge)
    };

    let workers = options.workers.unwrap_or_else(|| {
        let cpu_count = num_cpus::get();
        std::cmp::min(cpu_count, 8)
    });
    info!(action = "configure", component = "trend_aggregation", worker_count = workers, "Using workers for aggregation");

    match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool.install(run),
        Err(e) => {
            warn!(action = "configure", component = "trend_aggregation", worker_count = workers, error = %e, "Falling back to global thread pool");
            run()
        }
    }
}

fn series_name(raw: &str, taken: &BTreeSet<&String>) -> String {
    if raw != DATE_FIELD {
        return raw.to_string();
    }
    let mut name = format!("{}_", raw);
    while taken.iter().any(|key| **key == name) {
        name.push('_');
    }
    name
}

pub fn aggregate(records: &[ScanRecord<'_>], options: &TrendOptions) -> TrendSeries {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "trend_aggregation",
        row_count = records.len(),
        key_mode = ?options.key_mode,
        count_mode = ?options.count_mode,
        "Starting trend aggregation"
    );

    let counted = tally(records, options);

    let raw_keys: BTreeSet<&String> = counted.counts.keys().collect();
    let mut series: Vec<(String, &String)> = raw_keys
        .iter()
        .map(|raw| (series_name(raw, &raw_keys), *raw))
        .collect();
    series.sort();
    let keys: Vec<String> = series.iter().map(|(name, _)| name.clone()).collect();

    let mut dates: Vec<(String, usize)> = counted.first_seen.into_iter().collect();
    dates.sort_by_cached_key(|(date, first_seen)| options.dates.sort_key(date, *first_seen));

    let points: Vec<TrendPoint> = dates
        .into_iter()
        .map(|(date, _)| {
            let values = series
                .iter()
                .map(|(name, raw)| {
                    let count = counted
                        .counts
                        .get(*raw)
                        .and_then(|by_date| by_date.get(&date))
                        .copied()
                        .unwrap_or(0);
                    (name.clone(), count)
                })
                .collect();
            TrendPoint { date, values }
        })
        .collect();

    info!(
        action = "complete",
        component = "trend_aggregation",
        series_count = keys.len(),
        point_count = points.len(),
        rows_skipped = counted.skipped,
        duration_ms = start_time.elapsed().as_millis(),
        "Trend aggregation completed"
    );

    TrendSeries {
        keys,
        points,
        rows_read: records.len(),
        rows_skipped: counted.skipped,
    }
}
