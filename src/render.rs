use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::snapshot::Snapshot;
use crate::status::StatusSlice;
use crate::utils::format_number;

pub const NO_TREND_DATA: &str = "No data available to display.";
pub const NO_STATUS_DATA: &str = "No data available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Serialize)]
struct TrendPayload<'a> {
    source: String,
    series: &'a [String],
    colors: &'a crate::palette::ColorTable,
    points: &'a [crate::trend::TrendPoint],
    rows_read: usize,
    rows_skipped: usize,
    generated_at: String,
}

pub fn trend_json(snapshot: &Snapshot) -> Result<String> {
    let payload = TrendPayload {
        source: snapshot.source.display().to_string(),
        series: &snapshot.series.keys,
        colors: &snapshot.colors,
        points: &snapshot.series.points,
        rows_read: snapshot.series.rows_read,
        rows_skipped: snapshot.series.rows_skipped,
        generated_at: snapshot.generated_at.to_rfc3339(),
    };
    Ok(serde_json::to_string_pretty(&payload)?)
}

pub fn status_json(slices: &[StatusSlice]) -> Result<String> {
    Ok(serde_json::to_string_pretty(slices)?)
}

pub fn trend_table(snapshot: &Snapshot) -> String {
    let series = &snapshot.series;
    let mut out = format!("\n--- Domain Trend: {} ---\n", snapshot.source.display());
    out.push_str(&format!(
        "Rows read: {} (skipped without date: {})\n",
        format_number(series.rows_read as u64),
        format_number(series.rows_skipped as u64)
    ));

    if series.is_empty() {
        out.push_str(NO_TREND_DATA);
        out.push('\n');
        return out;
    }

    let legend: Vec<String> = series
        .keys
        .iter()
        .map(|key| format!("{} ({})", key, snapshot.colors.color_of(key).unwrap_or("-")))
        .collect();
    out.push_str(&format!("Series: {}\n\n", legend.join(", ")));

    let date_width = series
        .points
        .iter()
        .map(|p| p.date.len())
        .chain(std::iter::once("Date".len()))
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = series
        .keys
        .iter()
        .map(|key| {
            series
                .points
                .iter()
                .map(|p| format_number(u64::from(p.value(key).unwrap_or(0))).len())
                .chain(std::iter::once(key.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    out.push_str(&format!("{:<date_width$}", "Date"));
    for (key, width) in series.keys.iter().zip(&widths) {
        out.push_str(&format!("  {:>width$}", key, width = *width));
    }
    out.push('\n');

    for point in &series.points {
        out.push_str(&format!("{:<date_width$}", point.date));
        for (key, width) in series.keys.iter().zip(&widths) {
            let count = format_number(u64::from(point.value(key).unwrap_or(0)));
            out.push_str(&format!("  {:>width$}", count, width = *width));
        }
        out.push('\n');
    }
    out
}

pub fn status_table(slices: &[StatusSlice]) -> String {
    let mut out = String::from("\n--- HTTP Status Distribution ---\n");
    if slices.is_empty() {
        out.push_str(NO_STATUS_DATA);
        out.push('\n');
        return out;
    }

    let total: u64 = slices.iter().map(|s| u64::from(s.value)).sum();
    for slice in slices {
        let share = u64::from(slice.value) as f64 * 100.0 / total as f64;
        out.push_str(&format!(
            "- {}: {} ({:.1}%)\n",
            slice.name,
            format_number(u64::from(slice.value)),
            share
        ));
    }
    out
}

pub fn print_trend(snapshot: &Snapshot, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print!("{}", trend_table(snapshot)),
        OutputFormat::Json => println!("{}", trend_json(snapshot)?),
    }
    Ok(())
}

pub fn print_status(slices: &[StatusSlice], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print!("{}", status_table(slices)),
        OutputFormat::Json => println!("{}", status_json(slices)?),
    }
    Ok(())
}
