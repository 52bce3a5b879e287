use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::Settings;
use crate::ingest::ScanTable;
use crate::palette::ColorTable;
use crate::status::{status_distribution, StatusSlice};
use crate::trend::{aggregate, TrendSeries};

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub source: PathBuf,
    pub series: TrendSeries,
    pub colors: ColorTable,
    pub status: Vec<StatusSlice>,
    pub generated_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn build(source: PathBuf, table: &ScanTable, settings: &Settings) -> Self {
        let records = table.records(&settings.columns);
        let series = aggregate(&records, &settings.trend_options());
        let colors = ColorTable::assign(&series.keys);
        let status = status_distribution(&records);

        Self {
            source,
            series,
            colors,
            status,
            generated_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::parse_scan_csv;

    #[test]
    fn builds_trend_colors_and_status_together() {
        let table = parse_scan_csv(
            "Domain Name,Scan Date,Port Status,HTTP Status Code\n\
             example.com,2024-09-13,Port 80 Open,404\n\
             example.xyz,2024-09-12,Port 80 Closed,\n"
                .as_bytes(),
        )
        .unwrap();

        let snapshot = Snapshot::build(PathBuf::from("scan_results.csv"), &table, &Settings::default());

        assert_eq!(snapshot.series.keys, ["com", "xyz"]);
        assert_eq!(snapshot.series.points[0].date, "2024-09-12");
        assert_eq!(snapshot.colors.color_of("com"), Some("#ff0000"));
        assert_eq!(snapshot.colors.color_of("xyz"), Some("#00ff00"));
        assert_eq!(snapshot.status.len(), 2);
        assert!(!snapshot.is_empty());
    }
}
