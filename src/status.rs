use serde::Serialize;
use std::collections::HashMap;

use crate::domain::UNKNOWN_KEY;
use crate::record::ScanRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSlice {
    pub name: String,
    pub value: u32,
}

pub fn status_distribution(records: &[ScanRecord<'_>]) -> Vec<StatusSlice> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for record in records {
        let label = record
            .http_status
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_KEY);
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut slices: Vec<StatusSlice> = counts
        .into_iter()
        .map(|(name, value)| StatusSlice {
            name: name.to_string(),
            value,
        })
        .collect();
    slices.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    slices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_statuses_largest_first() {
        let records = [
            ScanRecord::new("a.com", "2024-01-01").with_http_status("404"),
            ScanRecord::new("b.com", "2024-01-01").with_http_status("200"),
            ScanRecord::new("c.com", "2024-01-01").with_http_status("200"),
            ScanRecord::new("d.com", "2024-01-01").with_http_status(""),
            ScanRecord::new("e.com", "2024-01-01"),
        ];

        let slices = status_distribution(&records);
        let flat: Vec<(&str, u32)> = slices.iter().map(|s| (s.name.as_str(), s.value)).collect();
        assert_eq!(flat, [("200", 2), ("Unknown", 2), ("404", 1)]);
    }

    #[test]
    fn empty_input_has_no_slices() {
        assert!(status_distribution(&[]).is_empty());
    }
}
