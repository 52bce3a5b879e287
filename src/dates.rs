use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

pub const RFC3339: &str = "rfc3339";

pub const DEFAULT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y-%m-%d %H:%M:%S", RFC3339];

#[derive(Debug, Clone)]
pub struct DateParser {
    formats: Vec<String>,
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect())
    }
}

impl DateParser {
    pub fn new(formats: Vec<String>) -> Self {
        Self { formats }
    }

    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    pub fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        self.formats.iter().find_map(|format| {
            if format.eq_ignore_ascii_case(RFC3339) {
                return DateTime::parse_from_rfc3339(text)
                    .ok()
                    .map(|dt| dt.naive_utc());
            }
            NaiveDateTime::parse_from_str(text, format).ok().or_else(|| {
                NaiveDate::parse_from_str(text, format)
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
        })
    }

    pub fn sort_key(&self, text: &str, first_seen: usize) -> DateSortKey {
        let parsed = self.parse(text);
        DateSortKey {
            unparsed: parsed.is_none(),
            parsed,
            first_seen,
        }
    }
}

/// Orders parsed dates chronologically, then unparseable ones by first appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateSortKey {
    unparsed: bool,
    parsed: Option<NaiveDateTime>,
    first_seen: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_formats() {
        let parser = DateParser::default();
        let midnight = NaiveDate::from_ymd_opt(2024, 9, 13)
            .unwrap()
            .and_time(NaiveTime::MIN);

        assert_eq!(parser.parse("2024-09-13"), Some(midnight));
        assert_eq!(
            parser.parse("2024-09-13 14:32:00"),
            NaiveDate::from_ymd_opt(2024, 9, 13)
                .unwrap()
                .and_hms_opt(14, 32, 0)
        );
        assert_eq!(parser.parse("2024-09-13T00:00:00Z"), Some(midnight));
    }

    #[test]
    fn rejects_text_outside_configured_formats() {
        let parser = DateParser::default();
        assert_eq!(parser.parse("09/13/2024"), None);
        assert_eq!(parser.parse("yesterday"), None);

        let us = DateParser::new(vec!["%m/%d/%Y".to_string()]);
        assert!(us.parse("09/13/2024").is_some());
        assert!(us.parse("2024-09-13").is_none());
    }

    #[test]
    fn unparsed_dates_sort_last_in_first_seen_order() {
        let parser = DateParser::default();
        let mut keys = vec![
            (parser.sort_key("garbage", 0), "garbage"),
            (parser.sort_key("2024-01-02", 1), "2024-01-02"),
            (parser.sort_key("undefined", 2), "undefined"),
            (parser.sort_key("2024-01-01", 3), "2024-01-01"),
        ];
        keys.sort();
        let order: Vec<&str> = keys.into_iter().map(|(_, label)| label).collect();
        assert_eq!(order, ["2024-01-01", "2024-01-02", "garbage", "undefined"]);
    }
}
