use serde::{Deserialize, Serialize};

/// Header names accepted for each logical column, matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub domain: Vec<String>,
    pub scan_date: Vec<String>,
    pub port_status: Vec<String>,
    pub http_status: Vec<String>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        fn names(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        Self {
            domain: names(&["Domain Name", "domainName", "domain", "url"]),
            scan_date: names(&["Scan Date", "scanDate", "date"]),
            port_status: names(&["Port Status", "portStatus", "status"]),
            http_status: names(&["HTTP Status Code", "httpStatus", "http_status"]),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub domain: Option<usize>,
    pub scan_date: Option<usize>,
    pub port_status: Option<usize>,
    pub http_status: Option<usize>,
}

impl ColumnMap {
    pub fn resolve(&self, headers: &[&str]) -> ResolvedColumns {
        let find = |aliases: &[String]| {
            headers.iter().position(|header| {
                let header = header.trim();
                aliases.iter().any(|alias| alias.eq_ignore_ascii_case(header))
            })
        };

        ResolvedColumns {
            domain: find(&self.domain),
            scan_date: find(&self.scan_date),
            port_status: find(&self.port_status),
            http_status: find(&self.http_status),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanRecord<'a> {
    pub domain_name: Option<&'a str>,
    pub scan_date: Option<&'a str>,
    pub port_status: Option<&'a str>,
    pub http_status: Option<&'a str>,
}

impl<'a> ScanRecord<'a> {
    pub fn new(domain_name: &'a str, scan_date: &'a str) -> Self {
        Self {
            domain_name: Some(domain_name),
            scan_date: Some(scan_date),
            ..Default::default()
        }
    }

    pub fn with_port_status(mut self, port_status: &'a str) -> Self {
        self.port_status = Some(port_status);
        self
    }

    pub fn with_http_status(mut self, http_status: &'a str) -> Self {
        self.http_status = Some(http_status);
        self
    }

    pub fn is_active(&self, marker: &str) -> bool {
        let marker = marker.to_lowercase();
        self.port_status
            .map(|status| status.to_lowercase().contains(&marker))
            .unwrap_or(false)
    }
}
