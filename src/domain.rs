use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use url::Url;

pub const UNKNOWN_KEY: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    /// Last label only: `sub.example.com` -> `com`
    #[default]
    Tld,
    /// Last two labels: `sub.example.com` -> `example.com`
    Registered,
}

/// Derives the group key for a domain or URL cell.
pub fn extract_key(value: Option<&str>, mode: KeyMode) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return UNKNOWN_KEY.to_string();
    };

    let host = url_host(raw);
    let domain = host.as_deref().unwrap_or(raw);

    let parts: Vec<&str> = domain.split('.').collect();
    if parts.len() > 1 {
        match mode {
            KeyMode::Tld => parts[parts.len() - 1].to_string(),
            KeyMode::Registered => parts[parts.len() - 2..].join("."),
        }
    } else {
        domain.to_string()
    }
}

fn url_host(value: &str) -> Option<String> {
    if !value.contains("://") {
        return None;
    }
    Url::parse(value)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_is_unknown() {
        assert_eq!(extract_key(None, KeyMode::Tld), "Unknown");
        assert_eq!(extract_key(Some(""), KeyMode::Registered), "Unknown");
        assert_eq!(extract_key(Some("   "), KeyMode::Tld), "Unknown");
    }

    #[test]
    fn single_label_is_returned_unchanged() {
        assert_eq!(extract_key(Some("noTLDhere"), KeyMode::Tld), "noTLDhere");
        assert_eq!(extract_key(Some("123"), KeyMode::Registered), "123");
    }

    #[test]
    fn tld_mode_takes_last_label() {
        assert_eq!(extract_key(Some("sub.example.com"), KeyMode::Tld), "com");
        assert_eq!(extract_key(Some("example.xyz"), KeyMode::Tld), "xyz");
    }

    #[test]
    fn registered_mode_takes_last_two_labels() {
        assert_eq!(
            extract_key(Some("sub.example.com"), KeyMode::Registered),
            "example.com"
        );
        assert_eq!(
            extract_key(Some("example.com"), KeyMode::Registered),
            "example.com"
        );
    }

    #[test]
    fn urls_are_reduced_to_host() {
        assert_eq!(
            extract_key(Some("https://www.example.org/login?next=/"), KeyMode::Tld),
            "org"
        );
        assert_eq!(
            extract_key(Some("http://cdn.example.net:8080"), KeyMode::Registered),
            "example.net"
        );
    }

    #[test]
    fn trailing_dot_yields_empty_label() {
        assert_eq!(extract_key(Some("example."), KeyMode::Tld), "");
    }
}
