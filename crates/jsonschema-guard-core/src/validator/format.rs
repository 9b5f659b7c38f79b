//! String `format` assertions.
//!
//! The formats below are asserted; any other `format` value is an
//! annotation and never reaches this module.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveTime};
use regex::Regex;
use url::Url;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    Email,
    Uri,
    Uuid,
    DateTime,
    Date,
    Time,
    Ipv4,
    Ipv6,
}

impl StringFormat {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "email" => Some(StringFormat::Email),
            "uri" | "url" => Some(StringFormat::Uri),
            "uuid" => Some(StringFormat::Uuid),
            "date-time" => Some(StringFormat::DateTime),
            "date" => Some(StringFormat::Date),
            "time" => Some(StringFormat::Time),
            "ipv4" => Some(StringFormat::Ipv4),
            "ipv6" => Some(StringFormat::Ipv6),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StringFormat::Email => "email",
            StringFormat::Uri => "uri",
            StringFormat::Uuid => "uuid",
            StringFormat::DateTime => "date-time",
            StringFormat::Date => "date",
            StringFormat::Time => "time",
            StringFormat::Ipv4 => "ipv4",
            StringFormat::Ipv6 => "ipv6",
        }
    }

    pub fn matches(&self, s: &str) -> bool {
        match self {
            StringFormat::Email => email_re().is_match(s),
            StringFormat::Uri => Url::parse(s).is_ok(),
            // Hyphenated form only; `Uuid` also parses simple, braced and urn forms.
            StringFormat::Uuid => s.len() == 36 && Uuid::try_parse(s).is_ok(),
            StringFormat::DateTime => DateTime::parse_from_rfc3339(s).is_ok(),
            StringFormat::Date => s.len() == 10 && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok(),
            StringFormat::Time => is_time(s),
            StringFormat::Ipv4 => s.parse::<Ipv4Addr>().is_ok(),
            StringFormat::Ipv6 => s.parse::<Ipv6Addr>().is_ok(),
        }
    }
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"))
}

/// RFC 3339 `full-time`, with the offset optional.
fn is_time(s: &str) -> bool {
    if s.get(2..3) != Some(":") {
        return false;
    }
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f").is_ok()
        || DateTime::parse_from_rfc3339(&format!("1970-01-01T{s}")).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(StringFormat::Email.matches("ada@example.com"));
        assert!(!StringFormat::Email.matches("ada@example"));
        assert!(!StringFormat::Email.matches("not an email"));
    }

    #[test]
    fn test_uri_uses_url_parser() {
        assert!(StringFormat::Uri.matches("https://example.com/path?q=1"));
        assert!(!StringFormat::Uri.matches("/relative/path"));
    }

    #[test]
    fn test_uuid() {
        assert!(StringFormat::Uuid.matches("123e4567-e89b-12d3-a456-426614174000"));
        assert!(!StringFormat::Uuid.matches("123e4567e89b12d3a456426614174000"));
        assert!(!StringFormat::Uuid.matches("{123e4567-e89b-12d3-a456-426614174000}"));
        assert!(!StringFormat::Uuid.matches("123e4567-e89b-12d3-a456-42661417400g"));
    }

    #[test]
    fn test_dates() {
        assert!(StringFormat::Date.matches("2024-02-29"));
        assert!(!StringFormat::Date.matches("2023-02-29"));
        assert!(!StringFormat::Date.matches("2024-13-01"));
        assert!(!StringFormat::Date.matches("2024-2-29"));
        assert!(!StringFormat::DateTime.matches("2023-02-29T00:00:00Z"));
        assert!(StringFormat::DateTime.matches("2024-05-01T12:30:00Z"));
        assert!(StringFormat::DateTime.matches("2024-05-01T12:30:00.123+02:00"));
        assert!(!StringFormat::DateTime.matches("2024-05-01T12:30:00"));
        assert!(StringFormat::Time.matches("23:59:59"));
        assert!(StringFormat::Time.matches("08:15:00.5+01:00"));
        assert!(!StringFormat::Time.matches("24:00:00"));
        assert!(!StringFormat::Time.matches("8:15:00"));
    }

    #[test]
    fn test_ip_addresses() {
        assert!(StringFormat::Ipv4.matches("192.168.0.1"));
        assert!(!StringFormat::Ipv4.matches("256.0.0.1"));
        assert!(StringFormat::Ipv6.matches("::1"));
        assert!(!StringFormat::Ipv6.matches("192.168.0.1"));
    }

    #[test]
    fn test_keyword_round_trip() {
        for kw in ["email", "uri", "uuid", "date-time", "date", "time", "ipv4", "ipv6"] {
            assert_eq!(StringFormat::from_keyword(kw).map(|f| f.as_str()), Some(kw));
        }
        assert_eq!(StringFormat::from_keyword("url"), Some(StringFormat::Uri));
        assert_eq!(StringFormat::from_keyword("hostname"), None);
    }
}
