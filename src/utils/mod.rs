//! Utility functions and helpers.

pub mod http;
pub mod log;
pub mod text;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a publication date in any of the formats news sources emit.
///
/// Accepts RFC 3339, RFC 2822, naive ISO date-times (taken as UTC) and plain
/// `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_date("2025-03-10T12:30:00-03:00").unwrap();
        assert_eq!(dt.hour(), 15);
        assert_eq!(dt.day(), 10);
    }

    #[test]
    fn test_parse_rfc2822() {
        let dt = parse_date("Mon, 10 Mar 2025 12:30:00 +0000").unwrap();
        assert_eq!(dt.month(), 3);
        assert_eq!(dt.hour(), 12);
    }

    #[test]
    fn test_parse_naive_and_plain_dates() {
        let dt = parse_date("2025-03-10T08:15:42.123456").unwrap();
        assert_eq!(dt.minute(), 15);

        let dt = parse_date("2025-03-10").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2025, 3, 10, 0));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_date("").is_none());
        assert!(parse_date("ontem à noite").is_none());
    }
}
