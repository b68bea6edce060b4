//! The record value handed from the engine to an output writer.

use crate::fields::Fields;
use crate::types::Level;
use chrono::{DateTime, Local};
use std::fmt::Write as _;

/// RFC 3339 timestamps with second precision (the default).
pub const TIME_FORMAT_RFC3339: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// RFC 3339 timestamps with nanosecond precision.
pub const TIME_FORMAT_RFC3339_NANO: &str = "%Y-%m-%dT%H:%M:%S%.9f%:z";

/// Unix seconds.
pub const TIME_FORMAT_UNIX: &str = "%s";

/// A single log record, fully resolved.
///
/// `fields` already holds the logger's attached fields merged with the
/// call-site fields (call-site wins on duplicate keys).
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub time: DateTime<Local>,
    pub level: Level,
    pub message: &'a str,
    pub error: Option<String>,
    pub fields: Fields,
}

/// Render `time` with a strftime-style `format`.
///
/// A format chrono cannot render falls back to RFC 3339 instead of failing
/// the write.
pub fn format_time(time: &DateTime<Local>, format: &str) -> String {
    let mut rendered = String::new();
    if write!(rendered, "{}", time.format(format)).is_err() {
        return time.to_rfc3339();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn test_rfc3339_layout() {
        let rendered = format_time(&fixed(), TIME_FORMAT_RFC3339);
        assert!(rendered.starts_with("2024-03-09T14:05:07"));
    }

    #[test]
    fn test_nano_and_unix_layouts() {
        let nano = format_time(&fixed(), TIME_FORMAT_RFC3339_NANO);
        assert!(nano.starts_with("2024-03-09T14:05:07.000000000"));
        assert_eq!(
            format_time(&fixed(), TIME_FORMAT_UNIX),
            fixed().timestamp().to_string()
        );
    }

    #[test]
    fn test_literal_format_is_passed_through() {
        assert_eq!(format_time(&fixed(), "TS"), "TS");
    }

    #[test]
    fn test_invalid_format_falls_back() {
        let rendered = format_time(&fixed(), "%Q");
        assert_eq!(rendered, fixed().to_rfc3339());
    }
}
