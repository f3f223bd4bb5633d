use chrono::NaiveDateTime;

/// Wire format for every persisted timestamp: minute precision, no timezone.
pub const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a minute-precision timestamp like "2025-03-14 09:30".
pub fn parse_minute(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), MINUTE_FORMAT).ok()
}

/// Format a timestamp in the minute-precision wire format.
pub fn format_minute(dt: NaiveDateTime) -> String {
    dt.format(MINUTE_FORMAT).to_string()
}

/// Serde adapter for minute-precision timestamp fields.
pub mod minute {
    use super::MINUTE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.format(MINUTE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, MINUTE_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_parse_minute() {
        let dt = parse_minute("2025-03-14 09:30").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(dt.hour(), 9);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_minute_trims_whitespace() {
        assert!(parse_minute("  2025-03-14 09:30  ").is_some());
    }

    #[test]
    fn test_parse_minute_rejects_garbage() {
        assert!(parse_minute("not a date").is_none());
        assert!(parse_minute("2025-03-14").is_none());
        assert!(parse_minute("2025-13-40 99:99").is_none());
        assert!(parse_minute("").is_none());
    }

    #[test]
    fn test_format_round_trip() {
        let dt = parse_minute("2024-12-31 23:59").unwrap();
        assert_eq!(format_minute(dt), "2024-12-31 23:59");
    }
}
