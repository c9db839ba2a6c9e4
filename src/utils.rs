//! Value coercion helpers shared by the fragment builder and serialization.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Words accepted as boolean `true`; everything else is `false`.
const TRUTHY_WORDS: [&str; 4] = ["true", "t", "yes", "y"];

/// Formats a DateTime the way dates appear in rendered filters.
///
/// Example output: "2025-06-14T10:03:54.374Z"
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Case-insensitive membership test against `true`, `t`, `yes` and `y`.
pub fn convert_to_boolean(value: &str) -> bool {
    let lowered = value.to_lowercase();
    TRUTHY_WORDS.contains(&lowered.as_str())
}

/// Converts a query value to a date.
///
/// A value made only of an (optionally signed) integer is a Unix timestamp in milliseconds.
/// Anything else is tried as RFC 3339, RFC 2822, `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS` and finally a bare `YYYY-MM-DD`. Offsetless forms are read as UTC.
pub fn convert_to_date(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();

    if is_integer(trimmed) {
        return trimmed
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parses the leading integer of a value, ignoring leading whitespace and any trailing text.
///
/// `"12abc"` gives 12, `"abc12"` gives `None`.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    trimmed[..sign_len + digits_len].parse().ok()
}

fn is_integer(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_convert_to_boolean() {
        assert!(convert_to_boolean("Yes"));
        assert!(convert_to_boolean("TRUE"));
        assert!(convert_to_boolean("t"));
        assert!(convert_to_boolean("y"));
        assert!(!convert_to_boolean("no"));
        assert!(!convert_to_boolean("maybe"));
        assert!(!convert_to_boolean("1"));
    }

    #[test]
    fn test_convert_to_date_from_millis() {
        let dt = convert_to_date("1700000000000").unwrap();
        assert_eq!(dt, Utc.timestamp_millis_opt(1_700_000_000_000).unwrap());
    }

    #[test]
    fn test_convert_to_date_from_strings() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(convert_to_date("2024-03-01T12:30:00Z"), Some(expected));
        assert_eq!(convert_to_date("2024-03-01T14:30:00+02:00"), Some(expected));
        assert_eq!(convert_to_date("2024-03-01 12:30:00"), Some(expected));

        let midnight = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(convert_to_date("2024-03-01"), Some(midnight));
    }

    #[test]
    fn test_convert_to_date_rejects_garbage() {
        assert_eq!(convert_to_date("yesterday"), None);
        assert_eq!(convert_to_date(""), None);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  -7"), Some(-7));
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("abc12"), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn test_format_datetime() {
        let dt = Utc.with_ymd_and_hms(2025, 6, 14, 10, 3, 54).unwrap();
        assert_eq!(format_datetime(dt), "2025-06-14T10:03:54.000Z");
    }
}
