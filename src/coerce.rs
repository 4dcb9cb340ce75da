//! Scalar coercion of resolved JSON nodes.
//!
//! Once the navigator has resolved a node, these helpers turn it into the
//! semantic type an assembler actually needs: plain scalars with path context
//! on failure, track durations, relative timestamps, and localized counts.
//! Every coercion carries the path expression it was resolved from so a
//! failure pinpoints the exact lookup that broke.

use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};
use serde_json::Value;
use std::time::Duration;

use crate::error::{Result, YtMusicError};

/// Human-readable JSON kind of a node, used in mismatch errors.
pub fn json_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(path: &str, expected: &'static str, node: &Value) -> YtMusicError {
    YtMusicError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: json_kind(node),
    }
}

/// Coerce a node to a string slice.
pub fn as_str<'a>(node: &'a Value, path: &str) -> Result<&'a str> {
    node.as_str().ok_or_else(|| mismatch(path, "string", node))
}

/// Coerce a node to a boolean.
pub fn as_bool(node: &Value, path: &str) -> Result<bool> {
    node.as_bool().ok_or_else(|| mismatch(path, "boolean", node))
}

/// Coerce a node to an array slice.
pub fn as_array<'a>(node: &'a Value, path: &str) -> Result<&'a [Value]> {
    node.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| mismatch(path, "array", node))
}

/// Parse a track duration in `H:MM:SS` or `M:SS` form.
///
/// Any token without a colon separator is invalid.
pub fn parse_duration(text: &str, path: &str) -> Result<Duration> {
    let seconds = (|| {
        let parts: Vec<&str> = text.split(':').collect();
        match parts.as_slice() {
            [m, s] => Some(clock_part(m)? * 60 + clock_part(s)?),
            [h, m, s] => Some((clock_part(h)? * 60 + clock_part(m)?) * 60 + clock_part(s)?),
            _ => None,
        }
    })()
    .ok_or_else(|| YtMusicError::TypeMismatch {
        path: path.to_string(),
        expected: "duration (H:MM:SS or M:SS)",
        found: "string",
    })?;

    Ok(Duration::from_secs(seconds))
}

fn clock_part(part: &str) -> Option<u64> {
    part.trim().parse().ok()
}

/// Parse a date that is either absolute (`2024-01-01`, `Sep 23, 2014`) or
/// relative (`3 days ago`).
///
/// The relative form is `"<N> <unit> ago"` with the unit disambiguated by its
/// first letter (seconds, minutes, hours, days); the result is `now − N·unit`.
/// `now` is an explicit parameter so parsing stays deterministic under test;
/// the core never reads the wall clock.
pub fn parse_relative_date(text: &str, now: DateTime<Utc>, path: &str) -> Result<DateTime<Utc>> {
    let invalid = || YtMusicError::TypeMismatch {
        path: path.to_string(),
        expected: "date or \"<N> <unit> ago\"",
        found: "string",
    };

    if !text.contains(" ago") {
        return parse_absolute_date(text).ok_or_else(invalid);
    }

    let mut parts = text.split_whitespace();
    let amount: i64 = parts
        .next()
        .and_then(|n| n.parse().ok())
        .ok_or_else(invalid)?;
    let unit = parts.next().ok_or_else(invalid)?;

    let span = match unit.chars().next() {
        Some('d') => ChronoDuration::days(amount),
        Some('h') => ChronoDuration::hours(amount),
        Some('m') => ChronoDuration::minutes(amount),
        Some('s') => ChronoDuration::seconds(amount),
        _ => return Err(invalid()),
    };

    Ok(now - span)
}

fn parse_absolute_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    // Date-only forms the service uses: ISO and "Sep 23, 2014".
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%b %d, %Y"))
        .ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Parse a localized count like `"12,345 songs"` into its integer.
///
/// Takes the leading whitespace-delimited token and strips comma group
/// separators. Any other non-digit character fails the parse: an abbreviated
/// count like `"1.2M"` is schema drift, not a number to approximate.
pub fn parse_leading_count(text: &str, path: &str) -> Result<u64> {
    let token = text.split_whitespace().next().unwrap_or("");

    token
        .replace(',', "")
        .parse()
        .map_err(|_| YtMusicError::TypeMismatch {
            path: path.to_string(),
            expected: "leading count token",
            found: "string",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_as_str_mismatch_carries_path() {
        let node = json!(42);
        let err = as_str(&node, "title.runs[0].text").unwrap_err();
        match err {
            YtMusicError::TypeMismatch {
                path,
                expected,
                found,
            } => {
                assert_eq!(path, "title.runs[0].text");
                assert_eq!(expected, "string");
                assert_eq!(found, "number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_duration_minutes_seconds() {
        assert_eq!(
            parse_duration("3:24", "d").unwrap(),
            Duration::from_secs(204)
        );
    }

    #[test]
    fn test_parse_duration_hours() {
        assert_eq!(
            parse_duration("1:02:03", "d").unwrap(),
            Duration::from_secs(3723)
        );
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("", "d").is_err());
        assert!(parse_duration("abc", "d").is_err());
        assert!(parse_duration("204", "d").is_err());
    }

    #[test]
    fn test_parse_relative_days() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let parsed = parse_relative_date("3 days ago", now, "p").unwrap();
        assert_eq!(now - parsed, ChronoDuration::seconds(259_200));
    }

    #[test]
    fn test_parse_relative_minutes() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let parsed = parse_relative_date("10 minutes ago", now, "p").unwrap();
        assert_eq!(now - parsed, ChronoDuration::seconds(600));
    }

    #[test]
    fn test_parse_absolute_date_ignores_now() {
        let now_a = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let now_b = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();

        let a = parse_relative_date("2024-01-01", now_a, "p").unwrap();
        let b = parse_relative_date("2024-01-01", now_b, "p").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_month_name_date() {
        let now = Utc::now();
        let parsed = parse_relative_date("Sep 23, 2014", now, "p").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2014, 9, 23, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_leading_count() {
        assert_eq!(parse_leading_count("12,345 songs", "c").unwrap(), 12_345);
        assert_eq!(parse_leading_count("1 song", "c").unwrap(), 1);
    }

    #[test]
    fn test_parse_leading_count_invalid() {
        assert!(parse_leading_count("songs", "c").is_err());
        assert!(parse_leading_count("", "c").is_err());
    }

    #[test]
    fn test_parse_leading_count_rejects_abbreviated() {
        // "1.2M" must not collapse to 12.
        assert!(parse_leading_count("1.2M songs", "c").is_err());
        assert!(parse_leading_count("3K views", "c").is_err());
    }

    #[test]
    fn test_as_bool() {
        assert!(as_bool(&json!(true), "b").unwrap());
        let err = as_bool(&json!("false"), "b").unwrap_err();
        match err {
            YtMusicError::TypeMismatch {
                path,
                expected,
                found,
            } => {
                assert_eq!(path, "b");
                assert_eq!(expected, "boolean");
                assert_eq!(found, "string");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
