//! Culture-invariant text layouts for floats and timestamps
//!
//! Stored data was written by a runtime whose invariant float layout differs
//! from Rust's `Display`: shortest round-trip digits, switching to `E+XX`
//! notation for large and small magnitudes. Timestamps use the XML schema
//! UTC form with trimmed fractional seconds.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Digit threshold for switching `f64` to exponent notation
const DOUBLE_PRECISION: i32 = 15;

/// Digit threshold for switching `f32` to exponent notation
const SINGLE_PRECISION: i32 = 7;

/// Format a finite or NaN `f64`
pub(crate) fn format_f64(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    layout(&format!("{value:e}"), DOUBLE_PRECISION)
}

/// Format a finite or NaN `f32`
pub(crate) fn format_f32(value: f32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    layout(&format!("{value:e}"), SINGLE_PRECISION)
}

/// Re-lay a Rust `{:e}` rendering (`-1.25e-7`) in the invariant layout
fn layout(scientific: &str, precision: i32) -> String {
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let digit_count = i32::try_from(digits.len()).unwrap_or(i32::MAX);

    if exponent >= digit_count.max(precision) || exponent < -4 {
        let (first, rest) = digits.split_at(1);
        let mut out = format!("{sign}{first}");
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        let exponent_sign = if exponent < 0 { '-' } else { '+' };
        out.push_str(&format!("E{exponent_sign}{:02}", exponent.abs()));
        return out;
    }

    if exponent >= 0 {
        let integer_len = usize::try_from(exponent).unwrap_or(0) + 1;
        if digits.len() <= integer_len {
            format!("{sign}{digits}{}", "0".repeat(integer_len - digits.len()))
        } else {
            let (integer, fraction) = digits.split_at(integer_len);
            format!("{sign}{integer}.{fraction}")
        }
    } else {
        let zeros = usize::try_from(-exponent - 1).unwrap_or(0);
        format!("{sign}0.{}{digits}", "0".repeat(zeros))
    }
}

/// Years the four-digit `yyyy` layout can hold
pub(crate) const DATETIME_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Format a timestamp as `yyyy-MM-ddTHH:mm:ss[.f…]Z`
///
/// Returns `None` for years outside [`DATETIME_YEARS`].
pub(crate) fn format_datetime(value: &DateTime<Utc>) -> Option<String> {
    if !DATETIME_YEARS.contains(&value.year()) {
        return None;
    }
    let mut out = value.format("%Y-%m-%dT%H:%M:%S").to_string();
    let nanos = value.timestamp_subsec_nanos() % 1_000_000_000;
    if nanos > 0 {
        let fraction = format!("{nanos:09}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out.push('Z');
    Some(out)
}

/// Parse a timestamp, normalizing to UTC
///
/// Accepts RFC 3339 with any offset, offset-less timestamps (read as UTC)
/// and bare dates (midnight UTC).
pub(crate) fn parse_datetime(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let text = text.trim();
    let rfc3339 = match DateTime::parse_from_rfc3339(text) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(err) => err,
    };
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::default()).and_utc());
    }
    Err(rfc3339)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn doubles_in_plain_range() {
        assert_eq!(format_f64(1.0), "1");
        assert_eq!(format_f64(-2.5), "-2.5");
        assert_eq!(format_f64(0.1), "0.1");
        assert_eq!(format_f64(123.456), "123.456");
        assert_eq!(format_f64(0.0001), "0.0001");
        assert_eq!(format_f64(100_000_000_000_000.0), "100000000000000");
    }

    #[test]
    fn doubles_switch_to_exponent() {
        assert_eq!(format_f64(1e15), "1E+15");
        assert_eq!(format_f64(0.00001), "1E-05");
        assert_eq!(format_f64(-1.5e-7), "-1.5E-07");
        assert_eq!(format_f64(f64::MAX), "1.7976931348623157E+308");
    }

    #[test]
    fn long_mantissa_stays_plain() {
        assert_eq!(format_f64(1_234_567_890_123_456.0), "1234567890123456");
    }

    #[test]
    fn singles() {
        assert_eq!(format_f32(0.1), "0.1");
        assert_eq!(format_f32(16_777_216.0), "16777216");
        assert_eq!(format_f32(1e7), "1E+07");
        assert_eq!(format_f32(f32::NAN), "NaN");
    }

    #[test]
    fn datetime_without_fraction() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(format_datetime(&dt).as_deref(), Some("2024-03-09T14:05:00Z"));
    }

    #[test]
    fn datetime_fraction_is_trimmed() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap()
            + chrono::Duration::milliseconds(120);
        assert_eq!(format_datetime(&dt).as_deref(), Some("2024-03-09T14:05:00.12Z"));
    }

    #[test]
    fn datetime_offsets_normalize_to_utc() {
        let parsed = parse_datetime("2024-03-09T16:05:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap());
    }

    #[test]
    fn datetime_without_zone_is_utc() {
        let parsed = parse_datetime("2024-03-09T14:05:00.5").unwrap();
        assert_eq!(format_datetime(&parsed).as_deref(), Some("2024-03-09T14:05:00.5Z"));
    }

    #[test]
    fn bare_date_is_midnight() {
        let parsed = parse_datetime("2024-03-09").unwrap();
        assert_eq!(format_datetime(&parsed).as_deref(), Some("2024-03-09T00:00:00Z"));
    }

    #[test]
    fn years_beyond_four_digits_do_not_format() {
        let late = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        let early = Utc.with_ymd_and_hms(0, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(format_datetime(&late), None);
        assert_eq!(format_datetime(&early), None);
    }

    #[test]
    fn garbage_datetime_fails() {
        assert!(parse_datetime("next tuesday").is_err());
    }
}
