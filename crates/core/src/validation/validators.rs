//! One validator per primitive parameter type.
//!
//! Each takes the parameter name (used in error messages), the raw string the
//! client sent and optional bounds, and returns the parsed value or a
//! [`CoreError::Validation`]. None of them touch storage.

use std::fmt::Display;

use chrono::{NaiveDate, Utc};

use crate::error::CoreError;
use crate::types::Date;

/// Default bounds on string length.
pub const DEFAULT_STR_LENGTH: (usize, usize) = (1, 64);

/// Default lower bound for dates; the upper default is today.
pub const DEFAULT_EARLIEST_DATE: &str = "1900-01-01";

fn invalid(name: &str, detail: impl Display) -> CoreError {
    CoreError::Validation(format!("parameter {name}: {detail}"))
}

/// Render an optional bound the way an unbounded side reads: `-inf` / `inf`.
fn show_bound<T: Display>(bound: Option<T>, unbounded: &str) -> String {
    bound.map_or_else(|| unbounded.to_string(), |b| b.to_string())
}

/// Parse `raw` as an integer and check it falls within `[lower, upper]`.
pub fn validate_int(
    name: &str,
    raw: &str,
    lower: Option<i64>,
    upper: Option<i64>,
) -> Result<i64, CoreError> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid(name, format!("value {raw} doesn't parse as an integer")))?;

    let above = lower.map_or(true, |lo| lo <= value);
    let below = upper.map_or(true, |hi| value <= hi);
    if !(above && below) {
        return Err(invalid(
            name,
            format!(
                "supplied integer value '{value}' does not fall between [{}, {}]",
                show_bound(lower, "-inf"),
                show_bound(upper, "inf"),
            ),
        ));
    }
    Ok(value)
}

/// Parse `raw` as a float and check it falls within `[lower, upper]`.
///
/// NaN never satisfies the bounds check.
pub fn validate_float(
    name: &str,
    raw: &str,
    lower: Option<f64>,
    upper: Option<f64>,
) -> Result<f64, CoreError> {
    let value: f64 = raw.trim().parse().map_err(|_| {
        invalid(
            name,
            format!("value {raw} doesn't parse as a floating point number"),
        )
    })?;

    let lo = lower.unwrap_or(f64::NEG_INFINITY);
    let hi = upper.unwrap_or(f64::INFINITY);
    if !(lo <= value && value <= hi) {
        return Err(invalid(
            name,
            format!(
                "supplied float value '{value}' does not fall between [{}, {}]",
                show_bound(lower, "-inf"),
                show_bound(upper, "inf"),
            ),
        ));
    }
    Ok(value)
}

/// Check the character length of `raw` falls within `[lower, upper]`
/// (default `[1, 64]`).
pub fn validate_str(
    name: &str,
    raw: &str,
    lower: Option<usize>,
    upper: Option<usize>,
) -> Result<String, CoreError> {
    let lower = lower.unwrap_or(DEFAULT_STR_LENGTH.0);
    let upper = upper.unwrap_or(DEFAULT_STR_LENGTH.1);
    let length = raw.chars().count();

    if (lower..=upper).contains(&length) {
        return Ok(raw.to_string());
    }
    if length == 0 {
        Err(invalid(name, "may not be zero-length"))
    } else if lower == upper {
        Err(invalid(
            name,
            format!("the length of supplied string value '{raw}' is not equal to {lower}"),
        ))
    } else {
        Err(invalid(
            name,
            format!(
                "the length of supplied string value '{raw}' does not fall between [{lower}, {upper}]"
            ),
        ))
    }
}

/// Parse `raw` as a boolean, case-insensitively.
pub fn validate_bool(name: &str, raw: &str) -> Result<bool, CoreError> {
    match raw.to_lowercase().as_str() {
        "true" | "t" | "yes" | "1" => Ok(true),
        "false" | "f" | "no" | "0" => Ok(false),
        _ => Err(invalid(
            name,
            format!("the supplied parameter value '{raw}' does not parse as either True or False"),
        )),
    }
}

/// Parse `raw` as an ISO-8601 calendar date and check it falls within
/// `[lower, upper]` (default `[1900-01-01, today]`).
///
/// Bounds are themselves ISO dates; a malformed bound is an internal error.
pub fn validate_date(
    name: &str,
    raw: &str,
    lower: Option<&str>,
    upper: Option<&str>,
) -> Result<Date, CoreError> {
    let value = parse_iso_date(raw).map_err(|detail| {
        invalid(name, format!("value {raw} doesn't parse as a date{detail}"))
    })?;

    let lower = bound_date(lower.unwrap_or(DEFAULT_EARLIEST_DATE))?;
    let upper = match upper {
        Some(upper) => bound_date(upper)?,
        None => Utc::now().date_naive(),
    };
    if !(lower <= value && value <= upper) {
        return Err(invalid(
            name,
            format!("supplied date value {raw} does not fall within [{lower}, {upper}]"),
        ));
    }
    Ok(value)
}

/// Strict `YYYY-MM-DD`. The error carries a `, reason` suffix when the shape
/// was right but the date does not exist.
fn parse_iso_date(raw: &str) -> Result<Date, String> {
    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(String::new());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!(", {e}"))
}

fn bound_date(bound: &str) -> Result<Date, CoreError> {
    parse_iso_date(bound)
        .map_err(|_| CoreError::Internal(format!("date bound '{bound}' is not an ISO date")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn message(err: CoreError) -> String {
        match err {
            CoreError::Validation(msg) => msg,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    // -- integers --

    #[test]
    fn int_within_bounds_is_returned() {
        for x in [-5_i64, 0, 1, 7, 10] {
            assert_eq!(validate_int("p", &x.to_string(), Some(-5), Some(10)).unwrap(), x);
        }
    }

    #[test]
    fn int_outside_bounds_fails() {
        for x in [-6_i64, 11, i64::MIN, i64::MAX] {
            let err = validate_int("p", &x.to_string(), Some(-5), Some(10)).unwrap_err();
            assert!(message(err).contains("does not fall between [-5, 10]"));
        }
    }

    #[test]
    fn int_defaults_are_unbounded() {
        assert_eq!(validate_int("p", "-9000000000", None, None).unwrap(), -9_000_000_000);
        let err = validate_int("p", "3", Some(5), None).unwrap_err();
        assert_eq!(
            message(err),
            "parameter p: supplied integer value '3' does not fall between [5, inf]"
        );
    }

    #[test]
    fn int_unparsable_fails() {
        for raw in ["", "abc", "4.5", "12abc"] {
            assert_matches!(validate_int("p", raw, None, None), Err(CoreError::Validation(_)));
        }
        assert_eq!(validate_int("p", " 42 ", None, None).unwrap(), 42);
    }

    #[test]
    fn int_beyond_i64_is_a_parse_failure() {
        let err = validate_int("p", "99999999999999999999", None, None).unwrap_err();
        assert_eq!(
            message(err),
            "parameter p: value 99999999999999999999 doesn't parse as an integer"
        );
    }

    // -- floats --

    #[test]
    fn float_parses_and_checks_bounds() {
        assert_eq!(validate_float("profit", "12.5", Some(0.0), None).unwrap(), 12.5);
        assert_eq!(validate_float("profit", "3", None, None).unwrap(), 3.0);
        let err = validate_float("profit", "-0.5", Some(0.0), None).unwrap_err();
        assert!(message(err).starts_with("parameter profit: supplied float value '-0.5'"));
    }

    #[test]
    fn float_nan_and_garbage_fail() {
        assert_matches!(validate_float("p", "NaN", None, None), Err(CoreError::Validation(_)));
        let err = validate_float("p", "twelve", None, None).unwrap_err();
        assert_eq!(
            message(err),
            "parameter p: value twelve doesn't parse as a floating point number"
        );
    }

    // -- strings --

    #[test]
    fn str_within_default_length_is_returned() {
        assert_eq!(validate_str("title", "Dune", None, None).unwrap(), "Dune");
        let max = "x".repeat(64);
        assert_eq!(validate_str("title", &max, None, None).unwrap(), max);
    }

    #[test]
    fn str_zero_length_message() {
        let err = validate_str("title", "", None, None).unwrap_err();
        assert_eq!(message(err), "parameter title: may not be zero-length");
    }

    #[test]
    fn str_exact_length_message() {
        let err = validate_str("phone_number", "555", Some(11), Some(11)).unwrap_err();
        assert_eq!(
            message(err),
            "parameter phone_number: the length of supplied string value '555' is not equal to 11"
        );
    }

    #[test]
    fn str_range_message() {
        let long = "x".repeat(65);
        let err = validate_str("title", &long, None, None).unwrap_err();
        assert!(message(err).ends_with("does not fall between [1, 64]"));
    }

    #[test]
    fn str_length_counts_characters() {
        assert_eq!(validate_str("p", "ßü", Some(2), Some(2)).unwrap(), "ßü");
    }

    // -- booleans --

    #[test]
    fn bool_accepts_every_spelling_case_insensitively() {
        for raw in ["true", "T", "Yes", "1", "TRUE"] {
            assert!(validate_bool("p", raw).unwrap(), "{raw}");
        }
        for raw in ["false", "F", "NO", "0", "False"] {
            assert!(!validate_bool("p", raw).unwrap(), "{raw}");
        }
    }

    #[test]
    fn bool_rejects_anything_else() {
        for raw in ["", "y", "2", "truthy", "nope"] {
            assert_matches!(validate_bool("p", raw), Err(CoreError::Validation(_)));
        }
    }

    // -- dates --

    #[test]
    fn date_within_bounds_is_returned() {
        let date = validate_date("due_date", "2024-02-29", None, None).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn impossible_date_fails_regardless_of_bounds() {
        for (lo, hi) in [(None, None), (Some("0001-01-01"), Some("9999-12-31"))] {
            let err = validate_date("p", "2024-02-30", lo, hi).unwrap_err();
            assert!(message(err).starts_with("parameter p: value 2024-02-30 doesn't parse as a date"));
        }
    }

    #[test]
    fn malformed_date_fails() {
        for raw in ["", "2024-1-05", "20240105", "yesterday", "2024/01/05"] {
            assert_matches!(validate_date("p", raw, None, None), Err(CoreError::Validation(_)));
        }
    }

    #[test]
    fn date_outside_bounds_fails() {
        let err = validate_date("p", "1899-12-31", None, None).unwrap_err();
        assert!(message(err).contains("does not fall within [1900-01-01, "));

        let err = validate_date("p", "2100-01-01", Some("1990-01-01"), Some("2099-12-31")).unwrap_err();
        assert_eq!(
            message(err),
            "parameter p: supplied date value 2100-01-01 does not fall within [1990-01-01, 2099-12-31]"
        );
    }

    #[test]
    fn date_default_upper_bound_is_today() {
        let tomorrow = Utc::now().date_naive().succ_opt().unwrap();
        assert_matches!(
            validate_date("p", &tomorrow.to_string(), None, None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn malformed_bound_is_internal() {
        assert_matches!(
            validate_date("p", "2000-01-01", Some("soon"), None),
            Err(CoreError::Internal(_))
        );
    }
}
