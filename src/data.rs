use chrono::{NaiveDate, NaiveDateTime};
use log::warn;
use thiserror::Error;

pub const GROUPING_SEPARATOR: char = ',';

pub const DATE_WIDTH: usize = 10; // YYYY-MM-DD
pub const TIMESTAMP_WIDTH: usize = 19; // YYYY-MM-DDTHH:MM:SS

const MONTH_OFFSET: usize = 5;
const DAY_OFFSET: usize = 8;
const HOUR_OFFSET: usize = 11;
const MINUTE_OFFSET: usize = 14;
const SECOND_OFFSET: usize = 17;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("'{input}' is not exactly {expected} ASCII characters")]
    BadWidth { input: String, expected: usize },
    #[error("'{input}' has out-of-range components")]
    OutOfRange { input: String },
}

fn strip_grouping(input: &str) -> String {
    input.chars().filter(|c| *c != GROUPING_SEPARATOR).collect()
}

pub fn try_parse_integer(input: &str) -> Result<i64, String> {
    let cleaned = strip_grouping(input);
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return Err(format!("no digits in integer field '{input}'"));
    }
    trimmed
        .parse()
        .map_err(|err| format!("invalid integer field '{input}': {err}"))
}

pub fn try_parse_real(input: &str) -> Result<f64, String> {
    let cleaned = strip_grouping(input);
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return Err(format!("no digits in numeric field '{input}'"));
    }
    trimmed
        .parse()
        .map_err(|err| format!("invalid numeric field '{input}': {err}"))
}

// A zero from these wrappers is indistinguishable from a field that
// legitimately holds zero; callers needing the distinction use try_*.
pub fn parse_integer_or_zero(input: &str) -> i64 {
    try_parse_integer(input).unwrap_or_else(|err| {
        warn!("{err}; substituting 0");
        0
    })
}

pub fn parse_real_or_zero(input: &str) -> f64 {
    try_parse_real(input).unwrap_or_else(|err| {
        warn!("{err}; substituting 0");
        0.0
    })
}

fn component(input: &str, start: usize, len: usize) -> i64 {
    parse_integer_or_zero(&input[start..start + len])
}

/// Fixed-width `YYYY-MM-DD` parse by component offsets. A width violation is
/// structural; component digits that do not form a real date are value-level.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateError> {
    if input.len() != DATE_WIDTH || !input.is_ascii() {
        return Err(DateError::BadWidth {
            input: input.to_string(),
            expected: DATE_WIDTH,
        });
    }
    let year = component(input, 0, 4);
    let month = component(input, MONTH_OFFSET, 2);
    let day = component(input, DAY_OFFSET, 2);
    NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32).ok_or_else(|| {
        DateError::OutOfRange {
            input: input.to_string(),
        }
    })
}

/// Fixed-width `YYYY-MM-DDTHH:MM:SS` parse by component offsets.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, DateError> {
    if input.len() != TIMESTAMP_WIDTH || !input.is_ascii() {
        return Err(DateError::BadWidth {
            input: input.to_string(),
            expected: TIMESTAMP_WIDTH,
        });
    }
    let year = component(input, 0, 4);
    let month = component(input, MONTH_OFFSET, 2);
    let day = component(input, DAY_OFFSET, 2);
    let hour = component(input, HOUR_OFFSET, 2);
    let minute = component(input, MINUTE_OFFSET, 2);
    let second = component(input, SECOND_OFFSET, 2);
    NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
        .and_then(|date| date.and_hms_opt(hour as u32, minute as u32, second as u32))
        .ok_or_else(|| DateError::OutOfRange {
            input: input.to_string(),
        })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn grouped_numerics_shed_separators() {
        assert_eq!(try_parse_integer("250,000,000").unwrap(), 250_000_000);
        assert_eq!(try_parse_real("1,234.5").unwrap(), 1234.5);
    }

    #[test]
    fn numeric_failures_resolve_to_zero() {
        assert_eq!(parse_integer_or_zero("n/a"), 0);
        assert_eq!(parse_real_or_zero(""), 0.0);
        assert!(try_parse_real("n/a").is_err());
    }

    #[test]
    fn date_parses_by_fixed_offsets() {
        let date = parse_date("2022-09-10").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2022, 9, 10));
    }

    #[test]
    fn date_width_violation_is_structural() {
        assert!(matches!(
            parse_date("2022-9-10"),
            Err(DateError::BadWidth { expected: 10, .. })
        ));
        assert!(matches!(
            parse_date("2022-09-10T20:15:56"),
            Err(DateError::BadWidth { .. })
        ));
    }

    #[test]
    fn impossible_date_is_out_of_range() {
        assert!(matches!(
            parse_date("2022-13-01"),
            Err(DateError::OutOfRange { .. })
        ));
    }

    #[test]
    fn timestamp_month_comes_from_month_offset() {
        // The system this replaces read the month digits from the minute
        // offset, silently turning month 09 into 15. Pin the corrected
        // behavior: month 9, minute 15.
        let ts = parse_timestamp("2022-09-10T20:15:56").unwrap();
        assert_eq!(ts.month(), 9);
        assert_eq!(ts.minute(), 15);
        assert_eq!(
            (ts.year(), ts.day(), ts.hour(), ts.second()),
            (2022, 10, 20, 56)
        );
    }

    #[test]
    fn timestamp_width_violation_is_structural() {
        assert!(matches!(
            parse_timestamp("2022-09-10 20:15"),
            Err(DateError::BadWidth { expected: 19, .. })
        ));
    }

    #[test]
    fn formatting_inverts_parsing() {
        assert_eq!(format_date(parse_date("1999-01-02").unwrap()), "1999-01-02");
        assert_eq!(
            format_timestamp(parse_timestamp("2022-09-10T20:15:56").unwrap()),
            "2022-09-10T20:15:56"
        );
    }
}
