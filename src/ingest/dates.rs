/// Permissive death-date parsing.
///
/// Spreadsheet exports write the same column in several shapes depending on
/// who saved the file: ISO dates, ISO timestamps, slash dates, and sometimes
/// the raw serial day number when the cell lost its date format. Anything
/// that still fails to parse becomes `None` and the row drops out of every
/// year-keyed aggregate.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

/// Timestamp shapes, tried before the date-only shapes so a trailing time
/// does not make a date-only pattern fail.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Slash dates are read month-first, then day-first when the month-first
/// reading is impossible (e.g. 25/04/2021).
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
];

/// Serial day numbers count from 1899-12-30 in spreadsheet date systems.
/// Only five-digit serials are accepted (1927-10-18 through 2173-10-14).
const SERIAL_MIN: i64 = 10_000;
const SERIAL_MAX: i64 = 99_999;

/// Parses one death-date cell. Returns `None` instead of failing.
pub fn parse_death_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.date());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    parse_serial_date(text)
}

fn parse_serial_date(text: &str) -> Option<NaiveDate> {
    // "44290" or "44290.0" as written by some exporters
    let whole = text.strip_suffix(".0").unwrap_or(text);
    if !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let serial: i64 = whole.parse().ok()?;
    if !(SERIAL_MIN..=SERIAL_MAX).contains(&serial) {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial))
}
