//! Date normalisation shared by the transformer, the schema and the UI.
//!
//! Upstream data carries dates as canonical `YYYY-MM-DD`, full ISO datetimes,
//! SQL-style datetimes or US-style `MM/DD/YYYY`. Everything is normalised to
//! `NaiveDate` at the boundary; anything unparseable becomes `None` instead of
//! an error so the form stays navigable with dirty data.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Wire format expected by the backend
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

pub fn normalize_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, WIRE_DATE_FORMAT) {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%m/%d/%Y").ok()
}

/// Same as [`normalize_date`] for a JSON value; non-strings yield `None`.
pub fn normalize_date_value(value: &Value) -> Option<NaiveDate> {
    value.as_str().and_then(normalize_date)
}

pub fn to_wire_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

/// `date + months`, clamped to the last day of the target month.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Age in completed years on `today`, by calendar comparison.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_normalize_date_formats() {
        assert_eq!(normalize_date("2024-03-15"), Some(d(2024, 3, 15)));
        assert_eq!(normalize_date("2024-03-15T14:02:26.123Z"), Some(d(2024, 3, 15)));
        assert_eq!(normalize_date("2024-03-15T00:00:00+08:00"), Some(d(2024, 3, 15)));
        assert_eq!(normalize_date("2024-03-15 08:30:00"), Some(d(2024, 3, 15)));
        assert_eq!(normalize_date("03/15/2024"), Some(d(2024, 3, 15)));
    }

    #[test]
    fn test_normalize_date_garbage_is_none() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("not a date"), None);
        assert_eq!(normalize_date("2024-13-45"), None);
        assert_eq!(normalize_date_value(&serde_json::json!(20240315)), None);
    }

    #[test]
    fn test_add_months_clamps() {
        assert_eq!(add_months(d(2024, 1, 15), 6), Some(d(2024, 7, 15)));
        assert_eq!(add_months(d(2024, 8, 31), 6), Some(d(2025, 2, 28)));
    }

    #[test]
    fn test_age_on_month_boundaries() {
        let today = d(2026, 10, 19);
        assert_eq!(age_on(d(2008, 10, 19), today), 18);
        assert_eq!(age_on(d(2008, 10, 20), today), 17);
        assert_eq!(age_on(d(2008, 9, 30), today), 18);
        assert_eq!(age_on(d(2008, 11, 1), today), 17);
    }
}
