//! Date helpers for the views
//!
//! Display format is `Mar 15, 2024`; `<input type="date">` values use the
//! wire format `YYYY-MM-DD`.

use chrono::NaiveDate;
use contracts::shared::dates::{normalize_date, to_wire_date};

const DISPLAY_DATE: &str = "%b %d, %Y";

/// Today in the browser's local time zone.
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

/// Display date, `—` when unset.
pub fn format_optional(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DISPLAY_DATE).to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// Value for `<input type="date">`.
pub fn to_input_value(date: Option<NaiveDate>) -> String {
    date.map(to_wire_date).unwrap_or_default()
}

/// Parse an `<input type="date">` value; blank clears the date.
pub fn from_input_value(value: &str) -> Option<NaiveDate> {
    normalize_date(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(NaiveDate::from_ymd_opt(2024, 3, 15)), "Mar 15, 2024");
        assert_eq!(format_optional(None), "—");
    }

    #[test]
    fn test_input_value_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29);
        assert_eq!(to_input_value(date), "2024-02-29");
        assert_eq!(from_input_value("2024-02-29"), date);
        assert_eq!(from_input_value(""), None);
        assert_eq!(format_optional(None), "—");
    }
}
