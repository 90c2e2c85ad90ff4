//! Formatting applied to raw cell values during standardization.

use time::macros::format_description;
use tracing::warn;

use crate::value::SqlValue;

/// Formats a date or timestamp cell as `DD-MM-YYYY`.
///
/// Returns `None` for null and for any value that is not a date.
#[must_use]
pub fn format_date(value: Option<&SqlValue>) -> Option<String> {
    let date = value?.as_date()?;
    match date.format(format_description!("[day]-[month]-[year]")) {
        Ok(formatted) => Some(formatted),
        Err(e) => {
            warn!(date = %date, error = %e, "Failed to format date");
            None
        }
    }
}

/// Formats a time-of-day stored as seconds since midnight as `HH:MM`.
///
/// Null, non-numeric and negative input all format as `"00:00"`.
#[must_use]
pub fn format_time(value: Option<&SqlValue>) -> String {
    const MIDNIGHT: &str = "00:00";

    let Some(value) = value.filter(|v| !v.is_null()) else {
        return MIDNIGHT.to_string();
    };

    match value.as_integer() {
        Some(total) if total >= 0 => {
            let hours = total / 3600;
            let minutes = (total % 3600) / 60;
            format!("{hours:02}:{minutes:02}")
        }
        _ => {
            warn!(value = ?value, "Invalid time-of-day value");
            MIDNIGHT.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(Some(&SqlValue::Integer(3661))), "01:01");
        assert_eq!(format_time(Some(&SqlValue::Integer(0))), "00:00");
        assert_eq!(format_time(Some(&SqlValue::Integer(86_399))), "23:59");
        assert_eq!(format_time(Some(&SqlValue::Text("45000".into()))), "12:30");
    }

    #[test]
    fn test_format_time_defaults_to_midnight() {
        assert_eq!(format_time(None), "00:00");
        assert_eq!(format_time(Some(&SqlValue::Null)), "00:00");
        assert_eq!(format_time(Some(&SqlValue::Text("bad".into()))), "00:00");
        assert_eq!(format_time(Some(&SqlValue::Integer(-5))), "00:00");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(
            format_date(Some(&SqlValue::Date(date!(2024 - 03 - 07)))).as_deref(),
            Some("07-03-2024")
        );
        assert_eq!(
            format_date(Some(&SqlValue::Timestamp(datetime!(2023-12-25 08:00)))).as_deref(),
            Some("25-12-2023")
        );
    }

    #[test]
    fn test_format_date_rejects_non_dates() {
        assert_eq!(format_date(None), None);
        assert_eq!(format_date(Some(&SqlValue::Null)), None);
        assert_eq!(format_date(Some(&SqlValue::Text("2024-03-07".into()))), None);
        assert_eq!(format_date(Some(&SqlValue::Integer(20240307))), None);
    }
}
