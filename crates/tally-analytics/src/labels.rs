//! Display labels attached to aggregate records.
//!
//! Charts plot these strings directly, so they live next to the numbers
//! rather than in the frontend.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Default label for a daily series point, e.g. "Jan 5".
pub const DEFAULT_DAY_FORMAT: &str = "%b %-d";

/// Weekday names, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Abbreviated weekday names, Sunday first.
pub const WEEKDAY_SHORT_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// 12-hour clock label for an hour of the day: 0 → "12 AM", 13 → "1 PM".
pub fn hour_label(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{} {}", display, suffix)
}

/// Checks that `format` is a strftime pattern chrono can render.
///
/// Rendering an invalid pattern fails at `to_string()` time, so formats
/// coming from configuration are rejected up front.
pub fn validate_day_format(format: &str) -> AnalyticsResult<()> {
    if format.trim().is_empty() {
        return Err(AnalyticsError::InvalidConfig(
            "day_format must not be empty".into(),
        ));
    }

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(AnalyticsError::InvalidConfig(format!(
            "day_format '{}' is not a valid strftime pattern",
            format
        )));
    }

    Ok(())
}

/// Formats a calendar day with a pattern already checked by
/// [`validate_day_format`].
pub(crate) fn format_day(day: NaiveDate, format: &str) -> String {
    day.format(format).to_string()
}
