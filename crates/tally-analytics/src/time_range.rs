//! # Time-Range Resolver
//!
//! Turns a semantic range into a concrete `[start, end]` instant pair.
//!
//! ## Calendar-Aligned Tokens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  now = Wed 2024-03-13 15:00 (+00:00)                                    │
//! │                                                                         │
//! │  current_week   Sun 03-10 00:00:00.000  ..  Sat 03-16 23:59:59.999      │
//! │  last_week      Sun 03-03 00:00:00.000  ..  Sat 03-09 23:59:59.999      │
//! │  current_month  Fri 03-01 00:00:00.000  ..  Sun 03-31 23:59:59.999      │
//! │  last_month     Thu 02-01 00:00:00.000  ..  Thu 02-29 23:59:59.999      │
//! │  current_year       01-01 00:00:00.000  ..      12-31 23:59:59.999      │
//! │  last_year     2023-01-01 00:00:00.000  ..  2023-12-31 23:59:59.999     │
//! │  custom         caller's bounds, passed through verbatim                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Preceding periods are computed with calendar arithmetic on dates, never
//! by subtracting a fixed number of days from `now`, so month lengths and
//! leap years come out right. Boundaries are in the offset of `now`.

use chrono::{
    DateTime, Datelike, Days, Duration, FixedOffset, Months, NaiveDate, NaiveTime, Utc,
};
use serde::Serialize;
use tally_core::{TimeRange, TimeRangeToken};
use tracing::debug;
use ts_rs::TS;

use crate::error::{AnalyticsError, AnalyticsResult};

// =============================================================================
// Date Range
// =============================================================================

/// An inclusive `[start, end]` pair of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[ts(as = "String")]
    pub start: DateTime<FixedOffset>,
    #[ts(as = "String")]
    pub end: DateTime<FixedOffset>,
}

impl DateRange {
    /// Creates a range, rejecting `start > end`. Equal bounds are a valid
    /// single-instant range.
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> AnalyticsResult<Self> {
        if start > end {
            return Err(AnalyticsError::InvalidRange(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(DateRange { start, end })
    }

    /// Returns true if `timestamp` falls within the range, both ends inclusive.
    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        let ts = timestamp.with_timezone(&self.start.timezone());
        self.start <= ts && ts <= self.end
    }

    /// Length of the range.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Returns true if `timestamp` is inside `bounds`, or `bounds` is absent.
pub fn within(bounds: Option<&DateRange>, timestamp: &DateTime<Utc>) -> bool {
    bounds.map_or(true, |range| range.contains(timestamp))
}

// =============================================================================
// Calendar Helpers
// =============================================================================

/// 00:00:00.000 on `date` in `offset`.
fn start_of_day(date: NaiveDate, offset: FixedOffset) -> AnalyticsResult<DateTime<FixedOffset>> {
    date.and_time(NaiveTime::MIN)
        .and_local_timezone(offset)
        .single()
        .ok_or(AnalyticsError::DateOutOfRange("start of day"))
}

/// 23:59:59.999 on `date` in `offset`.
fn end_of_day(date: NaiveDate, offset: FixedOffset) -> AnalyticsResult<DateTime<FixedOffset>> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .and_then(|naive| naive.and_local_timezone(offset).single())
        .ok_or(AnalyticsError::DateOutOfRange("end of day"))
}

fn day_span(
    first: NaiveDate,
    last: NaiveDate,
    offset: FixedOffset,
) -> AnalyticsResult<DateRange> {
    Ok(DateRange {
        start: start_of_day(first, offset)?,
        end: end_of_day(last, offset)?,
    })
}

/// The Sunday that starts the week containing `date`.
fn week_start(date: NaiveDate) -> AnalyticsResult<NaiveDate> {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(back))
        .ok_or(AnalyticsError::DateOutOfRange("week start"))
}

fn month_start(date: NaiveDate) -> AnalyticsResult<NaiveDate> {
    date.with_day(1)
        .ok_or(AnalyticsError::DateOutOfRange("month start"))
}

/// Last day of the month that begins at `first`.
fn month_end(first: NaiveDate) -> AnalyticsResult<NaiveDate> {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or(AnalyticsError::DateOutOfRange("month end"))
}

fn year_span(year: i32, offset: FixedOffset) -> AnalyticsResult<DateRange> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or(AnalyticsError::DateOutOfRange("year start"))?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or(AnalyticsError::DateOutOfRange("year end"))?;
    day_span(first, last, offset)
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves a calendar token into concrete bounds relative to `now`.
///
/// `custom_start`/`custom_end` are only consulted for
/// [`TimeRangeToken::Custom`]. When `start <= end` they are returned
/// verbatim, with no snapping to day boundaries.
///
/// A custom range whose start is after its end is rejected rather than
/// passed through: such a range contains no instant, so every chart built
/// from it would silently render empty.
///
/// ## Errors
/// - `InvalidRange` if `Custom` is requested without both bounds.
/// - `InvalidRange` if the custom start is after the custom end.
///
/// ## Example
/// ```rust
/// use chrono::{DateTime, FixedOffset};
/// use tally_analytics::time_range::resolve_time_range;
/// use tally_core::TimeRangeToken;
///
/// let now = DateTime::parse_from_rfc3339("2024-03-13T15:00:00+00:00").unwrap();
/// let range = resolve_time_range(TimeRangeToken::LastMonth, now, None, None).unwrap();
/// assert_eq!(range.start.to_rfc3339(), "2024-02-01T00:00:00+00:00");
/// assert_eq!(range.end.to_rfc3339(), "2024-02-29T23:59:59.999+00:00");
///
/// assert!(resolve_time_range(TimeRangeToken::Custom, now, None, None).is_err());
/// ```
pub fn resolve_time_range(
    token: TimeRangeToken,
    now: DateTime<FixedOffset>,
    custom_start: Option<DateTime<FixedOffset>>,
    custom_end: Option<DateTime<FixedOffset>>,
) -> AnalyticsResult<DateRange> {
    let offset = *now.offset();
    let today = now.date_naive();

    let range = match token {
        TimeRangeToken::CurrentWeek => {
            let first = week_start(today)?;
            let last = first
                .checked_add_days(Days::new(6))
                .ok_or(AnalyticsError::DateOutOfRange("week end"))?;
            day_span(first, last, offset)?
        }
        TimeRangeToken::LastWeek => {
            let this_week = week_start(today)?;
            let first = this_week
                .checked_sub_days(Days::new(7))
                .ok_or(AnalyticsError::DateOutOfRange("last week start"))?;
            let last = this_week
                .pred_opt()
                .ok_or(AnalyticsError::DateOutOfRange("last week end"))?;
            day_span(first, last, offset)?
        }
        TimeRangeToken::CurrentMonth => {
            let first = month_start(today)?;
            day_span(first, month_end(first)?, offset)?
        }
        TimeRangeToken::LastMonth => {
            let last = month_start(today)?
                .pred_opt()
                .ok_or(AnalyticsError::DateOutOfRange("last month end"))?;
            day_span(month_start(last)?, last, offset)?
        }
        TimeRangeToken::CurrentYear => year_span(today.year(), offset)?,
        TimeRangeToken::LastYear => year_span(today.year() - 1, offset)?,
        TimeRangeToken::Custom => match (custom_start, custom_end) {
            (Some(start), Some(end)) => DateRange::new(start, end)?,
            _ => {
                return Err(AnalyticsError::InvalidRange(
                    "custom range requires both a start and an end".into(),
                ))
            }
        },
    };

    debug!(token = %token, start = %range.start, end = %range.end, "Resolved time range");
    Ok(range)
}

// =============================================================================
// Relative Windows
// =============================================================================

/// Cutoff instant for a relative range: `now - N days`, or `None` for `all`.
///
/// Saturates at the earliest representable instant instead of failing.
pub fn relative_cutoff(range: TimeRange, now: DateTime<FixedOffset>) -> Option<DateTime<Utc>> {
    range.days().map(|days| days_before(now.with_timezone(&Utc), days))
}

/// The `[now - N days, now]` window for a relative range, or `None` for `all`.
pub fn relative_window(range: TimeRange, now: DateTime<FixedOffset>) -> Option<DateRange> {
    relative_cutoff(range, now).map(|cutoff| DateRange {
        start: cutoff.with_timezone(now.offset()),
        end: now,
    })
}

pub(crate) fn days_before(instant: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    instant
        .checked_sub_signed(Duration::days(days))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    fn resolve(token: TimeRangeToken, now: &str) -> DateRange {
        resolve_time_range(token, at(now), None, None).unwrap()
    }

    #[test]
    fn test_current_week_starts_on_sunday() {
        // 2024-03-13 is a Wednesday
        let range = resolve(TimeRangeToken::CurrentWeek, "2024-03-13T15:00:00+00:00");
        assert_eq!(range.start, at("2024-03-10T00:00:00+00:00"));
        assert_eq!(range.end, at("2024-03-16T23:59:59.999+00:00"));
    }

    #[test]
    fn test_current_week_on_a_sunday() {
        let range = resolve(TimeRangeToken::CurrentWeek, "2024-03-10T08:00:00+00:00");
        assert_eq!(range.start, at("2024-03-10T00:00:00+00:00"));
    }

    #[test]
    fn test_last_week() {
        let range = resolve(TimeRangeToken::LastWeek, "2024-03-13T15:00:00+00:00");
        assert_eq!(range.start, at("2024-03-03T00:00:00+00:00"));
        assert_eq!(range.end, at("2024-03-09T23:59:59.999+00:00"));
    }

    #[test]
    fn test_last_week_across_year_boundary() {
        // 2025-01-02 is a Thursday; its week starts Sun 2024-12-29
        let range = resolve(TimeRangeToken::LastWeek, "2025-01-02T09:00:00+00:00");
        assert_eq!(range.start, at("2024-12-22T00:00:00+00:00"));
        assert_eq!(range.end, at("2024-12-28T23:59:59.999+00:00"));
    }

    #[test]
    fn test_current_month() {
        let range = resolve(TimeRangeToken::CurrentMonth, "2023-02-14T12:00:00+00:00");
        assert_eq!(range.start, at("2023-02-01T00:00:00+00:00"));
        assert_eq!(range.end, at("2023-02-28T23:59:59.999+00:00"));
    }

    #[test]
    fn test_last_month_handles_leap_february() {
        let range = resolve(TimeRangeToken::LastMonth, "2024-03-31T12:00:00+00:00");
        assert_eq!(range.start, at("2024-02-01T00:00:00+00:00"));
        assert_eq!(range.end, at("2024-02-29T23:59:59.999+00:00"));
    }

    #[test]
    fn test_last_month_in_january() {
        let range = resolve(TimeRangeToken::LastMonth, "2024-01-15T12:00:00+00:00");
        assert_eq!(range.start, at("2023-12-01T00:00:00+00:00"));
        assert_eq!(range.end, at("2023-12-31T23:59:59.999+00:00"));
    }

    #[test]
    fn test_years() {
        let current = resolve(TimeRangeToken::CurrentYear, "2024-06-01T00:00:00+00:00");
        assert_eq!(current.start, at("2024-01-01T00:00:00+00:00"));
        assert_eq!(current.end, at("2024-12-31T23:59:59.999+00:00"));

        let last = resolve(TimeRangeToken::LastYear, "2024-06-01T00:00:00+00:00");
        assert_eq!(last.start, at("2023-01-01T00:00:00+00:00"));
        assert_eq!(last.end, at("2023-12-31T23:59:59.999+00:00"));
    }

    #[test]
    fn test_boundaries_use_offset_of_now() {
        // 23:30 UTC on Saturday is already Sunday in +05:00
        let range = resolve(TimeRangeToken::CurrentWeek, "2024-03-17T04:30:00+05:00");
        assert_eq!(range.start, at("2024-03-17T00:00:00+05:00"));
        assert_eq!(range.end, at("2024-03-23T23:59:59.999+05:00"));
    }

    #[test]
    fn test_custom_passes_bounds_through() {
        let start = at("2024-01-01T10:00:00+00:00");
        let end = at("2024-01-03T18:30:00+00:00");
        let range = resolve_time_range(
            TimeRangeToken::Custom,
            at("2024-06-01T00:00:00+00:00"),
            Some(start),
            Some(end),
        )
        .unwrap();
        assert_eq!(range.start, start);
        assert_eq!(range.end, end);
    }

    #[test]
    fn test_custom_without_both_bounds_is_invalid_range() {
        let now = at("2024-06-01T00:00:00+00:00");
        let start = Some(at("2024-01-01T00:00:00+00:00"));

        for (s, e) in [(None, None), (start, None), (None, start)] {
            let err = resolve_time_range(TimeRangeToken::Custom, now, s, e).unwrap_err();
            assert!(matches!(err, AnalyticsError::InvalidRange(_)));
        }
    }

    #[test]
    fn test_custom_with_equal_bounds_passes_through() {
        let instant = at("2024-01-01T10:00:00+00:00");
        let range = resolve_time_range(
            TimeRangeToken::Custom,
            at("2024-06-01T00:00:00+00:00"),
            Some(instant),
            Some(instant),
        )
        .unwrap();
        assert_eq!(range.start, instant);
        assert_eq!(range.end, instant);
        assert!(range.contains(&instant.with_timezone(&Utc)));
    }

    #[test]
    fn test_custom_with_inverted_bounds_is_invalid_range() {
        let err = resolve_time_range(
            TimeRangeToken::Custom,
            at("2024-06-01T00:00:00+00:00"),
            Some(at("2024-02-01T00:00:00+00:00")),
            Some(at("2024-01-01T00:00:00+00:00")),
        )
        .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidRange(_)));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = resolve(TimeRangeToken::CurrentMonth, "2024-03-13T15:00:00+00:00");
        let first = at("2024-03-01T00:00:00+00:00").with_timezone(&Utc);
        let last = at("2024-03-31T23:59:59.999+00:00").with_timezone(&Utc);
        let after = at("2024-04-01T00:00:00+00:00").with_timezone(&Utc);
        assert!(range.contains(&first));
        assert!(range.contains(&last));
        assert!(!range.contains(&after));
        assert!(within(None, &after));
    }

    #[test]
    fn test_relative_window() {
        let now = at("2024-03-13T15:00:00+00:00");
        let window = relative_window(TimeRange::Last7Days, now).unwrap();
        assert_eq!(window.start, at("2024-03-06T15:00:00+00:00"));
        assert_eq!(window.end, now);
        assert_eq!(window.duration(), Duration::days(7));
        assert!(relative_window(TimeRange::All, now).is_none());
    }
}
