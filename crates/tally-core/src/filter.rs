//! # Filter Value Objects
//!
//! Immutable selections produced by the dashboard's filter controls and
//! consumed read-only by the analytics engine.
//!
//! ## Two Kinds of Time Range
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TimeRange (relative)            TimeRangeToken (calendar-aligned)      │
//! │  ─────────────────────           ──────────────────────────────────     │
//! │  "7d"  → now - 7 days            "current_week" → Sun 00:00 .. Sat      │
//! │  "30d" → now - 30 days           "last_month"   → 1st .. last day       │
//! │  "3m"  → now - 90 days           "custom"       → caller's bounds       │
//! │  "6m"  → now - 180 days                                                  │
//! │  "1y"  → now - 365 days          Resolved by tally-analytics into a     │
//! │  "all" → no cutoff               concrete [start, end] pair.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::SaleStatus;

fn not_allowed(field: &str, allowed: &[&str]) -> ValidationError {
    ValidationError::NotAllowed {
        field: field.to_string(),
        allowed: allowed.iter().map(|s| s.to_string()).collect(),
    }
}

// =============================================================================
// Relative Time Range
// =============================================================================

/// A "last N days" window, or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "3m")]
    Last3Months,
    #[serde(rename = "6m")]
    Last6Months,
    #[serde(rename = "1y")]
    LastYear,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    const TOKENS: [&'static str; 6] = ["7d", "30d", "3m", "6m", "1y", "all"];

    /// Length of the window in days, or `None` for [`TimeRange::All`].
    ///
    /// Months are fixed day counts here (90/180), not calendar months.
    pub const fn days(&self) -> Option<i64> {
        match self {
            TimeRange::Last7Days => Some(7),
            TimeRange::Last30Days => Some(30),
            TimeRange::Last3Months => Some(90),
            TimeRange::Last6Months => Some(180),
            TimeRange::LastYear => Some(365),
            TimeRange::All => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Last7Days => "7d",
            TimeRange::Last30Days => "30d",
            TimeRange::Last3Months => "3m",
            TimeRange::Last6Months => "6m",
            TimeRange::LastYear => "1y",
            TimeRange::All => "all",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "7d" => Ok(TimeRange::Last7Days),
            "30d" => Ok(TimeRange::Last30Days),
            "3m" => Ok(TimeRange::Last3Months),
            "6m" => Ok(TimeRange::Last6Months),
            "1y" => Ok(TimeRange::LastYear),
            "all" => Ok(TimeRange::All),
            _ => Err(not_allowed("timeRange", &Self::TOKENS)),
        }
    }
}

// =============================================================================
// Status Filter
// =============================================================================

/// Status selection. `Partial` sales only ever pass under [`StatusFilter::All`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
    Cancelled,
}

impl StatusFilter {
    /// Returns true if a sale with `status` passes this filter.
    pub fn matches(&self, status: SaleStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => status == SaleStatus::Completed,
            StatusFilter::Pending => status == SaleStatus::Pending,
            StatusFilter::Cancelled => status == SaleStatus::Cancelled,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "completed" => Ok(StatusFilter::Completed),
            "pending" => Ok(StatusFilter::Pending),
            "cancelled" => Ok(StatusFilter::Cancelled),
            _ => Err(not_allowed(
                "status",
                &["all", "completed", "pending", "cancelled"],
            )),
        }
    }
}

// =============================================================================
// Category Filter
// =============================================================================

/// Either the sentinel `"all"` or one concrete category name.
///
/// Serialized as a bare string so the filter control can send whatever
/// category label it displays.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn named(category: impl Into<String>) -> Self {
        CategoryFilter::Named(category.into())
    }

    /// The concrete category, or `None` for the sentinel.
    pub fn category(&self) -> Option<&str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Named(name) => Some(name),
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(value)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => "all".to_string(),
            CategoryFilter::Named(name) => name,
        }
    }
}

// =============================================================================
// Customer Type
// =============================================================================

/// New vs returning customer selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    #[default]
    All,
    New,
    Returning,
}

impl FromStr for CustomerType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(CustomerType::All),
            "new" => Ok(CustomerType::New),
            "returning" => Ok(CustomerType::Returning),
            _ => Err(not_allowed("customerType", &["all", "new", "returning"])),
        }
    }
}

// =============================================================================
// Filter Options
// =============================================================================

/// The full filter selection for the sales series and stats.
///
/// `Default` is the permissive selection: every predicate passes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    pub time_range: TimeRange,
    #[ts(type = "string")]
    pub category: CategoryFilter,
    pub status: StatusFilter,
    pub customer_type: CustomerType,
}

impl FilterOptions {
    pub fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = time_range;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = CategoryFilter::from(category.into());
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_customer_type(mut self, customer_type: CustomerType) -> Self {
        self.customer_type = customer_type;
        self
    }
}

// =============================================================================
// Calendar Range Token
// =============================================================================

/// A calendar-aligned period, current or immediately preceding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TimeRangeToken {
    CurrentWeek,
    CurrentMonth,
    CurrentYear,
    LastWeek,
    LastMonth,
    LastYear,
    /// Caller-supplied bounds.
    Custom,
}

impl TimeRangeToken {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TimeRangeToken::CurrentWeek => "current_week",
            TimeRangeToken::CurrentMonth => "current_month",
            TimeRangeToken::CurrentYear => "current_year",
            TimeRangeToken::LastWeek => "last_week",
            TimeRangeToken::LastMonth => "last_month",
            TimeRangeToken::LastYear => "last_year",
            TimeRangeToken::Custom => "custom",
        }
    }
}

impl fmt::Display for TimeRangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRangeToken {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "current_week" => Ok(TimeRangeToken::CurrentWeek),
            "current_month" => Ok(TimeRangeToken::CurrentMonth),
            "current_year" => Ok(TimeRangeToken::CurrentYear),
            "last_week" => Ok(TimeRangeToken::LastWeek),
            "last_month" => Ok(TimeRangeToken::LastMonth),
            "last_year" => Ok(TimeRangeToken::LastYear),
            "custom" => Ok(TimeRangeToken::Custom),
            _ => Err(not_allowed(
                "timeRangeToken",
                &[
                    "current_week",
                    "current_month",
                    "current_year",
                    "last_week",
                    "last_month",
                    "last_year",
                    "custom",
                ],
            )),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_days() {
        assert_eq!(TimeRange::Last7Days.days(), Some(7));
        assert_eq!(TimeRange::Last30Days.days(), Some(30));
        assert_eq!(TimeRange::Last3Months.days(), Some(90));
        assert_eq!(TimeRange::Last6Months.days(), Some(180));
        assert_eq!(TimeRange::LastYear.days(), Some(365));
        assert_eq!(TimeRange::All.days(), None);
    }

    #[test]
    fn test_time_range_parsing() {
        assert_eq!("7d".parse::<TimeRange>().unwrap(), TimeRange::Last7Days);
        assert_eq!("1Y".parse::<TimeRange>().unwrap(), TimeRange::LastYear);
        assert!("2w".parse::<TimeRange>().is_err());
    }

    #[test]
    fn test_status_filter_never_matches_partial_unless_all() {
        assert!(StatusFilter::All.matches(SaleStatus::Partial));
        assert!(!StatusFilter::Completed.matches(SaleStatus::Partial));
        assert!(!StatusFilter::Pending.matches(SaleStatus::Partial));
        assert!(StatusFilter::Cancelled.matches(SaleStatus::Cancelled));
    }

    #[test]
    fn test_category_filter_sentinel() {
        assert_eq!(CategoryFilter::from("all".to_string()), CategoryFilter::All);
        assert_eq!(CategoryFilter::named("Tea").category(), Some("Tea"));
        assert_eq!(CategoryFilter::All.category(), None);
    }

    #[test]
    fn test_filter_options_wire_format() {
        let json = r#"{"timeRange":"30d","category":"Tea","status":"completed","customerType":"returning"}"#;
        let filters: FilterOptions = serde_json::from_str(json).unwrap();
        assert_eq!(filters.time_range, TimeRange::Last30Days);
        assert_eq!(filters.category, CategoryFilter::named("Tea"));
        assert_eq!(filters.status, StatusFilter::Completed);
        assert_eq!(filters.customer_type, CustomerType::Returning);

        let back = serde_json::to_string(&filters).unwrap();
        assert!(back.contains(r#""category":"Tea""#));
    }

    #[test]
    fn test_filter_options_default_is_permissive() {
        let filters: FilterOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(filters, FilterOptions::default());
        assert_eq!(filters.time_range, TimeRange::All);
        assert_eq!(filters.category, CategoryFilter::All);
    }

    #[test]
    fn test_time_range_token_parsing() {
        assert_eq!(
            "last_month".parse::<TimeRangeToken>().unwrap(),
            TimeRangeToken::LastMonth
        );
        assert!("next_week".parse::<TimeRangeToken>().is_err());
        assert_eq!(TimeRangeToken::CurrentWeek.to_string(), "current_week");
    }
}
