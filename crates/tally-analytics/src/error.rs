//! # Analytics Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Analytics Error Categories                          │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Time Ranges   │  │  Configuration  │  │     Snapshot            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidRange   │  │  InvalidConfig  │  │  Io / Json              │ │
//! │  │  DateOutOfRange │  │  Io / Toml      │  │  Core (validation)      │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only `InvalidRange` can come out of the aggregation functions. Empty
//! collections, zero denominators and unmatched joins all aggregate to
//! zero so the dashboard renders a "no data" state.

use tally_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    // =========================================================================
    // Time Range Errors
    // =========================================================================
    /// A custom range was requested without both bounds, or with
    /// `start` after `end`.
    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    /// Calendar arithmetic left chrono's representable range.
    #[error("Date out of range while computing {0}")]
    DateOutOfRange(&'static str),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid analytics configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    // =========================================================================
    // Snapshot Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot failed record validation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A filter token could not be parsed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AnalyticsError {
    /// Returns true for errors the filter controls should prevent
    /// (as opposed to deployment problems).
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            AnalyticsError::InvalidRange(_) | AnalyticsError::Validation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AnalyticsError::InvalidRange("custom range requires both bounds".into());
        assert_eq!(
            err.to_string(),
            "Invalid time range: custom range requires both bounds"
        );
        assert!(err.is_user_input());

        let err = AnalyticsError::DateOutOfRange("last_month");
        assert_eq!(err.to_string(), "Date out of range while computing last_month");
        assert!(!err.is_user_input());
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: AnalyticsError = ValidationError::Required {
            field: "timeRange".into(),
        }
        .into();
        assert_eq!(err.to_string(), "timeRange is required");
    }
}
