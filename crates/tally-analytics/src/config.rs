//! # Analytics Configuration
//!
//! Settings for the dashboard engine and the `dashboard-report` binary.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TALLY_UTC_OFFSET_MINUTES=-300                                      │
//! │     TALLY_TIME_RANGE=30d                                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/dashboard/analytics.toml (Linux)                         │
//! │     ~/Library/Application Support/com.tally.dashboard/analytics.toml  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     host offset, "%b %-d", every filter "all"                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # analytics.toml
//! [clock]
//! utc_offset_minutes = -300  # omit to use the host's offset
//!
//! [labels]
//! day_format = "%b %-d"
//!
//! [defaults]
//! timeRange = "30d"
//! status = "completed"
//! category = "all"
//! customerType = "all"
//! ```

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::{Deserialize, Serialize};
use tally_core::{CategoryFilter, CustomerType, FilterOptions, StatusFilter, TimeRange};
use tracing::{debug, info, warn};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::labels::{validate_day_format, DEFAULT_DAY_FORMAT};

/// Widest UTC offset in use anywhere (UTC+14:00 / UTC-12:00 fit inside).
pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockSettings {
    /// Fixed offset for "now" and calendar bucketing. `None` follows the
    /// host's local offset at the moment [`AnalyticsConfig::clock`] runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSettings {
    /// strftime pattern for the daily series labels.
    #[serde(default = "default_day_format")]
    pub day_format: String,
}

fn default_day_format() -> String {
    DEFAULT_DAY_FORMAT.to_string()
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            day_format: default_day_format(),
        }
    }
}

// =============================================================================
// Analytics Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub clock: ClockSettings,

    #[serde(default)]
    pub labels: LabelSettings,

    /// Filter selection used when the caller supplies none.
    #[serde(default)]
    pub defaults: FilterOptions,
}

impl AnalyticsConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (analytics.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AnalyticsResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`AnalyticsConfig::load`] with the environment read through `lookup`.
    pub fn load_with(
        config_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> AnalyticsResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading analytics config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load analytics config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        if let Some(minutes) = self.clock.utc_offset_minutes {
            if minutes.abs() > MAX_OFFSET_MINUTES {
                return Err(AnalyticsError::InvalidConfig(format!(
                    "utc_offset_minutes must be within ±{}, got: {}",
                    MAX_OFFSET_MINUTES, minutes
                )));
            }
        }

        validate_day_format(&self.labels.day_format)
    }

    /// Applies `TALLY_*` overrides read through `lookup`. Unparseable values
    /// are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("TALLY_UTC_OFFSET_MINUTES") {
            match value.trim().parse::<i32>() {
                Ok(minutes) => {
                    debug!(minutes, "Overriding UTC offset from environment");
                    self.clock.utc_offset_minutes = Some(minutes);
                }
                Err(_) => warn!(value = %value, "Ignoring non-numeric TALLY_UTC_OFFSET_MINUTES"),
            }
        }

        if let Some(format) = lookup("TALLY_DAY_FORMAT") {
            self.labels.day_format = format;
        }

        if let Some(value) = lookup("TALLY_TIME_RANGE") {
            match value.parse::<TimeRange>() {
                Ok(range) => {
                    debug!(time_range = %value, "Overriding default time range from environment");
                    self.defaults.time_range = range;
                }
                Err(e) => warn!(value = %value, error = %e, "Ignoring TALLY_TIME_RANGE"),
            }
        }

        if let Some(value) = lookup("TALLY_STATUS") {
            match value.parse::<StatusFilter>() {
                Ok(status) => self.defaults.status = status,
                Err(e) => warn!(value = %value, error = %e, "Ignoring TALLY_STATUS"),
            }
        }

        if let Some(value) = lookup("TALLY_CATEGORY") {
            self.defaults.category = CategoryFilter::from(value);
        }

        if let Some(value) = lookup("TALLY_CUSTOMER_TYPE") {
            match value.parse::<CustomerType>() {
                Ok(customer_type) => self.defaults.customer_type = customer_type,
                Err(e) => warn!(value = %value, error = %e, "Ignoring TALLY_CUSTOMER_TYPE"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "dashboard")
            .map(|dirs| dirs.config_dir().join("analytics.toml"))
    }

    /// The configured offset, if one is set.
    pub fn offset(&self) -> AnalyticsResult<Option<FixedOffset>> {
        self.clock
            .utc_offset_minutes
            .map(|minutes| {
                FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
                    AnalyticsError::InvalidConfig(format!(
                        "utc_offset_minutes out of range: {}",
                        minutes
                    ))
                })
            })
            .transpose()
    }

    /// The current instant in the configured offset. This is the only
    /// place the system clock is read.
    pub fn clock(&self) -> AnalyticsResult<DateTime<FixedOffset>> {
        Ok(match self.offset()? {
            Some(offset) => Utc::now().with_timezone(&offset),
            None => DateTime::<FixedOffset>::from(Local::now()),
        })
    }
}
