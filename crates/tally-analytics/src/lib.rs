//! # tally-analytics: Sales Analytics Aggregation Engine
//!
//! Turns a snapshot of sales, products and customers into the series,
//! grids and summary records the dashboard charts plot.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Snapshot { sales, products, customers }          now (injected)       │
//! │        │                                              │                 │
//! │        ▼                                              ▼                 │
//! │   SnapshotIndex ──────────────► SalesAnalytics ◄── offset of now        │
//! │   (id → record maps,                  │                                 │
//! │    first purchase)                    │                                 │
//! │                 ┌─────────────────────┼─────────────────────┐           │
//! │                 ▼                     ▼                     ▼           │
//! │        FilterOptions           Option<DateRange>      whole snapshot    │
//! │        ─────────────           ─────────────────      ──────────────    │
//! │        pipeline (4 stages)     weekly / hourly        customer          │
//! │        daily series            7×24 heat map          insights          │
//! │        stats + growth          age groups                               │
//! │        top products                                                     │
//! │        payment methods                                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`engine`] - `SalesAnalytics`, the query context
//! - [`time_range`] - Calendar range resolver and relative windows
//! - [`pipeline`] - Filter stages and the daily series
//! - [`growth`] - Summary stats and previous-window comparison
//! - [`bucket`] - Generic accumulate-into-buckets utility
//! - [`patterns`] - Weekly, hourly and day-hour aggregators
//! - [`demographics`] - Age-group aggregator
//! - [`insights`] - Customer insight card
//! - [`breakdown`] - Top products and payment methods
//! - [`report`] - One-call dashboard bundle
//! - [`config`] - TOML + environment configuration, clock
//! - [`snapshot`] - JSON snapshot loading
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_analytics::{AnalyticsConfig, SalesAnalytics, Snapshot};
//!
//! let config = AnalyticsConfig::load_or_default(None);
//! let snapshot = Snapshot::load("snapshot.json")?;
//! let engine = SalesAnalytics::new(
//!     &snapshot.sales,
//!     &snapshot.products,
//!     &snapshot.customers,
//!     config.clock()?,
//! );
//!
//! let stats = engine.stats(&config.defaults);
//! println!("Revenue: {} ({:+.1}%)", stats.total_sales, stats.growth_rate);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod breakdown;
pub mod bucket;
pub mod config;
pub mod demographics;
pub mod engine;
pub mod error;
pub mod growth;
pub mod index;
pub mod insights;
pub mod labels;
pub mod patterns;
pub mod pipeline;
pub mod report;
pub mod snapshot;
pub mod time_range;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use breakdown::{PaymentMethodData, ProductPerformance};
pub use bucket::{bucket_by_index, bucket_by_key, Bucket};
pub use config::{AnalyticsConfig, ClockSettings, LabelSettings};
pub use demographics::AgeGroupData;
pub use engine::SalesAnalytics;
pub use error::{AnalyticsError, AnalyticsResult};
pub use growth::SalesStats;
pub use index::SnapshotIndex;
pub use insights::CustomerInsights;
pub use patterns::{DayHourSalesData, HourlySalesData, WeeklySalesData};
pub use pipeline::SalesDataPoint;
pub use report::DashboardReport;
pub use snapshot::Snapshot;
pub use time_range::{resolve_time_range, DateRange};
