//! # Growth-Rate Calculator
//!
//! Summary statistics over the filtered series, plus a comparison against
//! the equal-length window immediately before it.
//!
//! ## Windows
//! ```text
//!              previous window              current window
//!   ──────┼──────────────────────────┼──────────────────────────┼──►
//!    cutoff - N days              cutoff = now - N days        now
//!         [ inclusive ... exclusive )[ inclusive ...
//!
//!   growth = (current - previous) / previous × 100, or 0 when previous == 0
//! ```
//!
//! The previous window applies the same status, category and
//! customer-type stages as the current one; only the time stage moves.
//! The `all` range has no preceding window, so its growth is 0.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tally_core::{FilterOptions, Money, Sale};
use tracing::debug;
use ts_rs::TS;

use crate::index::SnapshotIndex;
use crate::pipeline::{filtered_sales_data, SalesDataPoint, SalesFilter};
use crate::time_range::days_before;

/// Headline numbers for the sales card row.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub total_sales: Money,
    pub total_orders: u32,
    /// `total_sales / total_orders`, zero when there are no orders.
    pub average_order_value: Money,
    /// Percent change against the previous window; 0 when it was empty.
    pub growth_rate: f64,
    /// Revenue in the previous window, so an empty history can be told
    /// apart from flat growth.
    pub previous_sales: Money,
    pub filtered_sales: Vec<SalesDataPoint>,
}

/// `(current - previous) / previous × 100`, defined as 0 when `previous`
/// is zero.
pub fn growth_rate(current: Money, previous: Money) -> f64 {
    if previous.is_zero() {
        return 0.0;
    }
    (current - previous).ratio_to(previous) * 100.0
}

/// Revenue of sales in the window preceding the filter's current window.
pub fn previous_period_sales(
    sales: &[Sale],
    index: &SnapshotIndex<'_>,
    filters: &FilterOptions,
    now: DateTime<FixedOffset>,
) -> Money {
    let filter = SalesFilter::new(filters, index, now);
    let (Some(cutoff), Some(days)) = (filter.cutoff(), filters.time_range.days()) else {
        return Money::zero();
    };
    let previous_start = days_before(cutoff, days);

    sales
        .iter()
        .filter(|sale| sale.timestamp >= previous_start && sale.timestamp < cutoff)
        .filter(|sale| filter.passes_dimensions(sale))
        .map(|sale| sale.total)
        .sum()
}

/// Computes [`SalesStats`] for one filter selection.
pub fn sales_stats<'a>(
    sales: &'a [Sale],
    index: &SnapshotIndex<'a>,
    filters: &FilterOptions,
    now: DateTime<FixedOffset>,
    day_format: &str,
) -> SalesStats {
    let filtered_sales = filtered_sales_data(sales, index, filters, now, day_format);

    let total_sales: Money = filtered_sales.iter().map(|point| point.amount).sum();
    let total_orders: u32 = filtered_sales.iter().map(|point| point.orders).sum();
    let previous_sales = previous_period_sales(sales, index, filters, now);
    let growth = growth_rate(total_sales, previous_sales);

    debug!(
        total_sales = %total_sales,
        total_orders,
        previous_sales = %previous_sales,
        growth_rate = growth,
        "Computed sales stats"
    );

    SalesStats {
        total_sales,
        total_orders,
        average_order_value: total_sales.average_over(u64::from(total_orders)),
        growth_rate: growth,
        previous_sales,
        filtered_sales,
    }
}
