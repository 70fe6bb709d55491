//! # Sales Filter Pipeline
//!
//! Applies the dashboard's filter selection to a sale collection and
//! buckets the survivors into a daily series.
//!
//! ## Stages
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sale[] ──► 1. time          date >= now - N days   ("all": skip)       │
//! │         ──► 2. status        status == requested    ("all": skip)       │
//! │         ──► 3. category      ANY item's product in category             │
//! │         ──► 4. customer type new / returning        ("all": skip)       │
//! │         ──► bucket by local calendar day ──► SalesDataPoint[] (asc)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stages are independent predicates. Their order is fixed so the
//! previous-period recomputation in `growth` swaps only the time stage.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Serialize;
use tally_core::{CustomerType, FilterOptions, Money, Sale};
use tracing::debug;
use ts_rs::TS;

use crate::bucket::bucket_by_key;
use crate::index::SnapshotIndex;
use crate::labels::format_day;
use crate::time_range::relative_cutoff;

// =============================================================================
// Output Record
// =============================================================================

/// One day of the filtered sales series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesDataPoint {
    /// Short display label, e.g. "Jan 5".
    pub date: String,
    /// The calendar day this point covers (sort key).
    #[ts(as = "String")]
    pub day: NaiveDate,
    pub amount: Money,
    pub orders: u32,
}

// =============================================================================
// Filter
// =============================================================================

/// The four predicates of the pipeline, bound to one selection.
#[derive(Debug, Clone)]
pub struct SalesFilter<'f, 'a> {
    filters: &'f FilterOptions,
    index: &'f SnapshotIndex<'a>,
    cutoff: Option<DateTime<Utc>>,
}

impl<'f, 'a> SalesFilter<'f, 'a> {
    pub fn new(
        filters: &'f FilterOptions,
        index: &'f SnapshotIndex<'a>,
        now: DateTime<FixedOffset>,
    ) -> Self {
        SalesFilter {
            filters,
            index,
            cutoff: relative_cutoff(filters.time_range, now),
        }
    }

    /// The instant the current window starts at, if the range is relative.
    pub fn cutoff(&self) -> Option<DateTime<Utc>> {
        self.cutoff
    }

    /// Stage 1.
    pub fn passes_time(&self, sale: &Sale) -> bool {
        self.cutoff.map_or(true, |cutoff| sale.timestamp >= cutoff)
    }

    /// Stage 2.
    pub fn passes_status(&self, sale: &Sale) -> bool {
        self.filters.status.matches(sale.status)
    }

    /// Stage 3.
    pub fn passes_category(&self, sale: &Sale) -> bool {
        match self.filters.category.category() {
            None => true,
            Some(category) => self.index.sale_in_category(sale, category),
        }
    }

    /// Stage 4.
    pub fn passes_customer_type(&self, sale: &Sale) -> bool {
        match self.filters.customer_type {
            CustomerType::All => true,
            CustomerType::New => self.index.is_new_customer_sale(sale),
            CustomerType::Returning => !self.index.is_new_customer_sale(sale),
        }
    }

    /// Stages 2-4: everything except the time window.
    pub fn passes_dimensions(&self, sale: &Sale) -> bool {
        self.passes_status(sale) && self.passes_category(sale) && self.passes_customer_type(sale)
    }

    /// All four stages.
    pub fn matches(&self, sale: &Sale) -> bool {
        self.passes_time(sale) && self.passes_dimensions(sale)
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Returns the sales that pass every stage, in input order.
pub fn filter_sales<'a>(
    sales: &'a [Sale],
    index: &SnapshotIndex<'a>,
    filters: &FilterOptions,
    now: DateTime<FixedOffset>,
) -> Vec<&'a Sale> {
    let filter = SalesFilter::new(filters, index, now);
    let kept: Vec<&Sale> = sales.iter().filter(|sale| filter.matches(sale)).collect();

    debug!(
        input = sales.len(),
        kept = kept.len(),
        time_range = %filters.time_range,
        "Filtered sales"
    );
    kept
}

/// Buckets sales by calendar day in `offset`, ascending by date.
///
/// Points are ordered by the underlying date, never by the display label,
/// so "Dec 31" sorts before "Jan 1".
pub fn daily_series<'a>(
    sales: impl IntoIterator<Item = &'a Sale>,
    offset: FixedOffset,
    day_format: &str,
) -> Vec<SalesDataPoint> {
    bucket_by_key(sales, |sale| sale.timestamp.with_timezone(&offset).date_naive())
        .into_iter()
        .map(|(day, bucket)| SalesDataPoint {
            date: format_day(day, day_format),
            day,
            amount: bucket.sales,
            orders: bucket.orders,
        })
        .collect()
}

/// The full pipeline: filter, then bucket by day.
pub fn filtered_sales_data<'a>(
    sales: &'a [Sale],
    index: &SnapshotIndex<'a>,
    filters: &FilterOptions,
    now: DateTime<FixedOffset>,
    day_format: &str,
) -> Vec<SalesDataPoint> {
    let kept = filter_sales(sales, index, filters, now);
    daily_series(kept, *now.offset(), day_format)
}
