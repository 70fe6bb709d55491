//! # Analytics Engine
//!
//! [`SalesAnalytics`] borrows one snapshot, builds the lookup index once,
//! and answers every dashboard query against an injected "now".
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SalesAnalytics::new(&sales, &products, &customers, now)                │
//! │        │                                                                │
//! │        ├─► SnapshotIndex (products, customers, first purchase)          │
//! │        │                                                                │
//! │        ├─► stats / sales_data / top_products / payment_breakdown        │
//! │        │     (FilterOptions → pipeline)                                 │
//! │        ├─► weekly / hourly / heat map / age groups                      │
//! │        │     (optional DateRange bounds)                                │
//! │        └─► customer_insights (whole snapshot)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine never reads the system clock. Calendar bucketing uses the
//! offset carried by `now`.

use chrono::{DateTime, FixedOffset};
use tally_core::{Customer, FilterOptions, Product, Sale, TimeRangeToken};

use crate::breakdown::{self, PaymentMethodData, ProductPerformance};
use crate::demographics::{self, AgeGroupData};
use crate::error::AnalyticsResult;
use crate::growth::{self, SalesStats};
use crate::index::SnapshotIndex;
use crate::insights::{self, CustomerInsights};
use crate::labels::{validate_day_format, DEFAULT_DAY_FORMAT};
use crate::patterns::{self, DayHourSalesData, HourlySalesData, WeeklySalesData};
use crate::pipeline::{self, SalesDataPoint};
use crate::report::{self, DashboardReport};
use crate::time_range::{self, DateRange};

/// Read-only query context over one snapshot.
#[derive(Debug, Clone)]
pub struct SalesAnalytics<'a> {
    sales: &'a [Sale],
    customers: &'a [Customer],
    index: SnapshotIndex<'a>,
    now: DateTime<FixedOffset>,
    day_format: String,
}

impl<'a> SalesAnalytics<'a> {
    pub fn new(
        sales: &'a [Sale],
        products: &'a [Product],
        customers: &'a [Customer],
        now: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            sales,
            customers,
            index: SnapshotIndex::build(sales, products, customers),
            now,
            day_format: DEFAULT_DAY_FORMAT.to_string(),
        }
    }

    /// Replaces the strftime format of [`SalesDataPoint::date`].
    pub fn with_day_format(mut self, format: impl Into<String>) -> AnalyticsResult<Self> {
        let format = format.into();
        validate_day_format(&format)?;
        self.day_format = format;
        Ok(self)
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }

    pub fn offset(&self) -> FixedOffset {
        *self.now.offset()
    }

    pub fn day_format(&self) -> &str {
        &self.day_format
    }

    pub fn sales(&self) -> &'a [Sale] {
        self.sales
    }

    pub fn index(&self) -> &SnapshotIndex<'a> {
        &self.index
    }

    // =========================================================================
    // Time Ranges
    // =========================================================================

    pub fn resolve_time_range(
        &self,
        token: TimeRangeToken,
        custom_start: Option<DateTime<FixedOffset>>,
        custom_end: Option<DateTime<FixedOffset>>,
    ) -> AnalyticsResult<DateRange> {
        time_range::resolve_time_range(token, self.now, custom_start, custom_end)
    }

    // =========================================================================
    // Filtered Queries
    // =========================================================================

    pub fn filter_sales(&self, filters: &FilterOptions) -> Vec<&'a Sale> {
        pipeline::filter_sales(self.sales, &self.index, filters, self.now)
    }

    pub fn sales_data(&self, filters: &FilterOptions) -> Vec<SalesDataPoint> {
        pipeline::filtered_sales_data(self.sales, &self.index, filters, self.now, &self.day_format)
    }

    pub fn stats(&self, filters: &FilterOptions) -> SalesStats {
        growth::sales_stats(self.sales, &self.index, filters, self.now, &self.day_format)
    }

    pub fn top_products(&self, filters: &FilterOptions, limit: usize) -> Vec<ProductPerformance> {
        breakdown::top_products(&self.filter_sales(filters), &self.index, limit)
    }

    pub fn payment_breakdown(&self, filters: &FilterOptions) -> Vec<PaymentMethodData> {
        breakdown::payment_breakdown(&self.filter_sales(filters))
    }

    // =========================================================================
    // Bounded Aggregates
    // =========================================================================

    pub fn weekly_pattern(&self, bounds: Option<&DateRange>) -> Vec<WeeklySalesData> {
        patterns::weekly_sales_pattern(self.sales, bounds, self.offset())
    }

    pub fn hourly_pattern(&self, bounds: Option<&DateRange>) -> Vec<HourlySalesData> {
        patterns::hourly_sales_pattern(self.sales, bounds, self.offset())
    }

    pub fn day_hour_heatmap(&self, bounds: Option<&DateRange>) -> Vec<DayHourSalesData> {
        patterns::day_hour_heatmap(self.sales, bounds, self.offset())
    }

    pub fn age_group_analysis(&self, bounds: Option<&DateRange>) -> Vec<AgeGroupData> {
        demographics::age_group_analysis(self.sales, &self.index, bounds)
    }

    pub fn customer_insights(&self) -> CustomerInsights {
        insights::customer_insights(self.sales, self.customers, &self.index, self.offset())
    }

    /// Every dashboard panel for one filter selection.
    pub fn report(&self, filters: &FilterOptions) -> DashboardReport {
        report::build_report(self, filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;
    use crate::test_support::*;
    use tally_core::TimeRange;

    #[test]
    fn test_engine_uses_offset_of_now() {
        // 23:30 UTC Monday is 08:30 Tuesday in UTC+9
        let sales = vec![sale_at("a", "2024-03-04T23:30:00Z", 100)];
        let engine = SalesAnalytics::new(&sales, &[], &[], fixed("2024-03-13T15:00:00+09:00"));

        let weekly = engine.weekly_pattern(None);
        assert_eq!(weekly[2].orders, 1);
        assert_eq!(engine.hourly_pattern(None)[8].orders, 1);

        let series = engine.sales_data(&FilterOptions::default());
        assert_eq!(series[0].date, "Mar 5");
    }

    #[test]
    fn test_custom_day_format() {
        let sales = vec![sale_at("a", "2024-03-04T10:00:00Z", 100)];
        let engine = SalesAnalytics::new(&sales, &[], &[], fixed("2024-03-13T15:00:00+00:00"))
            .with_day_format("%Y-%m-%d")
            .unwrap();
        assert_eq!(engine.sales_data(&FilterOptions::default())[0].date, "2024-03-04");

        let invalid = SalesAnalytics::new(&sales, &[], &[], fixed("2024-03-13T15:00:00+00:00"))
            .with_day_format("%Q");
        assert!(matches!(invalid, Err(AnalyticsError::InvalidConfig(_))));
    }

    #[test]
    fn test_resolve_time_range_uses_injected_now() {
        let engine = SalesAnalytics::new(&[], &[], &[], fixed("2024-03-13T15:00:00+00:00"));
        let range = engine
            .resolve_time_range(TimeRangeToken::CurrentMonth, None, None)
            .unwrap();
        assert_eq!(range.start, fixed("2024-03-01T00:00:00+00:00"));
    }

    #[test]
    fn test_filtered_breakdowns_share_pipeline() {
        let products = catalog();
        let sales = vec![
            sale_at("recent", "2024-03-12T10:00:00Z", 300).with_items(&[("p-tea", 3)]),
            sale_at("old", "2023-01-01T10:00:00Z", 900).with_items(&[("p-spice", 9)]),
        ];
        let engine = SalesAnalytics::new(&sales, &products, &[], fixed("2024-03-13T15:00:00+00:00"));
        let filters = FilterOptions::default().with_time_range(TimeRange::Last7Days);

        let top = engine.top_products(&filters, 5);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].product_id, "p-tea");

        let payments = engine.payment_breakdown(&filters);
        assert_eq!(payments[0].sales.cents(), 300);
    }
}
