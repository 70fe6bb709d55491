//! Dashboard bundle: every panel for one filter selection in one record.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tally_core::FilterOptions;
use tracing::info;
use ts_rs::TS;

use crate::breakdown::{PaymentMethodData, ProductPerformance};
use crate::demographics::AgeGroupData;
use crate::engine::SalesAnalytics;
use crate::growth::SalesStats;
use crate::insights::CustomerInsights;
use crate::patterns::{DayHourSalesData, HourlySalesData, WeeklySalesData};
use crate::time_range::relative_window;

/// Entries in the top-products panel.
pub const DEFAULT_TOP_PRODUCTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    #[ts(as = "String")]
    pub generated_at: DateTime<FixedOffset>,
    pub filters: FilterOptions,
    pub stats: SalesStats,
    pub weekly: Vec<WeeklySalesData>,
    pub hourly: Vec<HourlySalesData>,
    pub heatmap: Vec<DayHourSalesData>,
    pub age_groups: Vec<AgeGroupData>,
    pub insights: CustomerInsights,
    pub top_products: Vec<ProductPerformance>,
    pub payment_methods: Vec<PaymentMethodData>,
}

/// Builds the report. The pattern and age-group panels are bounded by the
/// relative window of `filters.time_range`; insights always cover the
/// whole snapshot.
pub(crate) fn build_report(engine: &SalesAnalytics<'_>, filters: &FilterOptions) -> DashboardReport {
    let bounds = relative_window(filters.time_range, engine.now());
    let bounds = bounds.as_ref();

    let report = DashboardReport {
        generated_at: engine.now(),
        filters: filters.clone(),
        stats: engine.stats(filters),
        weekly: engine.weekly_pattern(bounds),
        hourly: engine.hourly_pattern(bounds),
        heatmap: engine.day_hour_heatmap(bounds),
        age_groups: engine.age_group_analysis(bounds),
        insights: engine.customer_insights(),
        top_products: engine.top_products(filters, DEFAULT_TOP_PRODUCTS),
        payment_methods: engine.payment_breakdown(filters),
    };

    info!(
        time_range = %filters.time_range,
        total_sales = %report.stats.total_sales,
        total_orders = report.stats.total_orders,
        "Built dashboard report"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use tally_core::TimeRange;

    #[test]
    fn test_report_bounds_patterns_by_time_range() {
        let sales = vec![
            sale_at("recent", "2024-03-12T10:00:00Z", 300),
            sale_at("old", "2023-06-01T10:00:00Z", 900),
        ];
        let engine = SalesAnalytics::new(&sales, &[], &[], fixed("2024-03-13T15:00:00+00:00"));

        let filters = FilterOptions::default().with_time_range(TimeRange::Last30Days);
        let report = engine.report(&filters);
        assert_eq!(report.stats.total_orders, 1);
        assert_eq!(report.weekly.iter().map(|d| d.orders).sum::<u32>(), 1);
        assert_eq!(report.heatmap.len(), 168);
        assert_eq!(report.payment_methods.len(), 4);

        let everything = engine.report(&FilterOptions::default());
        assert_eq!(everything.hourly.iter().map(|h| h.orders).sum::<u32>(), 2);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let engine = SalesAnalytics::new(&[], &[], &[], fixed("2024-03-13T15:00:00+00:00"));
        let json = serde_json::to_value(engine.report(&FilterOptions::default())).unwrap();
        assert!(json.get("generatedAt").is_some());
        assert!(json.get("ageGroups").is_some());
        assert_eq!(json["filters"]["timeRange"], "all");
        assert_eq!(json["stats"]["growthRate"], 0.0);
    }
}
