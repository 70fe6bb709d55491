//! # Weekly, Hourly and Day-Hour Patterns
//!
//! When in the week and the day sales happen. All three aggregators share
//! [`crate::bucket`] and differ only in their key.
//!
//! ## Heat Map Normalization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │          0h   1h   ...  12h  13h  ...  23h                              │
//! │   Sun   0.00 0.00      0.35 0.50      0.00                              │
//! │   Mon   0.00 0.00      1.00 0.80      0.05   ◄── busiest cell = 1.0     │
//! │   ...                                                                   │
//! │   Sat   0.10 0.00      0.60 0.45      0.00                              │
//! │                                                                         │
//! │   intensity = cell sales / max cell sales over ALL 168 cells           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Normalizing against the whole grid (not per row or column) keeps every
//! cell comparable on one color scale.

use chrono::FixedOffset;
use serde::Serialize;
use tally_core::{Money, Sale};
use tracing::debug;
use ts_rs::TS;

use crate::bucket::{bucket_by_index, day_hour_index, hour_index, weekday_index, Bucket};
use crate::labels::{hour_label, WEEKDAY_NAMES, WEEKDAY_SHORT_NAMES};
use crate::time_range::{within, DateRange};

/// Number of cells in the day-of-week × hour-of-day grid.
pub const HEATMAP_CELLS: usize = 7 * 24;

// =============================================================================
// Output Records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySalesData {
    /// Full weekday name, e.g. "Monday".
    pub day: String,
    /// Sunday = 0.
    pub day_index: u32,
    pub sales: Money,
    pub orders: u32,
    pub avg_order_value: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HourlySalesData {
    /// 0-23.
    pub hour: u32,
    /// 12-hour label, e.g. "1 PM".
    pub label: String,
    pub sales: Money,
    pub orders: u32,
    pub avg_order_value: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DayHourSalesData {
    pub day: String,
    pub day_short: String,
    pub day_index: u32,
    pub hour: u32,
    pub sales: Money,
    pub orders: u32,
    /// Cell sales relative to the busiest cell, in `[0, 1]`.
    pub intensity: f64,
}

// =============================================================================
// Aggregators
// =============================================================================

fn bounded<'a>(
    sales: &'a [Sale],
    bounds: Option<&'a DateRange>,
) -> impl Iterator<Item = &'a Sale> + 'a {
    sales.iter().filter(move |sale| within(bounds, &sale.timestamp))
}

/// Sales per day of week, seven records, Sunday first.
///
/// Sales outside `bounds` are ignored; without bounds every sale counts.
pub fn weekly_sales_pattern(
    sales: &[Sale],
    bounds: Option<&DateRange>,
    offset: FixedOffset,
) -> Vec<WeeklySalesData> {
    let buckets: [Bucket; 7] =
        bucket_by_index(bounded(sales, bounds), |sale| weekday_index(&sale.timestamp, offset));

    buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| WeeklySalesData {
            day: WEEKDAY_NAMES[i].to_string(),
            day_index: i as u32,
            sales: bucket.sales,
            orders: bucket.orders,
            avg_order_value: bucket.avg_order_value(),
        })
        .collect()
}

/// Sales per hour of day, 24 records, midnight first.
pub fn hourly_sales_pattern(
    sales: &[Sale],
    bounds: Option<&DateRange>,
    offset: FixedOffset,
) -> Vec<HourlySalesData> {
    let buckets: [Bucket; 24] =
        bucket_by_index(bounded(sales, bounds), |sale| hour_index(&sale.timestamp, offset));

    buckets
        .iter()
        .enumerate()
        .map(|(hour, bucket)| HourlySalesData {
            hour: hour as u32,
            label: hour_label(hour as u32),
            sales: bucket.sales,
            orders: bucket.orders,
            avg_order_value: bucket.avg_order_value(),
        })
        .collect()
}

/// The 7×24 heat map, 168 records ordered by day (Sunday first) then hour.
pub fn day_hour_heatmap(
    sales: &[Sale],
    bounds: Option<&DateRange>,
    offset: FixedOffset,
) -> Vec<DayHourSalesData> {
    let cells: [Bucket; HEATMAP_CELLS] = bucket_by_index(bounded(sales, bounds), |sale| {
        day_hour_index(&sale.timestamp, offset)
    });

    let max_sales = cells
        .iter()
        .map(|cell| cell.sales)
        .max()
        .unwrap_or_default();

    debug!(max_cell = %max_sales, "Built day-hour heat map");

    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let day = i / 24;
            let hour = i % 24;
            let intensity = if max_sales.is_positive() {
                cell.sales.ratio_to(max_sales).clamp(0.0, 1.0)
            } else {
                0.0
            };
            DayHourSalesData {
                day: WEEKDAY_NAMES[day].to_string(),
                day_short: WEEKDAY_SHORT_NAMES[day].to_string(),
                day_index: day as u32,
                hour: hour as u32,
                sales: cell.sales,
                orders: cell.orders,
                intensity,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    fn utc_offset() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_weekly_pattern_scenario() {
        // 2024-03-04 is a Monday
        let sales = vec![
            sale_at("m1", "2024-03-04T09:00:00Z", 10000),
            sale_at("m2", "2024-03-04T12:00:00Z", 10000),
            sale_at("m3", "2024-03-04T17:00:00Z", 10000),
            sale_at("t1", "2024-03-05T10:00:00Z", 10000),
        ];
        let weekly = weekly_sales_pattern(&sales, None, utc_offset());

        assert_eq!(weekly.len(), 7);
        assert_eq!(weekly[0].day, "Sunday");
        assert_eq!(weekly[1].day, "Monday");
        assert_eq!(weekly[1].sales.cents(), 30000);
        assert_eq!(weekly[1].orders, 3);
        assert_eq!(weekly[1].avg_order_value.cents(), 10000);
        assert_eq!(weekly[2].day, "Tuesday");
        assert_eq!(weekly[2].sales.cents(), 10000);
        assert_eq!(weekly[2].orders, 1);
        assert_eq!(weekly[2].avg_order_value.cents(), 10000);

        for other in [0, 3, 4, 5, 6] {
            assert!(weekly[other].sales.is_zero());
            assert_eq!(weekly[other].orders, 0);
            assert!(weekly[other].avg_order_value.is_zero());
        }
    }

    #[test]
    fn test_bounds_exclude_sales_entirely() {
        let sales = vec![
            sale_at("in", "2024-03-04T09:00:00Z", 100),
            sale_at("out", "2024-03-20T09:00:00Z", 100),
        ];
        let bounds = DateRange::new(
            fixed("2024-03-01T00:00:00+00:00"),
            fixed("2024-03-10T23:59:59.999+00:00"),
        )
        .unwrap();

        let weekly = weekly_sales_pattern(&sales, Some(&bounds), utc_offset());
        assert_eq!(weekly.iter().map(|d| d.orders).sum::<u32>(), 1);

        let hourly = hourly_sales_pattern(&sales, Some(&bounds), utc_offset());
        assert_eq!(hourly[9].orders, 1);

        let grid = day_hour_heatmap(&sales, Some(&bounds), utc_offset());
        assert_eq!(grid.iter().map(|c| c.orders).sum::<u32>(), 1);
    }

    #[test]
    fn test_hourly_pattern_has_24_labelled_records() {
        let sales = vec![
            sale_at("a", "2024-03-04T00:15:00Z", 100),
            sale_at("b", "2024-03-04T13:45:00Z", 300),
        ];
        let hourly = hourly_sales_pattern(&sales, None, utc_offset());

        assert_eq!(hourly.len(), 24);
        assert_eq!(hourly[0].label, "12 AM");
        assert_eq!(hourly[0].orders, 1);
        assert_eq!(hourly[12].label, "12 PM");
        assert_eq!(hourly[13].label, "1 PM");
        assert_eq!(hourly[13].sales.cents(), 300);
        assert!(hourly[5].avg_order_value.is_zero());
    }

    #[test]
    fn test_heatmap_intensity_is_global() {
        let sales = vec![
            sale_at("big", "2024-03-04T12:00:00Z", 1000), // Mon 12h
            sale_at("small", "2024-03-09T08:00:00Z", 250), // Sat 8h
        ];
        let grid = day_hour_heatmap(&sales, None, utc_offset());

        assert_eq!(grid.len(), HEATMAP_CELLS);
        let monday_noon = &grid[24 + 12];
        assert_eq!(monday_noon.day, "Monday");
        assert_eq!(monday_noon.day_short, "Mon");
        assert_eq!(monday_noon.hour, 12);
        assert_eq!(monday_noon.intensity, 1.0);

        let saturday_eight = &grid[6 * 24 + 8];
        assert!((saturday_eight.intensity - 0.25).abs() < 1e-9);

        assert!(grid.iter().all(|c| (0.0..=1.0).contains(&c.intensity)));
    }

    #[test]
    fn test_heatmap_without_sales_is_all_zero() {
        let grid = day_hour_heatmap(&[], None, utc_offset());
        assert_eq!(grid.len(), HEATMAP_CELLS);
        assert!(grid.iter().all(|c| c.intensity == 0.0 && c.orders == 0));
    }

    #[test]
    fn test_heatmap_with_only_zero_value_sales() {
        let sales = vec![sale_at("free", "2024-03-04T12:00:00Z", 0)];
        let grid = day_hour_heatmap(&sales, None, utc_offset());
        assert!(grid.iter().all(|c| c.intensity == 0.0));
        assert_eq!(grid[24 + 12].orders, 1);
    }
}
