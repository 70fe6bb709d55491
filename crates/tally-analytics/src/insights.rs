//! # Customer Insights
//!
//! Headline facts derived from the other aggregators, always computed over
//! the full, unfiltered snapshot.
//!
//! ## Tie-Breaking
//! Every argmax/argmin keeps the FIRST bucket in iteration order on ties:
//! Sunday before Monday, hour 0 before hour 1, `0-12` before `13-17`.
//! The dominant age group keeps the first group encountered while walking
//! the customer list.

use chrono::FixedOffset;
use serde::Serialize;
use tally_core::{AgeGroup, Customer, Sale};
use tracing::debug;
use ts_rs::TS;

use crate::demographics::{age_group_analysis, AgeGroupData};
use crate::index::SnapshotIndex;
use crate::labels::hour_label;
use crate::patterns::{hourly_sales_pattern, weekly_sales_pattern};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInsights {
    pub total_customers: u32,
    /// Most common age group across all customer records.
    pub dominant_age_group: Option<AgeGroup>,
    /// Age group with the most distinct transacting customers.
    pub most_active_age_group: AgeGroup,
    /// Age group with the fewest distinct transacting customers.
    pub least_active_age_group: AgeGroup,
    pub peak_day: String,
    pub low_day: String,
    pub peak_hour: u32,
    pub peak_hour_label: String,
    pub low_hour: u32,
    pub low_hour_label: String,
}

/// Index of the first maximum.
fn first_max_by_key<T, K: PartialOrd>(items: &[T], key: impl Fn(&T) -> K) -> Option<usize> {
    let mut best: Option<(usize, K)> = None;
    for (i, item) in items.iter().enumerate() {
        let k = key(item);
        let replace = match &best {
            Some((_, current)) => k > *current,
            None => true,
        };
        if replace {
            best = Some((i, k));
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the first minimum.
fn first_min_by_key<T, K: PartialOrd>(items: &[T], key: impl Fn(&T) -> K) -> Option<usize> {
    let mut best: Option<(usize, K)> = None;
    for (i, item) in items.iter().enumerate() {
        let k = key(item);
        let replace = match &best {
            Some((_, current)) => k < *current,
            None => true,
        };
        if replace {
            best = Some((i, k));
        }
    }
    best.map(|(i, _)| i)
}

/// Mode of the customers' age groups; ties go to the group seen first.
pub fn dominant_age_group(customers: &[Customer]) -> Option<AgeGroup> {
    let mut counts: Vec<(AgeGroup, u32)> = Vec::with_capacity(AgeGroup::ALL.len());
    for group in customers.iter().filter_map(|c| c.age_group) {
        match counts.iter_mut().find(|(g, _)| *g == group) {
            Some((_, count)) => *count += 1,
            None => counts.push((group, 1)),
        }
    }
    first_max_by_key(&counts, |(_, count)| *count).map(|i| counts[i].0)
}

/// Most and least active groups by distinct customers. With no attributed
/// sales every group ties at zero and both resolve to the first group.
fn activity_extremes(groups: &[AgeGroupData]) -> (AgeGroup, AgeGroup) {
    let pick = |i: Option<usize>| {
        i.and_then(|i| groups.get(i))
            .map_or(AgeGroup::ALL[0], |g| g.age_group)
    };
    (
        pick(first_max_by_key(groups, |g| g.customers)),
        pick(first_min_by_key(groups, |g| g.customers)),
    )
}

/// Builds the insight card from the full snapshot.
pub fn customer_insights<'a>(
    sales: &'a [Sale],
    customers: &[Customer],
    index: &SnapshotIndex<'a>,
    offset: FixedOffset,
) -> CustomerInsights {
    let weekly = weekly_sales_pattern(sales, None, offset);
    let hourly = hourly_sales_pattern(sales, None, offset);
    let groups = age_group_analysis(sales, index, None);

    let peak_day = first_max_by_key(&weekly, |d| d.sales).unwrap_or(0);
    let low_day = first_min_by_key(&weekly, |d| d.sales).unwrap_or(0);
    let peak_hour = first_max_by_key(&hourly, |h| h.sales).unwrap_or(0);
    let low_hour = first_min_by_key(&hourly, |h| h.sales).unwrap_or(0);
    let (most_active, least_active) = activity_extremes(&groups);

    let insights = CustomerInsights {
        total_customers: u32::try_from(customers.len()).unwrap_or(u32::MAX),
        dominant_age_group: dominant_age_group(customers),
        most_active_age_group: most_active,
        least_active_age_group: least_active,
        peak_day: weekly[peak_day].day.clone(),
        low_day: weekly[low_day].day.clone(),
        peak_hour: peak_hour as u32,
        peak_hour_label: hour_label(peak_hour as u32),
        low_hour: low_hour as u32,
        low_hour_label: hour_label(low_hour as u32),
    };

    debug!(
        peak_day = %insights.peak_day,
        peak_hour = insights.peak_hour,
        "Computed customer insights"
    );
    insights
}
