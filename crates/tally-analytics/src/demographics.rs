//! # Age-Group Demographics
//!
//! Joins sales to customer records and aggregates per age group.
//!
//! ```text
//!   Sale.customer_id ──► Customer ──► age_group ──► bucket
//!        │                  │             │
//!        └─ None: skipped   └─ unknown:   └─ None: skipped
//!                              skipped
//! ```
//!
//! Skipped sales only drop out of this aggregator; every other chart
//! still counts them.

use std::collections::HashSet;

use serde::Serialize;
use tally_core::{AgeGroup, Money, Sale};
use tracing::debug;
use ts_rs::TS;

use crate::bucket::Bucket;
use crate::index::SnapshotIndex;
use crate::time_range::{within, DateRange};

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroupData {
    pub age_group: AgeGroup,
    /// Distinct customers who transacted, not the number of sales.
    pub customers: u32,
    pub sales: Money,
    pub orders: u32,
    pub avg_order_value: Money,
    /// Orders per distinct customer; 0 when there are no customers.
    pub visit_frequency: f64,
}

#[derive(Default)]
struct GroupAccumulator<'a> {
    bucket: Bucket,
    customers: HashSet<&'a str>,
}

/// Aggregates sales per age group. Always returns eight records, in
/// [`AgeGroup::ALL`] order.
pub fn age_group_analysis<'a>(
    sales: &'a [Sale],
    index: &SnapshotIndex<'a>,
    bounds: Option<&DateRange>,
) -> Vec<AgeGroupData> {
    let mut groups: Vec<GroupAccumulator<'a>> =
        AgeGroup::ALL.iter().map(|_| GroupAccumulator::default()).collect();
    let mut unmatched = 0usize;

    for sale in sales.iter().filter(|sale| within(bounds, &sale.timestamp)) {
        let (Some(customer_id), Some(group)) =
            (sale.customer_id.as_deref(), index.age_group_of(sale))
        else {
            unmatched += 1;
            continue;
        };
        let acc = &mut groups[group.index()];
        acc.bucket.record(sale.total);
        acc.customers.insert(customer_id);
    }

    debug!(unmatched, "Aggregated sales by age group");

    AgeGroup::ALL
        .iter()
        .zip(groups)
        .map(|(group, acc)| {
            let customers = u32::try_from(acc.customers.len()).unwrap_or(u32::MAX);
            let visit_frequency = if customers == 0 {
                0.0
            } else {
                f64::from(acc.bucket.orders) / f64::from(customers)
            };
            AgeGroupData {
                age_group: *group,
                customers,
                sales: acc.bucket.sales,
                orders: acc.bucket.orders,
                avg_order_value: acc.bucket.avg_order_value(),
                visit_frequency,
            }
        })
        .collect()
}
