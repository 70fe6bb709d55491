//! # Bucketing
//!
//! One routine for every "group sales by X" in the engine. Callers supply
//! the key extractor; the routine sums revenue and counts orders.
//!
//! ```text
//!   sales ──► key(sale) ──┬──► [Bucket; 7]    weekday (Sunday = 0)
//!                         ├──► [Bucket; 24]   hour of day
//!                         ├──► [Bucket; 168]  weekday * 24 + hour
//!                         └──► BTreeMap<NaiveDate, Bucket>  calendar day
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use tally_core::{Money, Sale};

/// Running totals for one aggregation cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bucket {
    pub sales: Money,
    pub orders: u32,
}

impl Bucket {
    pub fn record(&mut self, amount: Money) {
        self.sales += amount;
        self.orders += 1;
    }

    /// Revenue per order; zero for an empty bucket.
    pub fn avg_order_value(&self) -> Money {
        self.sales.average_over(u64::from(self.orders))
    }

    pub fn is_empty(&self) -> bool {
        self.orders == 0
    }
}

/// Buckets sales into a fixed-size grid by `key`.
///
/// `key` must return an index below `N`; anything else is dropped.
pub fn bucket_by_index<'a, const N: usize>(
    sales: impl IntoIterator<Item = &'a Sale>,
    key: impl Fn(&Sale) -> usize,
) -> [Bucket; N] {
    let mut buckets = [Bucket::default(); N];
    for sale in sales {
        if let Some(bucket) = buckets.get_mut(key(sale)) {
            bucket.record(sale.total);
        }
    }
    buckets
}

/// Buckets sales into an ordered map by `key`. Only keys that received at
/// least one sale appear.
pub fn bucket_by_key<'a, K: Ord>(
    sales: impl IntoIterator<Item = &'a Sale>,
    key: impl Fn(&Sale) -> K,
) -> BTreeMap<K, Bucket> {
    let mut buckets: BTreeMap<K, Bucket> = BTreeMap::new();
    for sale in sales {
        buckets.entry(key(sale)).or_default().record(sale.total);
    }
    buckets
}

// =============================================================================
// Key Extractors
// =============================================================================

fn local(timestamp: &DateTime<Utc>, offset: FixedOffset) -> DateTime<FixedOffset> {
    timestamp.with_timezone(&offset)
}

/// Day of week, Sunday = 0.
pub fn weekday_index(timestamp: &DateTime<Utc>, offset: FixedOffset) -> usize {
    local(timestamp, offset).weekday().num_days_from_sunday() as usize
}

/// Hour of day, 0-23.
pub fn hour_index(timestamp: &DateTime<Utc>, offset: FixedOffset) -> usize {
    local(timestamp, offset).hour() as usize
}

/// Cell of the 7x24 grid: weekday * 24 + hour.
pub fn day_hour_index(timestamp: &DateTime<Utc>, offset: FixedOffset) -> usize {
    weekday_index(timestamp, offset) * 24 + hour_index(timestamp, offset)
}
