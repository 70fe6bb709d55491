//! Product and payment-method breakdowns over the filtered sales.
//!
//! Both take the output of [`crate::pipeline::filter_sales`], so they
//! follow the same filter selection as the sales series.

use std::collections::HashMap;

use serde::Serialize;
use tally_core::{Money, PaymentMethod, Sale};
use ts_rs::TS;

use crate::bucket::{bucket_by_index, Bucket};
use crate::index::SnapshotIndex;

// =============================================================================
// Top Products
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductPerformance {
    pub product_id: String,
    /// Catalog name, or the name frozen on the line item when the product
    /// is no longer in the catalog.
    pub name: String,
    pub category: Option<String>,
    pub quantity: i64,
    /// Sum of line totals.
    pub revenue: Money,
    /// Sales containing this product.
    pub orders: u32,
}

/// Ranks products by line revenue, highest first. Ties order by name,
/// then id. Returns at most `limit` entries.
pub fn top_products<'a>(
    sales: &[&'a Sale],
    index: &SnapshotIndex<'a>,
    limit: usize,
) -> Vec<ProductPerformance> {
    let mut by_product: HashMap<&str, ProductPerformance> = HashMap::new();

    for sale in sales {
        let mut counted: Vec<&str> = Vec::new();
        for item in &sale.items {
            let entry = by_product
                .entry(item.product_id.as_str())
                .or_insert_with(|| {
                    let product = index.product(&item.product_id);
                    ProductPerformance {
                        product_id: item.product_id.clone(),
                        name: product
                            .map(|p| p.name.clone())
                            .unwrap_or_else(|| item.product_name.clone()),
                        category: product.map(|p| p.category.clone()),
                        quantity: 0,
                        revenue: Money::zero(),
                        orders: 0,
                    }
                });
            entry.quantity += item.quantity;
            entry.revenue += item.line_total;
            if !counted.contains(&item.product_id.as_str()) {
                entry.orders += 1;
                counted.push(item.product_id.as_str());
            }
        }
    }

    let mut ranked: Vec<ProductPerformance> = by_product.into_values().collect();
    ranked.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    ranked.truncate(limit);
    ranked
}

// =============================================================================
// Payment Methods
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodData {
    pub method: PaymentMethod,
    pub sales: Money,
    pub orders: u32,
    /// Fraction of total revenue, in `[0, 1]`; 0 when there is no revenue.
    pub share: f64,
}

fn method_index(method: PaymentMethod) -> usize {
    PaymentMethod::ALL
        .iter()
        .position(|m| *m == method)
        .unwrap_or(PaymentMethod::ALL.len())
}

/// Revenue per payment method, one record per method in
/// [`PaymentMethod::ALL`] order.
pub fn payment_breakdown(sales: &[&Sale]) -> Vec<PaymentMethodData> {
    let buckets: [Bucket; 4] =
        bucket_by_index(sales.iter().copied(), |sale| method_index(sale.payment_method));
    let total: Money = buckets.iter().map(|b| b.sales).sum();

    PaymentMethod::ALL
        .iter()
        .zip(buckets.iter())
        .map(|(method, bucket)| PaymentMethodData {
            method: *method,
            sales: bucket.sales,
            orders: bucket.orders,
            share: bucket.sales.ratio_to(total),
        })
        .collect()
}
