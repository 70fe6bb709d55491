//! Identifier lookups built once per snapshot.
//!
//! Sales reference products and customers by id. Instead of scanning the
//! catalog for every line item, the engine builds these maps once and
//! every aggregator joins through them in O(1).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tally_core::{AgeGroup, Customer, Product, Sale};
use tracing::debug;

/// Read-only joins over one snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotIndex<'a> {
    products: HashMap<&'a str, &'a Product>,
    customers: HashMap<&'a str, &'a Customer>,
    /// Earliest sale timestamp per customer id, over every sale supplied.
    first_purchase: HashMap<&'a str, DateTime<Utc>>,
}

impl<'a> SnapshotIndex<'a> {
    pub fn build(sales: &'a [Sale], products: &'a [Product], customers: &'a [Customer]) -> Self {
        let products: HashMap<&str, &Product> =
            products.iter().map(|p| (p.id.as_str(), p)).collect();
        let customers: HashMap<&str, &Customer> =
            customers.iter().map(|c| (c.id.as_str(), c)).collect();

        let mut first_purchase: HashMap<&str, DateTime<Utc>> = HashMap::new();
        for sale in sales {
            if let Some(customer_id) = sale.customer_id.as_deref() {
                first_purchase
                    .entry(customer_id)
                    .and_modify(|first| {
                        if sale.timestamp < *first {
                            *first = sale.timestamp;
                        }
                    })
                    .or_insert(sale.timestamp);
            }
        }

        debug!(
            products = products.len(),
            customers = customers.len(),
            purchasers = first_purchase.len(),
            "Built snapshot index"
        );

        SnapshotIndex {
            products,
            customers,
            first_purchase,
        }
    }

    pub fn product(&self, id: &str) -> Option<&'a Product> {
        self.products.get(id).copied()
    }

    pub fn customer(&self, id: &str) -> Option<&'a Customer> {
        self.customers.get(id).copied()
    }

    /// The age group of the sale's customer, if the reference resolves to
    /// a customer record that has one.
    pub fn age_group_of(&self, sale: &Sale) -> Option<AgeGroup> {
        sale.customer_id
            .as_deref()
            .and_then(|id| self.customer(id))
            .and_then(|customer| customer.age_group)
    }

    /// Returns true if any line item belongs to `category`.
    ///
    /// Line items whose product is missing from the catalog never match.
    pub fn sale_in_category(&self, sale: &Sale, category: &str) -> bool {
        sale.items.iter().any(|item| {
            self.product(&item.product_id)
                .is_some_and(|product| product.category == category)
        })
    }

    /// A sale is "new" when no other sale by the same customer is earlier.
    ///
    /// Sales without a customer reference are always new.
    pub fn is_new_customer_sale(&self, sale: &Sale) -> bool {
        match sale.customer_id.as_deref() {
            None => true,
            Some(id) => self
                .first_purchase
                .get(id)
                .map_or(true, |first| sale.timestamp <= *first),
        }
    }
}
