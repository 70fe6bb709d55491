//! Fixtures shared by the unit tests in this crate.

use chrono::{DateTime, FixedOffset, Utc};
use tally_core::{
    AgeGroup, Customer, Money, PaymentMethod, Product, Sale, SaleItem, SaleStatus,
};

pub fn utc(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

pub fn fixed(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

/// A completed cash sale with no customer and no items.
pub fn sale_at(id: &str, timestamp: &str, total_cents: i64) -> Sale {
    Sale {
        id: id.to_string(),
        timestamp: utc(timestamp),
        total: Money::from_cents(total_cents),
        status: SaleStatus::Completed,
        payment_method: PaymentMethod::Cash,
        customer_id: None,
        items: Vec::new(),
    }
}

pub fn customer(id: &str, age_group: Option<AgeGroup>) -> Customer {
    Customer {
        id: id.to_string(),
        name: format!("Customer {}", id),
        age_group,
        email: None,
        phone: None,
    }
}

pub fn product(id: &str, name: &str, category: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        unit_price: Money::from_cents(100),
        stock_quantity: 50,
    }
}

pub fn catalog() -> Vec<Product> {
    vec![
        product("p-tea", "Green Tea", "Tea"),
        product("p-chai", "Masala Chai", "Tea"),
        product("p-spice", "Cardamom", "Spices"),
        product("p-coffee", "Espresso Beans", "Coffee"),
    ]
}

pub trait SaleFixture {
    fn for_customer(self, customer_id: &str) -> Self;
    fn with_status(self, status: SaleStatus) -> Self;
    fn paid_by(self, method: PaymentMethod) -> Self;
    /// Adds `(product_id, quantity)` lines at 100 cents per unit.
    fn with_items(self, lines: &[(&str, i64)]) -> Self;
}

impl SaleFixture for Sale {
    fn for_customer(mut self, customer_id: &str) -> Self {
        self.customer_id = Some(customer_id.to_string());
        self
    }

    fn with_status(mut self, status: SaleStatus) -> Self {
        self.status = status;
        self
    }

    fn paid_by(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    fn with_items(mut self, lines: &[(&str, i64)]) -> Self {
        for (product_id, quantity) in lines {
            let unit_price = Money::from_cents(100);
            self.items.push(SaleItem {
                product_id: product_id.to_string(),
                product_name: product_id.to_string(),
                quantity: *quantity,
                unit_price,
                line_total: unit_price.multiply_quantity(*quantity),
            });
        }
        self
    }
}
