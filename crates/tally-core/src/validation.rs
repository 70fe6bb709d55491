//! # Validation Module
//!
//! Record checks applied to a snapshot before it is handed to analytics.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Shape, enum tokens, timestamp format                              │
//! │  └── Unknown age groups degrade to None                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Identifiers present, totals non-negative                          │
//! │  └── Quantities positive, no duplicate ids                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Analytics engine                                             │
//! │  └── Never fails on data: unmatched joins and empty sets aggregate     │
//! │      to zero                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::validate_identifier;
//!
//! assert!(validate_identifier("id", "sale-0001").is_ok());
//! assert!(validate_identifier("id", "   ").is_err());
//! ```

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Customer, Product, Sale};
use crate::MAX_IDENTIFIER_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates an identifier: non-blank and at most `MAX_IDENTIFIER_LEN` chars.
pub fn validate_identifier(field: &str, id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if id.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_IDENTIFIER_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a sale.
///
/// ## Rules
/// - `id` is a valid identifier
/// - `total` is non-negative
/// - Every line item names a product and has a positive quantity
/// - `customer_id`, when present, is a valid identifier
///
/// Line totals are deliberately not reconciled against `total`.
pub fn validate_sale(sale: &Sale) -> ValidationResult<()> {
    validate_identifier("id", &sale.id)?;

    if sale.total.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "total".to_string(),
        });
    }

    if let Some(customer_id) = &sale.customer_id {
        validate_identifier("customerId", customer_id)?;
    }

    for item in &sale.items {
        validate_identifier("items.productId", &item.product_id)?;
        if item.quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "items.quantity".to_string(),
            });
        }
    }

    Ok(())
}

/// Validates a catalog product.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_identifier("id", &product.id)?;

    if product.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if product.unit_price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "unitPrice".to_string(),
        });
    }

    Ok(())
}

/// Validates a customer record.
pub fn validate_customer(customer: &Customer) -> ValidationResult<()> {
    validate_identifier("id", &customer.id)
}

// =============================================================================
// Snapshot Validation
// =============================================================================

/// Validates every record in a snapshot and rejects duplicate ids.
///
/// Stops at the first failure and names the offending record.
pub fn validate_snapshot(
    sales: &[Sale],
    products: &[Product],
    customers: &[Customer],
) -> CoreResult<()> {
    check_records("sale", sales, |s| &s.id, validate_sale)?;
    check_records("product", products, |p| &p.id, validate_product)?;
    check_records("customer", customers, |c| &c.id, validate_customer)?;
    Ok(())
}

fn check_records<T>(
    kind: &'static str,
    records: &[T],
    id_of: impl Fn(&T) -> &String,
    validate: impl Fn(&T) -> ValidationResult<()>,
) -> CoreResult<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());

    for record in records {
        let id = id_of(record);
        validate(record).map_err(|source| CoreError::InvalidRecord {
            kind,
            id: id.clone(),
            source,
        })?;

        if !seen.insert(id.as_str()) {
            return Err(CoreError::DuplicateId {
                kind,
                id: id.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
