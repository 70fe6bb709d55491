//! # Domain Types
//!
//! The raw records the dashboard engine reads. They arrive as read-only
//! snapshots from the state layer and are never mutated here.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Sale       │   │    Product      │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  timestamp      │   │  name           │   │  name           │       │
//! │  │  total          │   │  category       │   │  age_group?     │       │
//! │  │  status         │   │  unit_price     │   │  email?         │       │
//! │  │  customer_id? ──┼───┼─────────────────┼──►│  phone?         │       │
//! │  │  items[] ───────┼──►│  (by product_id)│   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   SaleStatus    │   │ PaymentMethod   │   │    AgeGroup     │       │
//! │  │  Completed      │   │  Cash           │   │  0-12 … 65+     │       │
//! │  │  Pending        │   │  Card           │   │  (8 buckets)    │       │
//! │  │  Partial        │   │  Transfer       │   └─────────────────┘       │
//! │  │  Cancelled      │   │  Credit         │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `SaleItem` freezes the product name and unit price at the time of sale;
//! only `product_id` is joined back to the catalog (for categories).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Sale Status
// =============================================================================

/// The status of a sale transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Paid in full.
    Completed,
    /// Rung up, awaiting payment.
    Pending,
    /// Partially paid (store credit, layaway).
    Partial,
    /// Cancelled or refunded.
    Cancelled,
}

impl SaleStatus {
    /// Wire token for this status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Completed => "completed",
            SaleStatus::Pending => "pending",
            SaleStatus::Partial => "partial",
            SaleStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on a terminal.
    Card,
    /// Bank or mobile transfer.
    Transfer,
    /// Store credit / on account.
    Credit,
}

impl PaymentMethod {
    /// Every method, in display order.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Transfer,
        PaymentMethod::Credit,
    ];

    /// Wire token for this method.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Credit => "credit",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Age Group
// =============================================================================

/// Fixed demographic bucket assigned to a customer record.
///
/// ## Buckets
/// ```text
/// 0-12 │ 13-17 │ 18-25 │ 26-35 │ 36-45 │ 46-55 │ 56-65 │ 65+
/// ```
/// The order of [`AgeGroup::ALL`] is the order every age-group chart uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AgeGroup {
    #[serde(rename = "0-12")]
    Age0To12,
    #[serde(rename = "13-17")]
    Age13To17,
    #[serde(rename = "18-25")]
    Age18To25,
    #[serde(rename = "26-35")]
    Age26To35,
    #[serde(rename = "36-45")]
    Age36To45,
    #[serde(rename = "46-55")]
    Age46To55,
    #[serde(rename = "56-65")]
    Age56To65,
    #[serde(rename = "65+")]
    Age65Plus,
}

impl AgeGroup {
    /// All buckets in chart order.
    pub const ALL: [AgeGroup; 8] = [
        AgeGroup::Age0To12,
        AgeGroup::Age13To17,
        AgeGroup::Age18To25,
        AgeGroup::Age26To35,
        AgeGroup::Age36To45,
        AgeGroup::Age46To55,
        AgeGroup::Age56To65,
        AgeGroup::Age65Plus,
    ];

    /// The label shown on charts and used on the wire.
    pub const fn label(&self) -> &'static str {
        match self {
            AgeGroup::Age0To12 => "0-12",
            AgeGroup::Age13To17 => "13-17",
            AgeGroup::Age18To25 => "18-25",
            AgeGroup::Age26To35 => "26-35",
            AgeGroup::Age36To45 => "36-45",
            AgeGroup::Age46To55 => "46-55",
            AgeGroup::Age56To65 => "56-65",
            AgeGroup::Age65Plus => "65+",
        }
    }

    /// Position of this bucket in [`AgeGroup::ALL`].
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AgeGroup {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        AgeGroup::ALL
            .into_iter()
            .find(|group| group.label() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "ageGroup".to_string(),
                allowed: AgeGroup::ALL.iter().map(|g| g.label().to_string()).collect(),
            })
    }
}

/// Decodes an optional age group, mapping unknown labels to `None`.
///
/// Customer records are edited by hand in the back office, so a typo in
/// one record must not reject the whole snapshot. Blank strings are
/// treated as "not provided".
fn lenient_age_group<'de, D>(deserializer: D) -> Result<Option<AgeGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        if value.trim().is_empty() {
            return None;
        }
        match value.parse::<AgeGroup>() {
            Ok(group) => Some(group),
            Err(_) => {
                warn!(age_group = %value, "Ignoring unrecognized age group");
                None
            }
        }
    }))
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry. Only `id` and `category` matter to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    /// Display name.
    pub name: String,

    /// Free-form category (e.g. "Tea", "Spices"). Matched exactly.
    pub category: String,

    pub unit_price: Money,

    /// Units currently on hand.
    #[serde(default)]
    pub stock_quantity: i64,
}

// =============================================================================
// Customer
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,

    /// Display name.
    pub name: String,

    /// Demographic bucket, when the customer provided one.
    #[serde(default, deserialize_with = "lenient_age_group")]
    pub age_group: Option<AgeGroup>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale, frozen at time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity: i64,
    /// Unit price at time of sale (frozen).
    pub unit_price: Money,
    /// unit_price × quantity, as rung up.
    pub line_total: Money,
}

// =============================================================================
// Sale
// =============================================================================

/// A sale transaction.
///
/// `total` is authoritative for every revenue figure; line totals are
/// not reconciled against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub total: Money,
    pub status: SaleStatus,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub items: Vec<SaleItem>,
}

// =============================================================================
// Unit Tests
// =============================================================================
