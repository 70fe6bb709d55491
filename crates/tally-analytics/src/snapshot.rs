//! JSON snapshot of the three record collections the engine reads.
//!
//! ```json
//! { "sales": [...], "products": [...], "customers": [...] }
//! ```
//!
//! Missing collections default to empty.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tally_core::{validate_snapshot, Customer, Product, Sale};
use tracing::{debug, info};

use crate::error::AnalyticsResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub sales: Vec<Sale>,
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
}

impl Snapshot {
    pub fn from_json_str(json: &str) -> AnalyticsResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        debug!(
            sales = snapshot.sales.len(),
            products = snapshot.products.len(),
            customers = snapshot.customers.len(),
            "Parsed snapshot"
        );
        Ok(snapshot)
    }

    pub fn load(path: impl AsRef<Path>) -> AnalyticsResult<Self> {
        let path = path.as_ref();
        info!(?path, "Loading snapshot");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Record-level checks: identifiers, non-negative amounts, positive
    /// quantities, unique ids per collection.
    pub fn validate(&self) -> AnalyticsResult<()> {
        validate_snapshot(&self.sales, &self.products, &self.customers)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;
    use std::io::Write;
    use tally_core::AgeGroup;

    const SAMPLE: &str = r#"{
        "sales": [{
            "id": "s1",
            "timestamp": "2024-03-04T10:00:00Z",
            "total": 1250,
            "status": "completed",
            "paymentMethod": "card",
            "customerId": "c1",
            "items": [{
                "productId": "p1",
                "productName": "Green Tea",
                "quantity": 1,
                "unitPrice": 1250,
                "lineTotal": 1250
            }]
        }],
        "products": [{"id": "p1", "name": "Green Tea", "category": "Tea", "unitPrice": 1250}],
        "customers": [
            {"id": "c1", "name": "Ada", "ageGroup": "26-35"},
            {"id": "c2", "name": "Bo", "ageGroup": "unknown"}
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let snapshot = Snapshot::from_json_str(SAMPLE).unwrap();
        assert_eq!(snapshot.sales.len(), 1);
        assert_eq!(snapshot.sales[0].customer_id.as_deref(), Some("c1"));
        assert_eq!(snapshot.customers[0].age_group, Some(AgeGroup::Age26To35));
        assert_eq!(snapshot.customers[1].age_group, None);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let snapshot = Snapshot::from_json_str(r#"{"sales": []}"#).unwrap();
        assert!(snapshot.products.is_empty());
        assert!(snapshot.customers.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let snapshot = Snapshot::load(file.path()).unwrap();
        assert_eq!(snapshot.products[0].category, "Tea");
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            Snapshot::load("/nonexistent/snapshot.json"),
            Err(AnalyticsError::Io(_))
        ));
        assert!(matches!(
            Snapshot::from_json_str("{not json"),
            Err(AnalyticsError::Json(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut snapshot = Snapshot::from_json_str(SAMPLE).unwrap();
        let duplicate = snapshot.sales[0].clone();
        snapshot.sales.push(duplicate);
        assert!(matches!(snapshot.validate(), Err(AnalyticsError::Core(_))));
    }
}
