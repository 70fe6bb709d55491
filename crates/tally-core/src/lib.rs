//! # tally-core: Pure Domain Types for the Tally Dashboard
//!
//! This crate holds the records the sales dashboard reads and the filter
//! selections it is driven by. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard UI (charts)                        │   │
//! │  │    Sales line ── Weekly bars ── Heat map ── Age-group donut     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ aggregate records (ts-rs types)        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tally-analytics (engine)                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  filter   │  │ validation│  │   │
//! │  │   │   Sale    │  │   Money   │  │ TimeRange │  │  records  │  │   │
//! │  │   │ Customer  │  │  average  │  │ Category  │  │ snapshot  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • PURE VALUES                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Snapshot records (Sale, Product, Customer, AgeGroup)
//! - [`money`] - Money type with integer arithmetic
//! - [`filter`] - Filter selections (FilterOptions, TimeRangeToken)
//! - [`error`] - Domain error types
//! - [`validation`] - Snapshot record validation
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{FilterOptions, StatusFilter, TimeRange};
//!
//! let filters = FilterOptions::default()
//!     .with_time_range(TimeRange::Last30Days)
//!     .with_category("Tea")
//!     .with_status(StatusFilter::Completed);
//!
//! assert_eq!(filters.time_range.days(), Some(30));
//! assert_eq!(filters.category.category(), Some("Tea"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod filter;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::*;
pub use money::Money;
pub use types::*;
pub use validation::{validate_customer, validate_product, validate_sale, validate_snapshot};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of any record identifier.
///
/// Identifiers are UUIDs or short receipt codes in practice; anything
/// longer is a corrupted export.
pub const MAX_IDENTIFIER_LEN: usize = 64;
