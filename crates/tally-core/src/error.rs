//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - A snapshot record is unusable                  │
//! │  └── ValidationError  - A single field or token is invalid             │
//! │                                                                         │
//! │  tally-analytics errors (separate crate)                               │
//! │  └── AnalyticsError   - InvalidRange, config failures                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AnalyticsError → caller           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (record kind, ID, field)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while checking a snapshot before analysis.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record in the snapshot failed validation.
    ///
    /// ## When This Occurs
    /// - A sale carries a negative total
    /// - A line item has a zero or negative quantity
    /// - A record has an empty identifier
    #[error("Invalid {kind} '{id}': {source}")]
    InvalidRecord {
        kind: &'static str,
        id: String,
        #[source]
        source: ValidationError,
    },

    /// Two records of the same kind share an identifier.
    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for individual fields and tokens.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
