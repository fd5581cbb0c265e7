//! # Error Types
//!
//! Validation errors for arcadia-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  arcadia-core                                                       │
//! │  └── ValidationError  - input fails a business rule check           │
//! │                                                                     │
//! │  arcadia-db (separate crate)                                        │
//! │  ├── DbError          - database operation failures                 │
//! │  └── PlacementError   - order placement failure taxonomy            │
//! │       └── wraps ValidationError for bad quantities                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors are enum variants with context, never bare strings.

use thiserror::Error;

/// Input validation errors.
///
/// Raised before any business logic or I/O runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;
