//! # Error Types
//!
//! Domain-specific error types for partsdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  partsdesk-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule failures                          │
//! │  └── ValidationError  - Input shape failures                            │
//! │                                                                         │
//! │  partsdesk-db errors (separate crate)                                  │
//! │  ├── DbError          - Store failures                                  │
//! │  └── ServiceError     - CoreError | DbError from the services          │
//! │                                                                         │
//! │  Server errors (in app)                                                │
//! │  └── ApiError         - What the browser sees (JSON + status)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → ApiError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ItemId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A line references an item that does not exist.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// Insufficient stock to complete a sale.
    ///
    /// ## When This Occurs
    /// Only under the strict stock policy. The default policy lets the
    /// quantity go negative instead.
    #[error("Insufficient stock for item {item_id}: available {available}, requested {requested}")]
    InsufficientStock {
        item_id: ItemId,
        available: i64,
        requested: i64,
    },

    /// Login or old-password check failed.
    ///
    /// The message is fixed: an unknown user and a wrong password look the same.
    #[error("Invalid username or password")]
    AuthFailed,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before anything touches the store.
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
    Negative { field: String },

    /// Value exceeds the largest accepted magnitude.
    #[error("{field} is too large")]
    TooLarge { field: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required { field: field.into() }
    }

    pub fn must_be_positive(field: impl Into<String>) -> Self {
        ValidationError::MustBePositive { field: field.into() }
    }

    pub fn negative(field: impl Into<String>) -> Self {
        ValidationError::Negative { field: field.into() }
    }

    pub fn too_large(field: impl Into<String>) -> Self {
        ValidationError::TooLarge { field: field.into() }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
