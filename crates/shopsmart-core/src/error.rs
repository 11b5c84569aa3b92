//! # Error Types
//!
//! Domain-specific error types for shopsmart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopsmart-core errors (this file)                                     │
//! │  ├── CoreError        - Cart payload and domain errors                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shopsmart-store errors (separate crate)                               │
//! │  └── StoreError       - Durable store failures                         │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  ├── CartError        - Provider / hydration / persistence             │
//! │  └── ApiError         - What view consumers see (serialized)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core cart errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The persisted cart payload could not be decoded.
    ///
    /// ## When This Occurs
    /// - Storage holds truncated or hand-edited JSON
    /// - The value under the cart key is not an array of lines
    /// - A line is missing a required field (`id`, `name`, `quantity`, ...)
    ///
    /// Recovered by the cart service: the payload is discarded and the
    /// session starts from an empty cart.
    #[error("Invalid cart payload: {0}")]
    InvalidCartPayload(#[source] serde_json::Error),

    /// The cart could not be encoded for storage.
    #[error("Could not encode cart: {0}")]
    Encode(#[source] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before the cart is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
