//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in ShopSmart                              │
//! │                                                                         │
//! │  shopsmart add --id tent-2p --price 0                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Provider not ready? ── CartError::Uninitialized ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Validation Error? ─── ValidationError ────────── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stdout: {"code":"VALIDATION_ERROR","message":"price must be ..."}     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persistence failures never show up here. The cart logs them and keeps
//! working from memory.

use serde::Serialize;
use shopsmart_core::{CoreError, ValidationError};
use shopsmart_store::StoreError;

use crate::state::CartError;

/// API error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "UNINITIALIZED",
///   "message": "cart used outside of an initialized provider"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Durable store could not be opened (500)
    StorageError,

    /// Cart used before the provider was initialized
    Uninitialized,

    /// Cart operation failed
    CartError,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts cart service errors to API errors.
impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::Uninitialized => ApiError::new(ErrorCode::Uninitialized, err.to_string()),
            other => {
                tracing::error!("Cart error: {}", other);
                ApiError::new(ErrorCode::CartError, other.to_string())
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::InvalidCartPayload(e) => {
                ApiError::new(ErrorCode::CartError, format!("Invalid cart payload: {}", e))
            }
            CoreError::Encode(e) => {
                tracing::error!("Cart encoding failed: {}", e);
                ApiError::new(ErrorCode::Internal, "Cart could not be encoded")
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Cart storage could not be opened")
            }
            StoreError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Cart storage migration failed")
            }
            StoreError::PoolExhausted => {
                ApiError::new(ErrorCode::StorageError, "Cart storage is busy")
            }
            StoreError::Unavailable(e) => {
                tracing::error!("Cart storage unavailable: {}", e);
                ApiError::new(ErrorCode::StorageError, "Cart storage unavailable")
            }
            StoreError::QueryFailed(e) | StoreError::Internal(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Cart storage failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Cart storage operation failed")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
