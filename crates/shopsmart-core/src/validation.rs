//! # Validation Module
//!
//! Input validation for cart commands.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Views                                                        │
//! │  ├── Quantity steppers never go below 1                                │
//! │  └── Out-of-stock products can't be added                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command layer (storefront)                                   │
//! │  └── THIS MODULE: ids, names, prices, quantities, keys                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart                                                         │
//! │  └── Quantity clamping and id uniqueness                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product identifier.
pub const MAX_PRODUCT_ID_LEN: usize = 64;

/// Longest accepted product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Longest accepted storage key.
pub const MAX_STORAGE_KEY_LEN: usize = 128;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - No whitespace
///
/// ## Example
/// ```rust
/// use shopsmart_core::validation::validate_product_id;
///
/// assert!(validate_product_id("tent-2p").is_ok());
/// assert!(validate_product_id("").is_err());
/// assert!(validate_product_id("two words").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    if id.len() > MAX_PRODUCT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "product id".to_string(),
            max: MAX_PRODUCT_ID_LEN,
        });
    }

    if id.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "product id".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a storage key.
pub fn validate_storage_key(key: &str) -> ValidationResult<()> {
    if key.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "storage key".to_string(),
        });
    }

    if key.len() > MAX_STORAGE_KEY_LEN {
        return Err(ValidationError::TooLong {
            field: "storage key".to_string(),
            max: MAX_STORAGE_KEY_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// There is no upper bound: adding the same product repeatedly keeps
/// growing its line.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use shopsmart_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates the fields of a product the cart depends on.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_product_name(&product.name)?;
    validate_price_cents(product.price_cents)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("tent-2p").is_ok());
        assert!(validate_product_id("42").is_ok());

        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("   ").is_err());
        assert!(validate_product_id("has space").is_err());
        assert!(validate_product_id(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Trail Tent").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100_000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_storage_key() {
        assert!(validate_storage_key("cart").is_ok());
        assert!(validate_storage_key("").is_err());
        assert!(validate_storage_key(&"k".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_product() {
        let product = Product::new("a", "Tent", Money::from_cents(1000));
        assert!(validate_product(&product).is_ok());

        let free = Product::new("b", "Sticker", Money::zero());
        assert!(validate_product(&free).is_ok());

        let negative = Product::new("c", "Refund", Money::from_cents(-1));
        assert!(validate_product(&negative).is_err());
    }
}
