//! # Domain Types
//!
//! Catalog-facing types used throughout the cart.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────────┐                     │
//! │  │    Product      │        │   ShippingPolicy    │                     │
//! │  │  ─────────────  │        │  ─────────────────  │                     │
//! │  │  id (string)    │        │  flat_fee           │                     │
//! │  │  name           │        │  free_above         │                     │
//! │  │  price_cents    │        └─────────────────────┘                     │
//! │  │  category       │                                                    │
//! │  │  image, rating  │                                                    │
//! │  │  in_stock       │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products come from the catalog and are read-only to the cart: a line
//! keeps its own copy of the product fields from the moment it was added.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product offered by the storefront.
///
/// Optional presentation fields default when absent so that lines written
/// by older or newer storefront builds still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog identifier, unique per product.
    pub id: String,

    /// Display name shown on cards and in notifications.
    pub name: String,

    /// Price in cents (smallest currency unit). Never negative.
    pub price_cents: i64,

    /// Catalog category (e.g. "outdoor", "footwear").
    #[serde(default)]
    pub category: String,

    /// Image reference used by the views.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Average review rating, display only.
    #[serde(default)]
    pub rating: f64,

    /// Whether the catalog currently has stock.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,

    /// Longer product description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Creates an in-stock product with the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price_cents: price.cents(),
            category: String::new(),
            image: None,
            rating: 0.0,
            in_stock: true,
            description: None,
        }
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Shipping Policy
// =============================================================================

/// Flat-rate shipping that becomes free above a subtotal threshold.
///
/// ## Rule
/// ```text
/// subtotal >  free_above  →  shipping = $0.00
/// subtotal <= free_above  →  shipping = flat_fee
/// ```
///
/// An empty cart ships nothing; that case is decided by the cart, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingPolicy {
    /// Fee charged when the order does not qualify for free shipping.
    pub flat_fee: Money,

    /// Subtotal that must be exceeded for free shipping.
    pub free_above: Money,
}

impl ShippingPolicy {
    /// Creates a shipping policy.
    pub const fn new(flat_fee: Money, free_above: Money) -> Self {
        ShippingPolicy {
            flat_fee,
            free_above,
        }
    }

    /// Shipping charged for a given subtotal.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal > self.free_above {
            Money::zero()
        } else {
            self.flat_fee
        }
    }
}

impl Default for ShippingPolicy {
    /// $10.00 flat, free above $100.00.
    fn default() -> Self {
        ShippingPolicy::new(Money::from_cents(1000), Money::from_cents(10000))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
