//! # shopsmart-core: Pure Cart Logic for the ShopSmart Storefront
//!
//! This crate is the **heart** of the storefront cart. It contains all
//! cart rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ShopSmart Cart Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront Views                             │   │
//! │  │    Product Grid ──► Add To Cart ──► Cart Page ──► Summary      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               CartStore (apps/storefront)                       │   │
//! │  │    add_to_cart, remove_from_cart, update_quantity, clear_cart  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ shopsmart-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │ Shipping  │  │           │  │ CartLine  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ShippingPolicy)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The ordered cart, its lines and derived totals
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use shopsmart_core::{Cart, Money, Product};
//!
//! let tent = Product::new("tent-2p", "Trail Tent", Money::from_cents(1000));
//!
//! let mut cart = Cart::new();
//! cart.add(&tent, 2);
//! cart.add(&tent, 3);
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.count(), 5);
//! assert_eq!(cart.total(), Money::from_cents(5000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartChange, CartLine, CartTotals, OrderSummary};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart is persisted under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "cart";

/// How long a cart notification stays on screen, in milliseconds.
pub const DEFAULT_NOTIFICATION_MS: u64 = 3000;
