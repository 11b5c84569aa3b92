//! # Cart Commands
//!
//! Commands view consumers call to read and change the cart.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │                        │
//! │  │  Cart    │     │          │     │  (view)  │                        │
//! │  └──────────┘     └──────────┘     └──────────┘                        │
//! │                        │                                                │
//! │                   add_to_cart                                          │
//! │                   update_cart_item                                     │
//! │                   remove_from_cart                                     │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command resolves the cart through the provider first, so calling
//! one before initialization yields `UNINITIALIZED`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use shopsmart_core::validation::{validate_product, validate_product_id, validate_quantity};
use shopsmart_core::{CartLine, CartTotals, Product};

use crate::error::ApiError;
use crate::state::{CartProvider, CartStore};

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&CartStore> for CartResponse {
    /// Items and totals come from one committed snapshot.
    fn from(store: &CartStore) -> Self {
        let cart = store.cart();
        CartResponse {
            totals: CartTotals::compute(&cart, &store.options().shipping),
            items: cart.lines().to_vec(),
        }
    }
}

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with items and calculated totals
pub fn get_cart(provider: &CartProvider) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    let store = provider.cart()?;
    Ok(CartResponse::from(&*store))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases
/// - If product not in cart: added as new line
/// - Out-of-stock products are refused
///
/// ## Arguments
/// * `product` - Product to add, as shown in the catalog
/// * `quantity` - Quantity to add (default: 1)
pub async fn add_to_cart(
    provider: &CartProvider,
    product: Product,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product.id, quantity = %quantity, "add_to_cart command");

    validate_product(&product)?;
    validate_quantity(quantity)?;

    if !product.in_stock {
        return Err(ApiError::validation("Product is out of stock"));
    }

    let store = provider.cart()?;
    store.add_to_cart(&product, quantity).await;

    Ok(CartResponse::from(&*store))
}

/// Updates the quantity of a line in the cart.
///
/// ## Behavior
/// - Quantity must be at least 1; use `remove_from_cart` to drop a line
/// - Unknown product ids leave the cart unchanged
pub async fn update_cart_item(
    provider: &CartProvider,
    product_id: String,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    validate_product_id(&product_id)?;
    validate_quantity(quantity)?;

    let store = provider.cart()?;
    store.update_quantity(&product_id, quantity).await;

    Ok(CartResponse::from(&*store))
}

/// Removes a line from the cart. Unknown ids leave the cart unchanged.
pub async fn remove_from_cart(
    provider: &CartProvider,
    product_id: String,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");

    let store = provider.cart()?;
    store.remove_from_cart(&product_id).await;

    Ok(CartResponse::from(&*store))
}

/// Clears all lines from the cart.
pub async fn clear_cart(provider: &CartProvider) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");

    let store = provider.cart()?;
    store.clear_cart().await;

    Ok(CartResponse::from(&*store))
}
