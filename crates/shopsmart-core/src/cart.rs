//! # Cart
//!
//! The ordered shopping cart and its derived aggregates.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation                 Effect on lines                              │
//! │  ─────────                 ───────────────                              │
//! │                                                                         │
//! │  add(product, n)  ───────► id present? lines[i].qty += n                │
//! │                            id absent?  lines.push(line)                 │
//! │                                                                         │
//! │  set_quantity(id, n) ────► lines[i].qty = max(n, 1)                     │
//! │                                                                         │
//! │  remove(id) ─────────────► lines.remove(i)                              │
//! │                                                                         │
//! │  clear() ────────────────► lines.clear()                                │
//! │                                                                         │
//! │  total() / count() ──────► (read only, recomputed every call)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by product id (adding the same product merges)
//! - Every quantity is at least 1; nothing is removed implicitly
//! - Insertion order is preserved, first added stays first
//!
//! ## Persisted Form
//! The cart is stored as a JSON array of lines. Each line is the product's
//! fields plus `quantity`:
//! ```json
//! [{"id":"a","name":"Trail Tent","priceCents":1000,"category":"outdoor",
//!   "rating":4.5,"inStock":true,"quantity":2}]
//! ```
//! Unknown fields are ignored when reading, so payloads written by newer
//! storefront builds still load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ShippingPolicy};

/// Smallest quantity a line can hold.
pub const MIN_QUANTITY: i64 = 1;

#[inline]
fn clamp_quantity(quantity: i64) -> i64 {
    quantity.max(MIN_QUANTITY)
}

// =============================================================================
// Cart Line
// =============================================================================

/// A product in the cart together with the requested quantity.
///
/// ## Design Notes
/// The product fields are a frozen copy taken when the line was created.
/// Later catalog changes (price, name) do not rewrite lines already in the
/// cart; merging into an existing line keeps the original copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Product fields at the time of adding.
    #[serde(flatten)]
    pub product: Product,

    /// Requested quantity, at least 1.
    pub quantity: i64,

    /// When this line was first added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub added_at: Option<DateTime<Utc>>,
}

impl CartLine {
    /// Creates a new line from a product and quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product: product.clone(),
            quantity: clamp_quantity(quantity),
            added_at: Some(Utc::now()),
        }
    }

    /// The product identifier this line is keyed by.
    #[inline]
    pub fn id(&self) -> &str {
        &self.product.id
    }

    /// The product name, for notifications and display.
    #[inline]
    pub fn name(&self) -> &str {
        &self.product.name
    }

    /// Unit price.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.product.price()
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart Change
// =============================================================================

/// What `Cart::add` did, so callers can tell the shopper about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended.
    Added { name: String, quantity: i64 },

    /// An existing line was merged into; `quantity` is the new total.
    Increased { name: String, quantity: i64 },
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Builds a cart from lines of unknown provenance.
    ///
    /// ## Normalization
    /// - Duplicate ids are merged into the first occurrence (quantities summed)
    /// - Quantities below 1 are clamped to 1
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Cart::new();
        for mut line in lines {
            line.quantity = clamp_quantity(line.quantity);
            match cart.position(line.id()) {
                Some(index) => {
                    let existing = &mut cart.lines[index];
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Decodes the persisted JSON form.
    ///
    /// ## Errors
    /// `CoreError::InvalidCartPayload` if the payload is not an array of lines.
    pub fn from_json(payload: &str) -> CoreResult<Self> {
        let lines: Vec<CartLine> =
            serde_json::from_str(payload).map_err(CoreError::InvalidCartPayload)?;
        Ok(Cart::from_lines(lines))
    }

    /// Encodes the cart into its persisted JSON form.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(&self.lines).map_err(CoreError::Encode)
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - If product already in cart: quantity increases by `quantity`
    /// - If product not in cart: a new line is appended at the end
    /// - `quantity` below 1 is treated as 1
    pub fn add(&mut self, product: &Product, quantity: i64) -> CartChange {
        let quantity = clamp_quantity(quantity);

        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            return CartChange::Increased {
                name: product.name.clone(),
                quantity: line.quantity,
            };
        }

        self.lines.push(CartLine::from_product(product, quantity));
        CartChange::Added {
            name: product.name.clone(),
            quantity,
        }
    }

    /// Removes the line for `product_id`, returning it if it was present.
    pub fn remove(&mut self, product_id: &str) -> Option<CartLine> {
        let index = self.position(product_id)?;
        Some(self.lines.remove(index))
    }

    /// Replaces the quantity of the line for `product_id`.
    ///
    /// ## Behavior
    /// - Quantities below 1 are clamped to 1 (the line is kept)
    /// - Returns the stored quantity, or `None` if the product isn't in the cart
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> Option<i64> {
        let line = self.lines.iter_mut().find(|l| l.product.id == product_id)?;
        line.quantity = clamp_quantity(quantity);
        Some(line.quantity)
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up the line for a product.
    pub fn get(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `price × quantity` over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines, saturating at `i64::MAX`.
    pub fn count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0_i64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Order summary under a shipping policy.
    ///
    /// An empty cart ships for free; any non-empty cart goes through the
    /// policy, even if every line is priced at zero.
    pub fn summary(&self, policy: &ShippingPolicy) -> OrderSummary {
        let subtotal = self.total();
        let shipping = if self.is_empty() {
            Money::zero()
        } else {
            policy.shipping_for(subtotal)
        };
        OrderSummary::new(subtotal, shipping)
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.product.id == product_id)
    }
}

// =============================================================================
// Derived Aggregates
// =============================================================================

/// Subtotal, shipping and total as shown on the cart page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummary {
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

impl OrderSummary {
    /// Combines a subtotal with the shipping charged on it.
    pub fn new(subtotal: Money, shipping: Money) -> Self {
        OrderSummary {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

/// Cart totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal_cents: i64,
    pub shipping_cents: i64,
    pub total_cents: i64,
}

impl CartTotals {
    /// Computes totals for a cart under a shipping policy.
    pub fn compute(cart: &Cart, policy: &ShippingPolicy) -> Self {
        let summary = cart.summary(policy);
        CartTotals {
            line_count: cart.len(),
            total_quantity: cart.count(),
            subtotal_cents: summary.subtotal.cents(),
            shipping_cents: summary.shipping.cents(),
            total_cents: summary.total.cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price_cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_cents(price_cents))
    }

    fn quantities(cart: &Cart) -> Vec<(&str, i64)> {
        cart.lines().iter().map(|l| (l.id(), l.quantity)).collect()
    }

    #[test]
    fn test_add_new_product_appends() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 999), 1);

        let change = cart.add(&test_product("b", 500), 2);

        assert_eq!(
            change,
            CartChange::Added {
                name: "Product b".to_string(),
                quantity: 2
            }
        );
        assert_eq!(quantities(&cart), vec![("a", 1), ("b", 2)]);
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = Cart::new();
        let product = test_product("a", 1000);

        cart.add(&product, 2);
        let change = cart.add(&product, 3);

        assert_eq!(
            change,
            CartChange::Increased {
                name: "Product a".to_string(),
                quantity: 5
            }
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Money::from_cents(5000));
    }

    #[test]
    fn test_merge_keeps_original_position() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 100), 1);
        cart.add(&test_product("b", 100), 1);
        cart.add(&test_product("a", 100), 1);

        assert_eq!(quantities(&cart), vec![("a", 2), ("b", 1)]);
    }

    #[test]
    fn test_add_clamps_non_positive_quantity() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 100), 0);
        cart.add(&test_product("b", 100), -4);

        assert_eq!(quantities(&cart), vec![("a", 1), ("b", 1)]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 100), 1);
        cart.add(&test_product("b", 100), 1);

        let removed = cart.remove("a").unwrap();
        assert_eq!(removed.name(), "Product a");

        let before = cart.clone();
        assert!(cart.remove("a").is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 100), 3);

        assert_eq!(cart.set_quantity("a", 7), Some(7));
        assert_eq!(cart.set_quantity("a", 0), Some(1));
        assert_eq!(cart.set_quantity("a", -2), Some(1));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_set_quantity_missing_is_noop() {
        let mut cart = Cart::new();
        assert_eq!(cart.set_quantity("missing", 5), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_and_count() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 2000), 1);
        cart.add(&test_product("b", 500), 4);

        assert_eq!(cart.total(), Money::from_cents(4000));
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 999), 2);

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_json_round_trip_preserves_order_and_quantities() {
        let mut cart = Cart::new();
        cart.add(&test_product("z", 150), 2);
        cart.add(&test_product("a", 300), 1);
        cart.add(&test_product("m", 75), 9);

        let restored = Cart::from_json(&cart.to_json().unwrap()).unwrap();

        assert_eq!(restored, cart);
    }

    #[test]
    fn test_from_json_ignores_unknown_fields() {
        let payload = r#"[{"id":"a","name":"Tent","priceCents":1000,"quantity":2,
                           "giftWrap":true,"warehouse":{"bin":"A4"}}]"#;
        let cart = Cart::from_json(payload).unwrap();

        assert_eq!(cart.count(), 2);
        assert_eq!(cart.total(), Money::from_cents(2000));
    }

    #[test]
    fn test_from_json_rejects_malformed_payloads() {
        assert!(matches!(
            Cart::from_json("{not json"),
            Err(CoreError::InvalidCartPayload(_))
        ));
        assert!(Cart::from_json(r#"{"id":"a"}"#).is_err());
        assert!(Cart::from_json(r#"[{"id":"a","name":"Tent"}]"#).is_err());
    }

    #[test]
    fn test_from_lines_normalizes() {
        let tent = test_product("a", 100);
        let mut first = CartLine::from_product(&tent, 2);
        first.quantity = 0;
        let second = CartLine::from_product(&tent, 3);
        let other = CartLine::from_product(&test_product("b", 100), 1);

        let cart = Cart::from_lines(vec![first, other, second]);

        assert_eq!(quantities(&cart), vec![("a", 4), ("b", 1)]);
    }

    #[test]
    fn test_cart_totals_with_shipping() {
        let policy = ShippingPolicy::default();
        let mut cart = Cart::new();
        cart.add(&test_product("a", 2000), 1);
        cart.add(&test_product("b", 500), 4);

        let totals = CartTotals::compute(&cart, &policy);

        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_quantity, 5);
        assert_eq!(totals.subtotal_cents, 4000);
        assert_eq!(totals.shipping_cents, 1000);
        assert_eq!(totals.total_cents, 5000);
    }

    #[test]
    fn test_empty_cart_has_no_shipping() {
        let summary = Cart::new().summary(&ShippingPolicy::default());
        assert!(summary.total.is_zero());
    }

    #[test]
    fn test_free_items_still_ship() {
        let mut cart = Cart::new();
        cart.add(&test_product("sticker", 0), 1);

        let summary = cart.summary(&ShippingPolicy::default());

        assert!(summary.subtotal.is_zero());
        assert_eq!(summary.shipping, Money::from_cents(1000));
        assert_eq!(summary.total, Money::from_cents(1000));
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 1000), i64::MAX / 100);
        assert_eq!(cart.total().cents(), i64::MAX);

        let payload = r#"[{"id":"a","name":"Tent","priceCents":1000,"quantity":9223372036854775807},
                          {"id":"b","name":"Stove","priceCents":500,"quantity":9223372036854775807}]"#;
        let cart = Cart::from_json(payload).unwrap();

        assert_eq!(cart.count(), i64::MAX);
        assert_eq!(cart.total().cents(), i64::MAX);
        assert_eq!(
            CartTotals::compute(&cart, &ShippingPolicy::default()).total_cents,
            i64::MAX
        );
    }
}
