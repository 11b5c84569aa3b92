//! # Configuration State
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SHOPSMART_*`)
//! 2. Defaults (this file)
//!
//! Unparseable values are logged and the default kept.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use shopsmart_core::{Money, ShippingPolicy, DEFAULT_CART_KEY, DEFAULT_NOTIFICATION_MS};

use super::cart::CartOptions;

/// Storefront configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// SQLite file the cart is saved in.
    /// Default: none (platform data directory is used)
    pub store_path: Option<PathBuf>,

    /// Storage key for the cart.
    /// Default: "cart"
    pub cart_key: String,

    /// Notification duration in milliseconds.
    /// Default: 3000
    pub notification_ms: u64,

    /// Flat shipping fee in cents.
    pub shipping_fee_cents: i64,

    /// Subtotal in cents above which shipping is free.
    pub free_shipping_above_cents: i64,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Cart key: "cart"
    /// - Notifications: 3 seconds
    /// - Shipping: $10.00, free above $100.00
    fn default() -> Self {
        let shipping = ShippingPolicy::default();
        ConfigState {
            store_path: None,
            cart_key: DEFAULT_CART_KEY.to_string(),
            notification_ms: DEFAULT_NOTIFICATION_MS,
            shipping_fee_cents: shipping.flat_fee.cents(),
            free_shipping_above_cents: shipping.free_above.cents(),
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SHOPSMART_STORE_PATH`: SQLite file for the cart
    /// - `SHOPSMART_CART_KEY`: Storage key
    /// - `SHOPSMART_NOTIFICATION_MS`: Notification duration
    /// - `SHOPSMART_SHIPPING_FEE`: Flat fee, e.g. "10.00"
    /// - `SHOPSMART_FREE_SHIPPING_ABOVE`: Threshold, e.g. "100.00"
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(path) = lookup("SHOPSMART_STORE_PATH").filter(|p| !p.is_empty()) {
            config.store_path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("SHOPSMART_CART_KEY").filter(|k| !k.is_empty()) {
            config.cart_key = key;
        }

        if let Some(raw) = lookup("SHOPSMART_NOTIFICATION_MS") {
            match raw.parse::<u64>() {
                Ok(ms) => config.notification_ms = ms,
                Err(_) => warn!(value = %raw, "Ignoring invalid SHOPSMART_NOTIFICATION_MS"),
            }
        }

        if let Some(raw) = lookup("SHOPSMART_SHIPPING_FEE") {
            match raw.parse::<Money>() {
                Ok(fee) if !fee.is_negative() => config.shipping_fee_cents = fee.cents(),
                _ => warn!(value = %raw, "Ignoring invalid SHOPSMART_SHIPPING_FEE"),
            }
        }

        if let Some(raw) = lookup("SHOPSMART_FREE_SHIPPING_ABOVE") {
            match raw.parse::<Money>() {
                Ok(above) if !above.is_negative() => {
                    config.free_shipping_above_cents = above.cents()
                }
                _ => warn!(value = %raw, "Ignoring invalid SHOPSMART_FREE_SHIPPING_ABOVE"),
            }
        }

        config
    }

    /// Shipping rule built from this configuration.
    pub fn shipping_policy(&self) -> ShippingPolicy {
        ShippingPolicy::new(
            Money::from_cents(self.shipping_fee_cents),
            Money::from_cents(self.free_shipping_above_cents),
        )
    }

    /// Cart service settings built from this configuration.
    pub fn cart_options(&self) -> CartOptions {
        CartOptions {
            storage_key: self.cart_key.clone(),
            notification_ms: self.notification_ms,
            shipping: self.shipping_policy(),
        }
    }

}
