//! # Cart Provider
//!
//! Holds the one shared [`CartStore`] for the application.
//!
//! Views ask the provider for the cart. Until [`CartProvider::initialize`]
//! has finished hydrating, they get [`CartError::Uninitialized`] instead of
//! a half-loaded cart.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::debug;

use shopsmart_store::DurableStore;

use super::cart::{CartError, CartOptions, CartStore};
use crate::notify::Notifier;

/// Application-wide access point for the cart service.
#[derive(Debug, Default)]
pub struct CartProvider {
    store: OnceCell<Arc<CartStore>>,
}

impl CartProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        CartProvider::default()
    }

    /// Hydrates the cart service on first call and returns it.
    ///
    /// Concurrent callers wait on the same hydration; later calls return
    /// the existing service and ignore their arguments.
    pub async fn initialize(
        &self,
        store: Arc<dyn DurableStore>,
        notifier: Arc<dyn Notifier>,
        options: CartOptions,
    ) -> Arc<CartStore> {
        self.store
            .get_or_init(|| async move {
                debug!("Initializing cart provider");
                Arc::new(CartStore::hydrate(store, notifier, options).await)
            })
            .await
            .clone()
    }

    /// The cart service, or `Uninitialized` if hydration hasn't finished.
    pub fn cart(&self) -> Result<Arc<CartStore>, CartError> {
        self.store.get().cloned().ok_or(CartError::Uninitialized)
    }

    /// Whether the cart service is available.
    pub fn is_initialized(&self) -> bool {
        self.store.initialized()
    }
}
