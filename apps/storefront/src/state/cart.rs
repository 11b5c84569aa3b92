//! # Cart State
//!
//! The cart service: owns the cart, applies mutations, notifies the shopper,
//! and mirrors every change to the durable store.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Mutation, Start To Finish                        │
//! │                                                                         │
//! │  add_to_cart(product, 2)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  spawn mutation task ◄── caller may stop waiting; the task finishes    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lock cart (tokio Mutex) ◄── next mutation waits here                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  next = cart.clone(); next.add(..) ──► Notifier::notify(..)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DurableStore::write("cart", json) ── error? log it, keep going        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart = next; publish snapshot (watch) ──► readers / subscribers       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  unlock                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Writers serialize on the mutex and hold it across the durable write, so
//! the stored payload always matches the latest applied mutation. Readers
//! never touch the mutex; they read the last published snapshot.
//!
//! ## Cancellation
//! Each mutation runs on its own task. Dropping the caller's future (a
//! timeout, `select!`, an aborted request) does not interrupt it, so a
//! mutation is either fully applied, persisted and published, or not
//! started at all.
//!
//! ## Hydration
//! A `CartStore` only comes into existence through [`CartStore::hydrate`],
//! which finishes loading the saved cart before returning. There is no
//! window in which a reader could see an empty placeholder cart.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use shopsmart_core::{
    Cart, CartChange, CartTotals, CoreError, Money, OrderSummary, Product, ShippingPolicy,
    DEFAULT_CART_KEY, DEFAULT_NOTIFICATION_MS,
};
use shopsmart_store::{DurableStore, StoreError};

use crate::notify::{Notification, Notifier};

// =============================================================================
// Errors
// =============================================================================

/// Cart service errors.
///
/// Only `Uninitialized` ever reaches a caller. Hydration and persistence
/// failures are recovered inside the service and logged.
#[derive(Debug, Error)]
pub enum CartError {
    /// The cart was used before its provider was initialized.
    #[error("cart used outside of an initialized provider")]
    Uninitialized,

    /// The saved cart payload could not be parsed.
    #[error("failed to hydrate cart: {0}")]
    Hydration(#[source] CoreError),

    /// The cart could not be encoded for storage.
    #[error("failed to encode cart: {0}")]
    Encode(#[source] CoreError),

    /// The durable store rejected a read or write.
    #[error("cart persistence failed: {0}")]
    Persistence(#[source] StoreError),
}

// =============================================================================
// Options
// =============================================================================

/// Settings the cart service runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct CartOptions {
    /// Storage key the cart is saved under.
    pub storage_key: String,

    /// How long notifications stay on screen.
    pub notification_ms: u64,

    /// Shipping rule for summaries.
    pub shipping: ShippingPolicy,
}

impl Default for CartOptions {
    fn default() -> Self {
        CartOptions {
            storage_key: DEFAULT_CART_KEY.to_string(),
            notification_ms: DEFAULT_NOTIFICATION_MS,
            shipping: ShippingPolicy::default(),
        }
    }
}

// =============================================================================
// CartStore
// =============================================================================

/// The storefront's cart service.
pub struct CartStore {
    shared: Arc<Shared>,
}

/// State shared with in-flight mutation tasks.
struct Shared {
    /// Working cart, replaced only after the new cart has been persisted.
    cart: Mutex<Cart>,

    /// Last committed cart, read by views.
    committed: watch::Sender<Cart>,

    store: Arc<dyn DurableStore>,
    notifier: Arc<dyn Notifier>,
    options: CartOptions,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("storage_key", &self.shared.options.storage_key)
            .field("lines", &self.shared.committed.borrow().len())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Loads the saved cart and returns a ready service.
    ///
    /// ## Recovery
    /// - Nothing saved → empty cart, written back
    /// - Saved payload unparseable → logged, empty cart, written back
    /// - Store read fails → logged, empty cart, NOT written back
    ///
    /// A failed read says nothing about what is saved, so the saved cart
    /// is left alone rather than replaced with an empty one.
    pub async fn hydrate(
        store: Arc<dyn DurableStore>,
        notifier: Arc<dyn Notifier>,
        options: CartOptions,
    ) -> Self {
        let (cart, write_back) = match Shared::load(store.as_ref(), &options.storage_key).await {
            Ok(cart) => (cart, true),
            Err(err @ CartError::Hydration(_)) => {
                warn!(key = %options.storage_key, error = %err, "Discarding unreadable saved cart");
                (Cart::new(), true)
            }
            Err(err) => {
                error!(
                    key = %options.storage_key,
                    error = %err,
                    "Could not read saved cart; starting empty without overwriting it"
                );
                (Cart::new(), false)
            }
        };

        info!(
            key = %options.storage_key,
            lines = cart.len(),
            items = cart.count(),
            "Cart hydrated"
        );

        let (committed, _) = watch::channel(cart.clone());
        let shared = Shared {
            cart: Mutex::new(cart.clone()),
            committed,
            store,
            notifier,
            options,
        };

        if write_back {
            shared.persist(&cart).await;
        }

        CartStore {
            shared: Arc::new(shared),
        }
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds `quantity` of a product, merging into its line if present.
    pub async fn add_to_cart(&self, product: &Product, quantity: i64) {
        let product = product.clone();
        self.run(move |shared| async move { shared.add(&product, quantity).await })
            .await;
    }

    /// Removes a product's line. Unknown ids are ignored silently.
    pub async fn remove_from_cart(&self, product_id: &str) {
        let product_id = product_id.to_string();
        self.run(move |shared| async move { shared.remove(&product_id).await })
            .await;
    }

    /// Sets a line's quantity. Values below 1 are stored as 1; unknown ids
    /// are ignored.
    pub async fn update_quantity(&self, product_id: &str, quantity: i64) {
        let product_id = product_id.to_string();
        self.run(move |shared| async move { shared.set_quantity(&product_id, quantity).await })
            .await;
    }

    /// Empties the cart. Always notifies, even if it was already empty.
    pub async fn clear_cart(&self) {
        self.run(|shared| async move { shared.clear().await }).await;
    }

    /// Runs a mutation on its own task and waits for it.
    async fn run<F, Fut>(&self, mutation: F)
    where
        F: FnOnce(Arc<Shared>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let task = tokio::spawn(mutation(Arc::clone(&self.shared)));
        if let Err(err) = task.await {
            error!(error = %err, "Cart mutation task failed");
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// The committed cart.
    pub fn cart(&self) -> Cart {
        self.shared.committed.borrow().clone()
    }

    /// Sum of `price × quantity` over all lines.
    pub fn cart_total(&self) -> Money {
        self.shared.committed.borrow().total()
    }

    /// Sum of quantities over all lines.
    pub fn cart_count(&self) -> i64 {
        self.shared.committed.borrow().count()
    }

    /// Subtotal, shipping and total.
    pub fn summary(&self) -> OrderSummary {
        self.shared
            .committed
            .borrow()
            .summary(&self.shared.options.shipping)
    }

    /// Totals for API responses.
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.shared.committed.borrow(), &self.shared.options.shipping)
    }

    /// Receives every committed cart from now on.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.shared.committed.subscribe()
    }

    /// Settings this service runs with.
    pub fn options(&self) -> &CartOptions {
        &self.shared.options
    }
}

impl Shared {
    async fn load(store: &dyn DurableStore, key: &str) -> Result<Cart, CartError> {
        match store.read(key).await.map_err(CartError::Persistence)? {
            Some(payload) => Cart::from_json(&payload).map_err(CartError::Hydration),
            None => Ok(Cart::new()),
        }
    }

    async fn add(&self, product: &Product, quantity: i64) {
        let mut cart = self.cart.lock().await;
        let mut next = cart.clone();

        let notification = match next.add(product, quantity) {
            CartChange::Added { name, quantity } => {
                debug!(product_id = %product.id, quantity, "Line added");
                Notification::added(&name)
            }
            CartChange::Increased { name, quantity } => {
                debug!(product_id = %product.id, quantity, "Line increased");
                Notification::increased(&name, quantity)
            }
        };
        self.notify(notification);

        self.commit(&mut cart, next).await;
    }

    async fn remove(&self, product_id: &str) {
        let mut cart = self.cart.lock().await;
        let mut next = cart.clone();

        let Some(removed) = next.remove(product_id) else {
            debug!(product_id = %product_id, "Remove ignored, not in cart");
            return;
        };

        debug!(product_id = %product_id, "Line removed");
        self.notify(Notification::removed(removed.name()));

        self.commit(&mut cart, next).await;
    }

    async fn set_quantity(&self, product_id: &str, quantity: i64) {
        let mut cart = self.cart.lock().await;
        let mut next = cart.clone();

        match next.set_quantity(product_id, quantity) {
            Some(stored) => {
                if stored != quantity {
                    debug!(product_id = %product_id, requested = quantity, stored, "Quantity clamped");
                }
                self.commit(&mut cart, next).await;
            }
            None => debug!(product_id = %product_id, "Update ignored, not in cart"),
        }
    }

    async fn clear(&self) {
        let mut cart = self.cart.lock().await;

        self.notify(Notification::cleared());

        self.commit(&mut cart, Cart::new()).await;
    }

    fn notify(&self, notification: Notification) {
        self.notifier
            .notify(notification.with_duration(self.options.notification_ms));
    }

    /// Persists `next`, then makes it the working and published cart.
    async fn commit(&self, cart: &mut Cart, next: Cart) {
        self.persist(&next).await;
        *cart = next;
        self.committed.send_replace(cart.clone());
    }

    async fn persist(&self, cart: &Cart) {
        if let Err(err) = self.try_persist(cart).await {
            error!(
                key = %self.options.storage_key,
                error = %err,
                "Cart not saved; in-memory cart stays authoritative"
            );
        }
    }

    async fn try_persist(&self, cart: &Cart) -> Result<(), CartError> {
        let payload = cart.to_json().map_err(CartError::Encode)?;
        self.store
            .write(&self.options.storage_key, &payload)
            .await
            .map_err(CartError::Persistence)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shopsmart_store::{MemoryStore, StoreResult};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;
    use tokio::sync::RwLock;

    #[derive(Default)]
    struct RecordingNotifier {
        seen: StdMutex<Vec<Notification>>,
    }

    impl RecordingNotifier {
        fn titles(&self) -> Vec<String> {
            self.seen.lock().unwrap().iter().map(|n| n.title.clone()).collect()
        }

        fn descriptions(&self) -> Vec<String> {
            self.seen
                .lock()
                .unwrap()
                .iter()
                .map(|n| n.description.clone())
                .collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.seen.lock().unwrap().push(notification);
        }
    }

    /// Reads fine, refuses every write, counts attempts.
    #[derive(Default)]
    struct ReadOnlyStore {
        payload: Option<String>,
        writes: StdMutex<usize>,
    }

    #[async_trait]
    impl DurableStore for ReadOnlyStore {
        async fn read(&self, _key: &str) -> StoreResult<Option<String>> {
            Ok(self.payload.clone())
        }

        async fn write(&self, _key: &str, _value: &str) -> StoreResult<()> {
            *self.writes.lock().unwrap() += 1;
            Err(StoreError::Unavailable("quota exceeded".to_string()))
        }
    }

    /// Holds a real store; its first read fails like a busy database.
    struct FlakyReadStore {
        inner: MemoryStore,
        failed_once: AtomicBool,
    }

    impl FlakyReadStore {
        fn holding(payload: &str) -> Self {
            FlakyReadStore {
                inner: MemoryStore::with_value(DEFAULT_CART_KEY, payload),
                failed_once: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl DurableStore for FlakyReadStore {
        async fn read(&self, key: &str) -> StoreResult<Option<String>> {
            if !self.failed_once.swap(true, Ordering::SeqCst) {
                return Err(StoreError::PoolExhausted);
            }
            self.inner.read(key).await
        }

        async fn write(&self, key: &str, value: &str) -> StoreResult<()> {
            self.inner.write(key, value).await
        }
    }

    /// Writes wait while the test holds `gate` for writing.
    #[derive(Default)]
    struct GatedStore {
        inner: MemoryStore,
        gate: RwLock<()>,
    }

    #[async_trait]
    impl DurableStore for GatedStore {
        async fn read(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.read(key).await
        }

        async fn write(&self, key: &str, value: &str) -> StoreResult<()> {
            let _open = self.gate.read().await;
            self.inner.write(key, value).await
        }
    }

    fn product(id: &str, price_cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_cents(price_cents))
    }

    async fn setup(
        store: Arc<dyn DurableStore>,
    ) -> (CartStore, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let cart = CartStore::hydrate(store, notifier.clone(), CartOptions::default()).await;
        (cart, notifier)
    }

    async fn saved(store: &MemoryStore) -> Cart {
        let payload = store.read(DEFAULT_CART_KEY).await.unwrap().unwrap();
        Cart::from_json(&payload).unwrap()
    }

    #[tokio::test]
    async fn test_hydrate_empty_store_writes_empty_cart() {
        let store = Arc::new(MemoryStore::new());
        let (cart, notifier) = setup(store.clone()).await;

        assert!(cart.cart().is_empty());
        assert_eq!(
            store.read(DEFAULT_CART_KEY).await.unwrap().as_deref(),
            Some("[]")
        );
        assert!(notifier.titles().is_empty());
    }

    #[tokio::test]
    async fn test_hydrate_restores_saved_cart() {
        let store = Arc::new(MemoryStore::new());
        {
            let (cart, _) = setup(store.clone()).await;
            cart.add_to_cart(&product("a", 2000), 1).await;
            cart.add_to_cart(&product("b", 500), 4).await;
        }

        let (restored, _) = setup(store.clone()).await;

        let ids: Vec<String> = restored.cart().lines().iter().map(|l| l.id().to_string()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(restored.cart_total(), Money::from_cents(4000));
        assert_eq!(restored.cart_count(), 5);
    }

    #[tokio::test]
    async fn test_hydrate_discards_corrupt_payload() {
        let store = Arc::new(MemoryStore::with_value(DEFAULT_CART_KEY, "{definitely not a cart"));
        let (cart, notifier) = setup(store.clone()).await;

        assert!(cart.cart().is_empty());
        assert!(saved(&store).await.is_empty());
        assert!(notifier.titles().is_empty());
    }

    #[tokio::test]
    async fn test_failed_read_keeps_saved_cart() {
        let saved_payload = r#"[{"id":"a","name":"Tent","priceCents":1000,"quantity":2}]"#;
        let store = Arc::new(FlakyReadStore::holding(saved_payload));

        let (cart, notifier) = setup(store.clone()).await;

        assert!(cart.cart().is_empty());
        assert!(notifier.titles().is_empty());
        assert_eq!(
            store.inner.read(DEFAULT_CART_KEY).await.unwrap().as_deref(),
            Some(saved_payload)
        );

        // the next session reads it back
        let (restored, _) = setup(store.clone()).await;
        assert_eq!(restored.cart_count(), 2);
    }

    #[tokio::test]
    async fn test_abandoned_mutation_still_completes() {
        let store = Arc::new(GatedStore::default());
        let (cart, notifier) = setup(store.clone()).await;
        let mut rx = cart.subscribe();

        let closed = store.gate.write().await;
        let waited = tokio::time::timeout(
            Duration::from_millis(50),
            cart.add_to_cart(&product("a", 100), 1),
        )
        .await;
        assert!(waited.is_err());

        // nothing published until the write lands
        assert_eq!(cart.cart_count(), 0);

        drop(closed);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().count(), 1);
        assert_eq!(saved(&store.inner).await.count(), 1);

        cart.add_to_cart(&product("b", 100), 1).await;

        let ids: Vec<String> = cart.cart().lines().iter().map(|l| l.id().to_string()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(saved(&store.inner).await, cart.cart());
        assert_eq!(notifier.titles(), vec!["Added to cart", "Added to cart"]);
    }

    #[tokio::test]
    async fn test_readers_never_see_unsaved_changes() {
        let store = Arc::new(GatedStore::default());
        let (cart, _) = setup(store.clone()).await;
        let cart = Arc::new(cart);

        let closed = store.gate.write().await;
        let pending = {
            let cart = cart.clone();
            tokio::spawn(async move { cart.clear_cart().await })
        };
        let adding = {
            let cart = cart.clone();
            tokio::spawn(async move { cart.add_to_cart(&product("a", 100), 3).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(cart.cart_count(), 0);
        assert!(saved(&store.inner).await.is_empty());

        drop(closed);
        pending.await.unwrap();
        adding.await.unwrap();

        assert_eq!(saved(&store.inner).await, cart.cart());
    }

    #[tokio::test]
    async fn test_add_merges_and_notifies() {
        let store = Arc::new(MemoryStore::new());
        let (cart, notifier) = setup(store.clone()).await;
        let tent = product("a", 1000);

        cart.add_to_cart(&tent, 2).await;
        cart.add_to_cart(&tent, 3).await;

        let current = cart.cart();
        assert_eq!(current.len(), 1);
        assert_eq!(current.get("a").unwrap().quantity, 5);
        assert_eq!(cart.cart_total(), Money::from_cents(5000));
        assert_eq!(notifier.titles(), vec!["Added to cart", "Cart updated"]);
        assert_eq!(
            notifier.descriptions()[1],
            "Product a quantity increased to 5"
        );
        assert_eq!(saved(&store).await, current);
    }

    #[tokio::test]
    async fn test_remove_notifies_once() {
        let store = Arc::new(MemoryStore::new());
        let (cart, notifier) = setup(store.clone()).await;
        cart.add_to_cart(&product("a", 100), 1).await;
        cart.add_to_cart(&product("b", 100), 1).await;

        cart.remove_from_cart("a").await;
        cart.remove_from_cart("a").await;

        assert_eq!(cart.cart().len(), 1);
        assert_eq!(
            notifier.titles(),
            vec!["Added to cart", "Added to cart", "Removed from cart"]
        );
        assert_eq!(
            notifier.descriptions()[2],
            "Product a has been removed from your cart"
        );
        assert!(saved(&store).await.get("a").is_none());
    }

    #[tokio::test]
    async fn test_update_quantity() {
        let store = Arc::new(MemoryStore::new());
        let (cart, notifier) = setup(store.clone()).await;
        cart.add_to_cart(&product("a", 250), 1).await;

        cart.update_quantity("a", 4).await;
        assert_eq!(cart.cart_count(), 4);
        assert_eq!(saved(&store).await.count(), 4);

        cart.update_quantity("a", 0).await;
        assert_eq!(cart.cart_count(), 1);

        cart.update_quantity("missing", 5).await;
        assert_eq!(cart.cart().len(), 1);
        assert_eq!(notifier.titles(), vec!["Added to cart"]);
    }

    #[tokio::test]
    async fn test_update_missing_on_empty_cart_is_noop() {
        let (cart, notifier) = setup(Arc::new(MemoryStore::new())).await;

        cart.update_quantity("missing", 5).await;

        assert!(cart.cart().is_empty());
        assert!(notifier.titles().is_empty());
    }

    #[tokio::test]
    async fn test_clear_always_notifies() {
        let store = Arc::new(MemoryStore::new());
        let (cart, notifier) = setup(store.clone()).await;
        cart.add_to_cart(&product("a", 999), 3).await;

        cart.clear_cart().await;
        cart.clear_cart().await;

        assert_eq!(cart.cart_count(), 0);
        assert!(cart.cart_total().is_zero());
        assert_eq!(
            notifier.titles(),
            vec!["Added to cart", "Cart cleared", "Cart cleared"]
        );
        assert!(saved(&store).await.is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_keeps_memory_state() {
        let store = Arc::new(ReadOnlyStore::default());
        let (cart, notifier) = setup(store.clone()).await;

        cart.add_to_cart(&product("a", 2000), 1).await;
        cart.add_to_cart(&product("b", 500), 4).await;

        assert_eq!(cart.cart_total(), Money::from_cents(4000));
        assert_eq!(cart.cart_count(), 5);
        assert_eq!(notifier.titles().len(), 2);
        // hydrate + two mutations
        assert_eq!(*store.writes.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_subscribers_see_committed_carts() {
        let (cart, _) = setup(Arc::new(MemoryStore::new())).await;
        let mut rx = cart.subscribe();

        cart.add_to_cart(&product("a", 100), 2).await;

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().count(), 2);
    }

    #[tokio::test]
    async fn test_notification_duration_from_options() {
        let notifier = Arc::new(RecordingNotifier::default());
        let options = CartOptions {
            notification_ms: 1200,
            ..CartOptions::default()
        };
        let cart = CartStore::hydrate(Arc::new(MemoryStore::new()), notifier.clone(), options).await;

        cart.clear_cart().await;

        assert_eq!(notifier.seen.lock().unwrap()[0].duration_ms, 1200);
    }

    #[tokio::test]
    async fn test_summary_and_totals() {
        let (cart, _) = setup(Arc::new(MemoryStore::new())).await;
        cart.add_to_cart(&product("a", 6000), 2).await;

        let summary = cart.summary();
        assert_eq!(summary.subtotal, Money::from_cents(12000));
        assert!(summary.shipping.is_zero());

        let totals = cart.totals();
        assert_eq!(totals.line_count, 1);
        assert_eq!(totals.total_cents, 12000);
    }

    #[tokio::test]
    async fn test_concurrent_mutations_are_serialized() {
        let store = Arc::new(MemoryStore::new());
        let (cart, _) = setup(store.clone()).await;
        let cart = Arc::new(cart);
        let tent = product("a", 100);

        let mut handles = Vec::new();
        for _ in 0..20 {
            let cart = cart.clone();
            let tent = tent.clone();
            handles.push(tokio::spawn(async move {
                cart.add_to_cart(&tent, 1).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cart.cart_count(), 20);
        assert_eq!(saved(&store).await.count(), 20);
    }
}
