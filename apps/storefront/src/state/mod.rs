//! # State Module
//!
//! Long-lived storefront state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐        ┌────────────────────────────────────┐    │
//! │  │   ConfigState    │ ─────► │           CartProvider             │    │
//! │  │                  │ options│  OnceCell<Arc<CartStore>>          │    │
//! │  │  cart_key        │        │                                    │    │
//! │  │  shipping        │        │  ┌──────────────────────────────┐  │    │
//! │  │  notification_ms │        │  │  CartStore                   │  │    │
//! │  └──────────────────┘        │  │  Mutex<Cart>  (writers)      │  │    │
//! │                              │  │  watch<Cart>  (readers)      │  │    │
//! │                              │  │  DurableStore + Notifier     │  │    │
//! │                              │  └──────────────────────────────┘  │    │
//! │                              └────────────────────────────────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • ConfigState: Read-only after initialization                         │
//! │  • CartStore: Mutations serialized, reads lock-free snapshots          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod provider;

pub use cart::{CartError, CartOptions, CartStore};
pub use config::ConfigState;
pub use provider::CartProvider;
