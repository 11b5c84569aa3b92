//! # shopsmart-store: Durable Storage for the Cart
//!
//! The cart is mirrored to a key-value store after every mutation so that
//! it survives restarts. This crate defines that seam and two backends.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     shopsmart-store                                     │
//! │                                                                         │
//! │   DurableStore (trait)                                                 │
//! │   ├── MemoryStore  - HashMap behind a RwLock, process lifetime         │
//! │   └── SqliteStore  - kv_store table, WAL, embedded migrations          │
//! │                                                                         │
//! │   ~/.local/share/shopsmart/shopsmart.db                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`durable`] - The `DurableStore` trait
//! - [`memory`] - In-memory backend
//! - [`pool`] - SQLite backend and its configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shopsmart_store::{DurableStore, SqliteStore, StoreConfig};
//!
//! let store = SqliteStore::open(StoreConfig::new("shopsmart.db")).await?;
//! store.write("cart", "[]").await?;
//! assert_eq!(store.read("cart").await?.as_deref(), Some("[]"));
//! ```

pub mod durable;
pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;

pub use durable::DurableStore;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use pool::{SqliteStore, StoreConfig};
