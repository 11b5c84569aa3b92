//! # Durable Store Seam
//!
//! The key-value contract the cart service persists through.
//!
//! ```text
//! ┌──────────────┐   read(key)  / write(key, value)   ┌──────────────────┐
//! │  CartStore   │ ─────────────────────────────────► │  DurableStore    │
//! └──────────────┘                                    │  ├─ MemoryStore  │
//!                                                     │  └─ SqliteStore  │
//!                                                     └──────────────────┘
//! ```
//!
//! Values are opaque strings; the cart decides the encoding. A write
//! replaces whatever was stored under the key.

use async_trait::async_trait;

use crate::error::StoreResult;

/// A persistent key-value mechanism that outlives a single process.
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &str) -> StoreResult<()>;
}
