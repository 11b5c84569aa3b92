//! # In-Memory Store
//!
//! A `DurableStore` backed by a map. Nothing survives the process, which is
//! what tests and throwaway sessions want.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::durable::DurableStore;
use crate::error::StoreResult;

/// Map-backed store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one value already present.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        MemoryStore {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl DurableStore for MemoryStore {
    async fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
