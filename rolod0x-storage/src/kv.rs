//! The opaque asynchronous key/value backend.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::StorageResult;

/// Backend holding the persisted options blob.
///
/// Implementations are external (a browser storage area, a settings file,
/// a remote sync service); this crate only requires async point reads and
/// writes. No timeout or cancellation primitives are imposed here;
/// callers that need them wrap the store calls externally.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    async fn get(&self, key: &str) -> StorageResult<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Value) -> StorageResult<()>;
}

/// In-memory reference backend, used by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> StorageResult<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
