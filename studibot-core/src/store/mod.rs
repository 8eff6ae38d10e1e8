//! Persisted key/value state shared by every component.
//!
//! Values are JSON documents addressed by a string key. There are no
//! transactions; the last write to a key wins. When the backing store is
//! unavailable every call degrades to a no-op and callers keep working on
//! their in-memory state.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::StoreResult;

/// A backing store for raw JSON values.
pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> StoreResult<Option<serde_json::Value>>;
    fn save(&self, key: &str, value: &serde_json::Value) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Typed handle over a `KeyValueStore`, cheap to clone and pass to each component.
#[derive(Clone)]
pub struct Store {
    inner: Arc<dyn KeyValueStore>,
}

impl Store {
    pub fn new(inner: impl KeyValueStore + 'static) -> Self {
        Store {
            inner: Arc::new(inner),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    /// Read and decode `key`. Absent, unreadable and undecodable values are all `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = match self.inner.load(key) {
            Ok(value) => value?,
            Err(e) => {
                warn!(key, error = %e, "Failed to read persisted value");
                return None;
            }
        };

        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(key, error = %e, "Ignoring malformed persisted value");
                None
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize value for persistence");
                return;
            }
        };

        if let Err(e) = self.inner.save(key, &value) {
            warn!(key, error = %e, "Failed to persist value, keeping it in memory only");
        }
    }

    pub fn delete(&self, key: &str) {
        if let Err(e) = self.inner.remove(key) {
            warn!(key, error = %e, "Failed to delete persisted value");
        }
    }
}
