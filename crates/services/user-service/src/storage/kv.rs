//! Key-value store seam.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// KeyValueStore provides string values under string keys.
///
/// Users are persisted as one JSON document; the store knows nothing about
/// its structure.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a key-value pair, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> AppResult<()>;

    /// Check connectivity to the backend.
    async fn ping(&self) -> AppResult<()>;

    /// Backend name for logs and health reports.
    fn backend(&self) -> &'static str;
}

/// In-process store used when no Redis URL is configured.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
