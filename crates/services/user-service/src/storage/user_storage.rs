//! User list persistence on top of a key-value store.

use std::sync::Arc;

use tracing::{info, warn};

use common::{AppResult, DEFAULT_USERS_KEY};
use domain::{User, UserId};

use super::kv::KeyValueStore;

/// UserStorage keeps the whole user list as one JSON array under a single key.
///
/// `get_all` never fails on store unavailability: a failed read serves the
/// default users instead. `load_for_write` and writes propagate their errors.
#[derive(Clone)]
pub struct UserStorage {
    kv: Arc<dyn KeyValueStore>,
    key: String,
    defaults: Arc<Vec<User>>,
}

impl UserStorage {
    /// Create storage over `kv` seeded with `defaults`, using the default key.
    pub fn new(kv: Arc<dyn KeyValueStore>, defaults: Vec<User>) -> Self {
        Self::with_key(kv, DEFAULT_USERS_KEY, defaults)
    }

    /// Create storage using a custom key.
    pub fn with_key(
        kv: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        defaults: Vec<User>,
    ) -> Self {
        Self {
            kv,
            key: key.into(),
            defaults: Arc::new(defaults),
        }
    }

    /// Backend name of the underlying store.
    pub fn backend(&self) -> &'static str {
        self.kv.backend()
    }

    /// Check connectivity to the underlying store.
    pub async fn ping(&self) -> AppResult<()> {
        self.kv.ping().await
    }

    /// Get every user, seeding the store with the defaults when it is empty.
    pub async fn get_all(&self) -> AppResult<Vec<User>> {
        match self.kv.get(&self.key).await {
            Ok(stored) => self.decode_or_seed(stored).await,
            Err(e) => {
                warn!(
                    "Error reading users from {} store, serving defaults: {}",
                    self.backend(),
                    e
                );
                Ok(self.defaults.to_vec())
            }
        }
    }

    /// Get every user as the base of a read-modify-write.
    ///
    /// Store errors propagate so a mutation never saves over a list it could
    /// not read.
    pub async fn load_for_write(&self) -> AppResult<Vec<User>> {
        let stored = self.kv.get(&self.key).await?;
        self.decode_or_seed(stored).await
    }

    async fn decode_or_seed(&self, stored: Option<String>) -> AppResult<Vec<User>> {
        let users: Vec<User> = match stored {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };

        if users.is_empty() {
            info!(
                "Initializing {} store with {} default users",
                self.backend(),
                self.defaults.len()
            );
            if let Err(e) = self.save(&self.defaults).await {
                warn!("Failed to seed {} store: {}", self.backend(), e);
            }
            return Ok(self.defaults.to_vec());
        }

        Ok(users)
    }

    /// Replace the stored list.
    pub async fn save(&self, users: &[User]) -> AppResult<()> {
        let json = serde_json::to_string(users)?;
        self.kv.set(&self.key, json).await
    }

    /// Overwrite the stored list with the defaults.
    pub async fn reset_to_default(&self) -> AppResult<Vec<User>> {
        info!(
            "Resetting {} store with {} default users",
            self.backend(),
            self.defaults.len()
        );
        self.save(&self.defaults).await?;
        Ok(self.defaults.to_vec())
    }
}

/// Next free identifier: max existing id + 1, or 1 for an empty list.
pub fn next_id(users: &[User]) -> UserId {
    users.iter().map(|u| u.id).max().map_or(1, |max| max + 1)
}
