//! Shared configuration structures.

use serde::{Deserialize, Serialize};

/// Key under which the user list is stored
pub const DEFAULT_USERS_KEY: &str = "users";

/// Address a service binds to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging
    pub service_name: String,
    pub host: String,
    pub port: u16,
}

impl ServiceConfig {
    pub fn new(service_name: impl Into<String>, port: u16) -> Self {
        Self {
            service_name: service_name.into(),
            host: "0.0.0.0".to_string(),
            port,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new("service", 3000)
    }
}

/// Redis key-value store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    pub url: String,
    /// Key holding the serialized user list
    pub users_key: String,
}

impl CacheConfig {
    /// Configuration for a Redis URL with the default key.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            users_key: DEFAULT_USERS_KEY.to_string(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new("redis://127.0.0.1:6379")
    }
}
