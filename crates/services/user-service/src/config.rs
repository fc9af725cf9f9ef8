//! User service configuration.

use std::env;
use std::path::PathBuf;

use common::{CacheConfig, ServiceConfig};

/// Default seed file, relative to the working directory
pub const DEFAULT_SEED_PATH: &str = "data/db.json";

pub const DEFAULT_PORT: u16 = 3001;

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Redis store; `None` keeps users in process memory
    pub cache: Option<CacheConfig>,
    /// JSON file with the default user list
    pub seed_path: PathBuf,
    /// Bind address
    pub server: ServiceConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let cache = env::var("USER_SERVICE_REDIS_URL")
            .or_else(|_| env::var("REDIS_URL"))
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|url| {
                let mut cache = CacheConfig::new(url);
                if let Ok(key) = env::var("USER_SERVICE_USERS_KEY") {
                    cache.users_key = key;
                }
                cache
            });

        let mut server = ServiceConfig::new("user-service", DEFAULT_PORT);
        if let Ok(host) = env::var("USER_SERVICE_HOST") {
            server.host = host;
        }
        if let Some(port) = env::var("USER_SERVICE_PORT").ok().and_then(|p| p.parse().ok()) {
            server.port = port;
        }

        Self {
            cache,
            seed_path: env::var("USER_SERVICE_SEED_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SEED_PATH)),
            server,
        }
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            cache: None,
            seed_path: PathBuf::from(DEFAULT_SEED_PATH),
            server: ServiceConfig::new("user-service", DEFAULT_PORT),
        }
    }
}
