//! User Service Library
//!
//! This crate provides the user store REST API over a key-value backend.
//! It can be run as a standalone service or embedded in another binary.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod service;
pub mod state;
pub mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use common::DEFAULT_USERS_KEY;

use crate::config::UserServiceConfig;
use crate::routes::create_router;
use crate::service::UserManager;
use crate::state::AppState;
use crate::storage::{KeyValueStore, MemoryStore, RedisStore, SeedLoader, UserStorage};

/// Run the user service as an embedded component.
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env();
    run_server_with_config(host, port, config).await
}

/// Overwrite the stored user list with the seed data (for CLI commands).
pub async fn run_reset() -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env();
    let storage = build_storage(&config).await?;

    let users = storage.reset_to_default().await?;
    info!("Reset {} store to {} default users", storage.backend(), users.len());

    Ok(())
}

/// Build user storage from configuration.
///
/// Without a Redis URL the users live in process memory and are lost on exit.
pub async fn build_storage(
    config: &UserServiceConfig,
) -> Result<UserStorage, Box<dyn std::error::Error>> {
    let defaults = SeedLoader::load(&config.seed_path);

    let (kv, key): (Arc<dyn KeyValueStore>, String) = match &config.cache {
        Some(cache) => (
            Arc::new(RedisStore::connect(&cache.url).await?),
            cache.users_key.clone(),
        ),
        None => {
            warn!("No Redis URL configured, keeping users in memory");
            (Arc::new(MemoryStore::new()), DEFAULT_USERS_KEY.to_string())
        }
    };

    Ok(UserStorage::with_key(kv, key, defaults))
}

/// Build app state over the given storage.
pub fn build_state(storage: UserStorage) -> AppState {
    AppState::new(Arc::new(UserManager::new(storage)))
}

/// Serve the API on an already bound listener.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, create_router(state)).await
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: UserServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Create storage and service
    let storage = build_storage(&config).await?;
    let state = build_state(storage);

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("{} listening on {}", config.server.service_name, addr);

    // Run server
    let listener = TcpListener::bind(addr).await?;
    serve(listener, state).await?;

    Ok(())
}
