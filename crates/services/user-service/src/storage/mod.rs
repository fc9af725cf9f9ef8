//! Storage layer: key-value backends, seed data and the user list.

mod kv;
mod redis_store;
mod seed;
mod user_storage;

#[cfg(any(test, feature = "test-utils"))]
pub use kv::MockKeyValueStore;
pub use kv::{KeyValueStore, MemoryStore};
pub use redis_store::RedisStore;
pub use seed::SeedLoader;
pub use user_storage::{next_id, UserStorage};
