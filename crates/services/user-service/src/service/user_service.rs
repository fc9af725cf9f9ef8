//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): Handles user-related use cases only.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;

use common::{AppResult, OptionExt};
use domain::{NewUser, User, UserId, UserPatch};

use crate::storage::{next_id, UserStorage};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const USER_ENTITY: &str = "User";

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, id: UserId) -> AppResult<User>;

    /// Create a new user; id, avatar and creation time are assigned here
    async fn create_user(&self, input: NewUser) -> AppResult<User>;

    /// Shallow-merge the supplied fields over an existing user
    async fn update_user(&self, id: UserId, patch: UserPatch) -> AppResult<User>;

    /// Permanently delete a user, returning the removed record
    async fn delete_user(&self, id: UserId) -> AppResult<User>;

    /// Restore the default user list
    async fn reset_users(&self) -> AppResult<Vec<User>>;

    /// Check connectivity to the backing store
    async fn health(&self) -> AppResult<&'static str>;
}

/// Concrete implementation of UserService over [`UserStorage`].
///
/// Every mutation is a read-modify-write of the whole list, so mutations are
/// serialized through `write_lock` and start from a strict read.
pub struct UserManager {
    storage: UserStorage,
    write_lock: Mutex<()>,
}

impl UserManager {
    /// Create new user service instance with storage
    pub fn new(storage: UserStorage) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.storage.get_all().await
    }

    async fn get_user(&self, id: UserId) -> AppResult<User> {
        self.storage
            .get_all()
            .await?
            .into_iter()
            .find(|u| u.id == id)
            .ok_or_not_found(USER_ENTITY)
    }

    async fn create_user(&self, input: NewUser) -> AppResult<User> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.storage.load_for_write().await?;

        let user = input.into_user(next_id(&users), Utc::now());
        users.push(user.clone());
        self.storage.save(&users).await?;

        info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn update_user(&self, id: UserId, patch: UserPatch) -> AppResult<User> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.storage.load_for_write().await?;

        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_not_found(USER_ENTITY)?;
        patch.apply(user);
        let updated = user.clone();
        self.storage.save(&users).await?;

        info!(user_id = id, "Updated user");
        Ok(updated)
    }

    async fn delete_user(&self, id: UserId) -> AppResult<User> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.storage.load_for_write().await?;

        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or_not_found(USER_ENTITY)?;
        let deleted = users.remove(index);
        self.storage.save(&users).await?;

        info!(user_id = id, "Deleted user");
        Ok(deleted)
    }

    async fn reset_users(&self) -> AppResult<Vec<User>> {
        let _guard = self.write_lock.lock().await;
        self.storage.reset_to_default().await
    }

    async fn health(&self) -> AppResult<&'static str> {
        self.storage.ping().await?;
        Ok(self.storage.backend())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::{MemoryStore, MockKeyValueStore, SeedLoader};
    use common::AppError;

    fn manager() -> UserManager {
        UserManager::new(UserStorage::new(
            Arc::new(MemoryStore::new()),
            SeedLoader::builtin(),
        ))
    }

    #[tokio::test]
    async fn test_create_assigns_next_id_and_defaults() {
        let service = manager();
        let user = service
            .create_user(NewUser::new("New User", "n@e.com"))
            .await
            .unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(user.role, "viewer");
        assert_eq!(user.status, "active");
        assert_eq!(user.team, "General");
        assert!(!user.avatar.is_empty());

        let listed = service.list_users().await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed.last(), Some(&user));
    }

    #[tokio::test]
    async fn test_update_merges_and_keeps_created_at() {
        let service = manager();
        let before = service.get_user(1).await.unwrap();

        let updated = service
            .update_user(
                1,
                UserPatch {
                    team: Some("design".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.team, "design");
        assert_eq!(updated.name, before.name);
        assert_eq!(updated.created_at, before.created_at);
        assert_eq!(service.get_user(1).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_unknown_user_not_found() {
        let service = manager();
        let before = service.list_users().await.unwrap();

        let err = service
            .update_user(999, UserPatch::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(service.list_users().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_then_get_not_found() {
        let service = manager();
        let deleted = service.delete_user(2).await.unwrap();
        assert_eq!(deleted.name, "Jane Smith");

        let err = service.get_user(2).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete_of_lower_id() {
        let service = manager();
        service.delete_user(1).await.unwrap();
        let user = service
            .create_user(NewUser::new("Third", "third@example.com"))
            .await
            .unwrap();
        assert_eq!(user.id, 3);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let service = Arc::new(manager());
        let handles: Vec<_> = (0..5)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .create_user(NewUser::new(
                            format!("U{}", i),
                            format!("u{}@example.com", i),
                        ))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        assert_eq!(ids, vec![3, 4, 5, 6, 7]);
    }

    fn unreadable_store_manager() -> UserManager {
        let mut kv = MockKeyValueStore::new();
        kv.expect_get()
            .returning(|_| Err(AppError::internal("transient timeout")));
        kv.expect_backend().return_const("mock");
        kv.expect_set().never();

        UserManager::new(UserStorage::new(Arc::new(kv), SeedLoader::builtin()))
    }

    #[tokio::test]
    async fn test_mutations_fail_when_store_unreadable() {
        let service = unreadable_store_manager();

        let err = service
            .create_user(NewUser::new("X", "x@e.com"))
            .await
            .unwrap_err();
        assert!(err.is_internal());
        assert_eq!(err.details().as_deref(), Some("transient timeout"));

        let patch = UserPatch {
            name: Some("Y".into()),
            ..Default::default()
        };
        assert!(service.update_user(1, patch).await.unwrap_err().is_internal());
        assert!(service.delete_user(1).await.unwrap_err().is_internal());
    }

    #[tokio::test]
    async fn test_reads_serve_defaults_when_store_unreadable() {
        let service = unreadable_store_manager();
        assert_eq!(service.list_users().await.unwrap().len(), 2);
        assert_eq!(service.get_user(2).await.unwrap().name, "Jane Smith");
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        assert_eq!(manager().health().await.unwrap(), "memory");
    }
}
