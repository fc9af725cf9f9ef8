//! User state store: the session's in-memory copy of the user list.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};

use domain::{NewUser, User, UserId, UserPatch};

use crate::api::{ClientError, UserApi};

/// Store operation failures, each wrapping the adapter error.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to fetch users: {0}")]
    Fetch(#[source] ClientError),

    #[error("Failed to get user: {0}")]
    Get(#[source] ClientError),

    #[error("Failed to create user: {0}")]
    Create(#[source] ClientError),

    #[error("Failed to update user: {0}")]
    Update(#[source] ClientError),

    #[error("Failed to delete user: {0}")]
    Delete(#[source] ClientError),
}

impl StoreError {
    /// Underlying adapter error
    pub fn client_error(&self) -> &ClientError {
        match self {
            StoreError::Fetch(e)
            | StoreError::Get(e)
            | StoreError::Create(e)
            | StoreError::Update(e)
            | StoreError::Delete(e) => e,
        }
    }

    /// Check if the target user does not exist remotely
    pub fn is_not_found(&self) -> bool {
        self.client_error().is_not_found()
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// UserStore owns the user list for one session.
///
/// Starts empty and not loaded; `clear` returns it to that state. Mutations
/// only touch the local list after the remote call succeeded.
pub struct UserStore {
    api: Arc<dyn UserApi>,
    users: Vec<User>,
    loaded: bool,
}

impl UserStore {
    /// Create an empty, not-loaded store.
    pub fn new(api: Arc<dyn UserApi>) -> Self {
        Self {
            api,
            users: Vec::new(),
            loaded: false,
        }
    }

    /// Current local list.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Whether a list has been loaded this session.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Find a user in the local list.
    pub fn find(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Load the list once; later calls are no-ops until `refetch`.
    pub async fn fetch(&mut self) -> StoreResult<&[User]> {
        if self.loaded {
            debug!("User list already loaded, skipping fetch");
            return Ok(&self.users);
        }
        self.refetch().await
    }

    /// Reload the list unconditionally, replacing local state.
    pub async fn refetch(&mut self) -> StoreResult<&[User]> {
        let users = self.api.list().await.map_err(|e| {
            error!("Error fetching users: {}", e);
            StoreError::Fetch(e)
        })?;

        debug!("Loaded {} users", users.len());
        self.users = users;
        self.loaded = true;
        Ok(&self.users)
    }

    /// Get one user from the remote store.
    pub async fn get(&self, id: UserId) -> StoreResult<User> {
        self.api.get(id).await.map_err(|e| {
            error!("Error getting user {}: {}", id, e);
            StoreError::Get(e)
        })
    }

    /// Create a user from form data and append the stored record.
    pub async fn add(&mut self, data: UserPatch) -> StoreResult<User> {
        let input = data
            .check_choices(None)
            .and_then(|_| NewUser::try_from(data))
            .map_err(|e| StoreError::Create(ClientError::from(e)))
            .map_err(log_create)?;

        let user = self
            .api
            .create(input)
            .await
            .map_err(StoreError::Create)
            .map_err(log_create)?;

        self.users.push(user.clone());
        Ok(user)
    }

    /// Update a user remotely and replace the local copy.
    pub async fn edit(&mut self, id: UserId, patch: UserPatch) -> StoreResult<User> {
        patch.check_choices(self.find(id)).map_err(|e| {
            error!("Error updating user {}: {}", id, e);
            StoreError::Update(ClientError::from(e))
        })?;

        let user = self.api.update(id, patch).await.map_err(|e| {
            error!("Error updating user {}: {}", id, e);
            StoreError::Update(e)
        })?;

        if let Some(existing) = self.users.iter_mut().find(|u| u.id == id) {
            *existing = user.clone();
        }
        Ok(user)
    }

    /// Delete a user remotely and drop it from the local list.
    pub async fn remove(&mut self, id: UserId) -> StoreResult<()> {
        self.api.delete(id).await.map_err(|e| {
            error!("Error deleting user {}: {}", id, e);
            StoreError::Delete(e)
        })?;

        self.users.retain(|u| u.id != id);
        Ok(())
    }

    /// Session teardown: forget the list and the loaded flag.
    pub fn clear(&mut self) {
        self.users.clear();
        self.loaded = false;
    }
}

fn log_create(err: StoreError) -> StoreError {
    error!("Error creating user: {}", err.client_error());
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockUserApi;
    use chrono::{TimeZone, Utc};
    use mockall::predicate::eq;

    fn user(id: UserId, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            role: "viewer".to_string(),
            team: "sales".to_string(),
            status: "active".to_string(),
            avatar: String::new(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn seeded_api() -> MockUserApi {
        let mut api = MockUserApi::new();
        api.expect_list()
            .returning(|| Ok(vec![user(1, "John Doe"), user(2, "Jane Smith")]));
        api
    }

    async fn loaded_store(api: MockUserApi) -> UserStore {
        let mut store = UserStore::new(Arc::new(api));
        store.fetch().await.unwrap();
        store
    }

    fn server_error() -> ClientError {
        ClientError::Http {
            status: 500,
            body: "{\"error\":\"Internal server error\"}".into(),
        }
    }

    #[tokio::test]
    async fn test_fetch_is_guarded() {
        let mut api = MockUserApi::new();
        api.expect_list()
            .times(1)
            .returning(|| Ok(vec![user(1, "John Doe")]));

        let mut store = UserStore::new(Arc::new(api));
        assert!(!store.is_loaded());

        store.fetch().await.unwrap();
        store.fetch().await.unwrap();
        assert!(store.is_loaded());
        assert_eq!(store.users().len(), 1);
    }

    #[tokio::test]
    async fn test_refetch_always_reloads() {
        let mut api = MockUserApi::new();
        api.expect_list().times(2).returning(|| Ok(vec![]));

        let mut store = UserStore::new(Arc::new(api));
        store.fetch().await.unwrap();
        store.refetch().await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_resets_lifecycle() {
        let mut api = MockUserApi::new();
        api.expect_list()
            .times(2)
            .returning(|| Ok(vec![user(1, "John Doe")]));

        let mut store = UserStore::new(Arc::new(api));
        store.fetch().await.unwrap();
        store.clear();
        assert!(!store.is_loaded());
        assert!(store.users().is_empty());

        store.fetch().await.unwrap();
        assert_eq!(store.users().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_store_unloaded() {
        let mut api = MockUserApi::new();
        api.expect_list().returning(|| Err(server_error()));

        let mut store = UserStore::new(Arc::new(api));
        let err = store.fetch().await.unwrap_err();
        assert!(matches!(err, StoreError::Fetch(_)));
        assert!(!store.is_loaded());
    }

    #[tokio::test]
    async fn test_add_appends_server_record() {
        let mut api = seeded_api();
        api.expect_create()
            .withf(|input| input.name == "New User" && input.role.is_none())
            .returning(|input| Ok(input.into_user(3, Utc::now())));

        let mut store = loaded_store(api).await;
        let created = store
            .add(UserPatch {
                name: Some("New User".into()),
                email: Some("n@e.com".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(created.role, "viewer");
        assert_eq!(store.users().len(), 3);
        assert_eq!(store.users()[2], created);
    }

    #[tokio::test]
    async fn test_add_without_email_never_calls_api() {
        let mut api = seeded_api();
        api.expect_create().never();

        let mut store = loaded_store(api).await;
        let err = store
            .add(UserPatch {
                name: Some("No Email".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Create(ClientError::Validation(_))));
        assert_eq!(store.users().len(), 2);
    }

    #[tokio::test]
    async fn test_add_rejects_unknown_role_without_api_call() {
        let mut api = seeded_api();
        api.expect_create().never();

        let mut store = loaded_store(api).await;
        let err = store
            .add(UserPatch {
                name: Some("Eve".into()),
                email: Some("eve@example.com".into()),
                role: Some("superuser".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Create(ClientError::Validation(_))));
        assert_eq!(store.users().len(), 2);
    }

    #[tokio::test]
    async fn test_edit_rejects_unknown_status_without_api_call() {
        let mut api = seeded_api();
        api.expect_update().never();

        let mut store = loaded_store(api).await;
        let err = store
            .edit(
                1,
                UserPatch {
                    status: Some("archived".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Update(ClientError::Validation(_))));
        assert_eq!(store.find(1).unwrap().status, "active");
    }

    #[tokio::test]
    async fn test_edit_accepts_unchanged_legacy_value() {
        let mut api = MockUserApi::new();
        api.expect_list().returning(|| {
            let mut legacy = user(1, "John Doe");
            legacy.team = "engineering".to_string();
            Ok(vec![legacy])
        });
        api.expect_update().times(1).returning(|id, patch| {
            let mut updated = user(id, "John Doe");
            patch.apply(&mut updated);
            Ok(updated)
        });

        let mut store = loaded_store(api).await;
        let mut patch = UserPatch::from(store.find(1).unwrap());
        patch.name = Some("Johnny Doe".into());

        let updated = store.edit(1, patch).await.unwrap();
        assert_eq!(updated.team, "engineering");
    }

    #[tokio::test]
    async fn test_edit_replaces_by_id() {
        let mut api = seeded_api();
        api.expect_update()
            .with(eq(2), mockall::predicate::always())
            .returning(|id, patch| {
                let mut updated = user(id, "Jane Smith");
                patch.apply(&mut updated);
                Ok(updated)
            });

        let mut store = loaded_store(api).await;
        store
            .edit(
                2,
                UserPatch {
                    status: Some("inactive".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(store.find(2).unwrap().status, "inactive");
        assert_eq!(store.find(1).unwrap().status, "active");
    }

    #[tokio::test]
    async fn test_remove_filters_local_list() {
        let mut api = seeded_api();
        api.expect_delete()
            .with(eq(1))
            .returning(|id| Ok(Some(user(id, "John Doe"))));

        let mut store = loaded_store(api).await;
        store.remove(1).await.unwrap();

        assert!(store.find(1).is_none());
        assert_eq!(store.users().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_mutations_leave_list_untouched() {
        let mut api = seeded_api();
        api.expect_create().returning(|_| Err(server_error()));
        api.expect_update().returning(|_, _| Err(server_error()));
        api.expect_delete().returning(|_| Err(server_error()));

        let mut store = loaded_store(api).await;
        let before = store.users().to_vec();

        let err = store
            .add(UserPatch {
                name: Some("New User".into()),
                email: Some("n@e.com".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Create(_)));
        assert_eq!(store.users(), before.as_slice());

        let err = store.edit(1, UserPatch::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::Update(_)));
        assert_eq!(store.users(), before.as_slice());

        let err = store.remove(1).await.unwrap_err();
        assert!(matches!(err, StoreError::Delete(_)));
        assert_eq!(store.users(), before.as_slice());
    }

    #[tokio::test]
    async fn test_edit_unknown_user_is_not_found() {
        let mut api = seeded_api();
        api.expect_update().returning(|_, _| {
            Err(ClientError::NotFound {
                body: "{\"error\":\"User not found\"}".into(),
            })
        });

        let mut store = loaded_store(api).await;
        let before = store.users().to_vec();

        let err = store
            .edit(
                999,
                UserPatch {
                    name: Some("Ghost".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store.users(), before.as_slice());
    }
}
