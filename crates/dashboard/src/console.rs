//! User console: store, table state and CRUD flows wired together.

use std::sync::Arc;

use tracing::debug;

use domain::{User, UserId, UserPatch};

use crate::api::UserApi;
use crate::orchestrator::UserManagement;
use crate::store::{StoreResult, UserStore};
use crate::table::{TableState, TableView};

/// UserConsole is the user list page without the rendering.
///
/// Row selection is pruned against the list after every load or mutation.
pub struct UserConsole {
    management: UserManagement,
    table: TableState,
}

impl UserConsole {
    pub fn new(api: Arc<dyn UserApi>, page_size: usize) -> Self {
        Self {
            management: UserManagement::new(UserStore::new(api)),
            table: TableState::new(page_size),
        }
    }

    pub fn users(&self) -> &[User] {
        self.management.users()
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableState {
        &mut self.table
    }

    pub fn management(&self) -> &UserManagement {
        &self.management
    }

    pub fn management_mut(&mut self) -> &mut UserManagement {
        &mut self.management
    }

    /// Visible window of the current list.
    pub fn view(&self) -> TableView<'_> {
        self.table.view(self.management.users())
    }

    pub fn next_page(&mut self) {
        self.table.next_page(self.management.users());
    }

    pub fn previous_page(&mut self) {
        self.table.previous_page(self.management.users());
    }

    /// Load the list once per session.
    pub async fn load(&mut self) -> StoreResult<()> {
        let result = self.management.store_mut().fetch().await.map(|_| ());
        self.prune_selection();
        result
    }

    /// Reload the list from the remote store.
    pub async fn reload(&mut self) -> StoreResult<()> {
        let result = self.management.store_mut().refetch().await.map(|_| ());
        self.prune_selection();
        result
    }

    /// Local lookup, falling back to the remote store.
    pub async fn user(&self, id: UserId) -> StoreResult<User> {
        match self.management.store().find(id) {
            Some(user) => Ok(user.clone()),
            None => self.management.store().get(id).await,
        }
    }

    pub async fn confirm_delete(&mut self) -> StoreResult<Option<User>> {
        let result = self.management.confirm_delete().await;
        self.prune_selection();
        result
    }

    pub async fn submit_drawer(&mut self, data: UserPatch) -> StoreResult<Option<User>> {
        let result = self.management.submit_drawer(data).await;
        self.prune_selection();
        result
    }

    /// Selected users still present in the list.
    pub fn selected_users(&self) -> Vec<&User> {
        self.users()
            .iter()
            .filter(|u| self.table.selection().is_selected(u.id))
            .collect()
    }

    fn prune_selection(&mut self) {
        let removed = self
            .table
            .selection_mut()
            .retain_existing(self.management.users());
        if removed > 0 {
            debug!("Dropped {} selections for removed users", removed);
        }
    }
}
