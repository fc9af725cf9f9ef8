//! CRUD flow orchestration: delete dialog, add/edit drawer and showcase.
//!
//! Each surface opens and closes independently. Mutations go through the
//! [`UserStore`] and are followed by a refetch so the list matches the
//! remote store. A failed mutation leaves its surface open.

use tracing::{info, warn};

use domain::{User, UserPatch};

use crate::store::{StoreResult, UserStore};

/// Delete confirmation dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteDialog {
    #[default]
    Closed,
    /// Snapshot of the user being deleted
    Confirming(User),
}

/// Add/edit drawer mode, derived from whether a target user is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerMode {
    Add,
    Edit,
}

/// Add/edit drawer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Drawer {
    #[default]
    Closed,
    Open { target: Option<User> },
}

impl Drawer {
    pub fn is_open(&self) -> bool {
        matches!(self, Drawer::Open { .. })
    }

    pub fn mode(&self) -> Option<DrawerMode> {
        match self {
            Drawer::Closed => None,
            Drawer::Open { target: Some(_) } => Some(DrawerMode::Edit),
            Drawer::Open { target: None } => Some(DrawerMode::Add),
        }
    }

    pub fn target(&self) -> Option<&User> {
        match self {
            Drawer::Open { target } => target.as_ref(),
            Drawer::Closed => None,
        }
    }

    /// Initial form values: the target's fields in edit mode, blank otherwise.
    pub fn form_values(&self) -> UserPatch {
        self.target().map(UserPatch::from).unwrap_or_default()
    }
}

/// Read-only user detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Showcase {
    #[default]
    Closed,
    Open(User),
}

/// UserManagement drives the CRUD surfaces over one [`UserStore`].
pub struct UserManagement {
    store: UserStore,
    delete_dialog: DeleteDialog,
    drawer: Drawer,
    showcase: Showcase,
}

impl UserManagement {
    pub fn new(store: UserStore) -> Self {
        Self {
            store,
            delete_dialog: DeleteDialog::Closed,
            drawer: Drawer::Closed,
            showcase: Showcase::Closed,
        }
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut UserStore {
        &mut self.store
    }

    pub fn users(&self) -> &[User] {
        self.store.users()
    }

    // =========================================================================
    // Delete Flow
    // =========================================================================

    pub fn delete_dialog(&self) -> &DeleteDialog {
        &self.delete_dialog
    }

    pub fn open_delete(&mut self, user: &User) {
        self.delete_dialog = DeleteDialog::Confirming(user.clone());
    }

    /// Close the dialog without deleting anything.
    pub fn cancel_delete(&mut self) {
        self.delete_dialog = DeleteDialog::Closed;
    }

    /// Delete the confirmed user.
    ///
    /// Returns the deleted snapshot, or `None` if no deletion was pending.
    /// On failure the dialog stays open.
    pub async fn confirm_delete(&mut self) -> StoreResult<Option<User>> {
        let target = match &self.delete_dialog {
            DeleteDialog::Confirming(user) => user.clone(),
            DeleteDialog::Closed => return Ok(None),
        };

        self.store.remove(target.id).await?;
        info!(user_id = target.id, "User deleted");

        self.delete_dialog = DeleteDialog::Closed;
        self.sync().await;
        Ok(Some(target))
    }

    // =========================================================================
    // Add/Edit Flow
    // =========================================================================

    pub fn drawer(&self) -> &Drawer {
        &self.drawer
    }

    pub fn open_add(&mut self) {
        self.drawer = Drawer::Open { target: None };
    }

    pub fn open_edit(&mut self, user: &User) {
        self.drawer = Drawer::Open {
            target: Some(user.clone()),
        };
    }

    pub fn close_drawer(&mut self) {
        self.drawer = Drawer::Closed;
    }

    /// Submit the drawer form: edit when a target exists, add otherwise.
    ///
    /// Returns the saved user, or `None` if the drawer was closed. On failure
    /// the drawer stays open with its target.
    pub async fn submit_drawer(&mut self, data: UserPatch) -> StoreResult<Option<User>> {
        let saved = match &self.drawer {
            Drawer::Closed => return Ok(None),
            Drawer::Open { target: Some(user) } => {
                let id = user.id;
                self.store.edit(id, data).await?
            }
            Drawer::Open { target: None } => self.store.add(data).await?,
        };
        info!(user_id = saved.id, "User saved");

        self.drawer = Drawer::Closed;
        self.sync().await;
        Ok(Some(saved))
    }

    // =========================================================================
    // Showcase Flow
    // =========================================================================

    pub fn showcase(&self) -> &Showcase {
        &self.showcase
    }

    pub fn open_showcase(&mut self, user: &User) {
        self.showcase = Showcase::Open(user.clone());
    }

    pub fn close_showcase(&mut self) {
        self.showcase = Showcase::Closed;
    }

    /// Re-read the list after a successful mutation. The mutation already
    /// updated the local list, so a failed refetch only logs.
    async fn sync(&mut self) {
        if let Err(e) = self.store.refetch().await {
            warn!("Refetch after mutation failed, keeping local list: {}", e);
        }
    }
}
