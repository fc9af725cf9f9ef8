//! User Dashboard Library
//!
//! Client core of the user management dashboard: the HTTP adapter, the
//! session's user store, the table engine and the CRUD flows.

pub mod api;
pub mod config;
pub mod console;
pub mod orchestrator;
pub mod render;
pub mod store;
pub mod table;

pub use api::{ClientError, HttpUserApi, UserApi};
pub use config::DashboardConfig;
pub use console::UserConsole;
pub use orchestrator::{DeleteDialog, Drawer, DrawerMode, Showcase, UserManagement};
pub use store::{StoreError, UserStore};
pub use table::{TableState, TableView};
