//! End-to-end tests: the console against a real user service.
//!
//! Each test serves the user API on an ephemeral port over an in-memory
//! store and drives it through `HttpUserApi`.

use std::sync::Arc;

use tokio::net::TcpListener;

use dashboard_lib::table::{Column, FilterColumn, SortDirection};
use dashboard_lib::{DeleteDialog, HttpUserApi, StoreError, UserApi, UserConsole};
use domain::{NewUser, UserPatch};
use user_service_lib::{
    build_state, serve,
    storage::{MemoryStore, SeedLoader, UserStorage},
};

async fn start_service() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let storage = UserStorage::new(Arc::new(MemoryStore::new()), SeedLoader::builtin());
    tokio::spawn(serve(listener, build_state(storage)));

    format!("http://{}/api", addr)
}

async fn loaded_console(api_url: &str) -> UserConsole {
    let api = Arc::new(HttpUserApi::new(api_url).unwrap());
    let mut console = UserConsole::new(api, 10);
    console.load().await.unwrap();
    console
}

#[tokio::test]
async fn test_search_finds_jane() {
    let url = start_service().await;
    let mut console = loaded_console(&url).await;

    console.table_mut().set_global_filter("jane");

    let view = console.view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].name, "Jane Smith");
}

#[tokio::test]
async fn test_crud_round_trip() {
    let url = start_service().await;
    let api = HttpUserApi::new(&url).unwrap();

    let created = api.create(NewUser::new("New User", "n@e.com")).await.unwrap();
    assert_eq!(created.id, 3);
    assert_eq!(created.role, "viewer");
    assert_eq!(created.status, "active");
    assert_eq!(created.team, "General");
    assert!(!created.avatar.is_empty());

    let listed = api.list().await.unwrap();
    assert!(listed.iter().any(|u| u.id == 3 && u.email == "n@e.com"));

    let updated = api
        .update(
            3,
            UserPatch {
                role: Some("editor".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let fetched = api.get(3).await.unwrap();
    assert_eq!(fetched, updated);
    assert_eq!(fetched.role, "editor");
    assert_eq!(fetched.name, created.name);
    assert_eq!(fetched.created_at, created.created_at);

    let deleted = api.delete(3).await.unwrap();
    assert_eq!(deleted.map(|u| u.id), Some(3));
    assert!(api.get(3).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_drawer_add_then_edit() {
    let url = start_service().await;
    let mut console = loaded_console(&url).await;

    console.management_mut().open_add();
    let created = console
        .submit_drawer(UserPatch {
            name: Some("Carla Rossi".into()),
            email: Some("carla@example.com".into()),
            team: Some("finance".into()),
            ..Default::default()
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(console.users().len(), 3);

    console.management_mut().open_edit(&created);
    console
        .submit_drawer(UserPatch {
            status: Some("inactive".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    console
        .table_mut()
        .set_column_filter(FilterColumn::Status, "inactive");
    let view = console.view();
    assert_eq!(view.row_ids(), vec![created.id]);
    assert!(!console.management().drawer().is_open());
}

#[tokio::test]
async fn test_cancelled_delete_keeps_user() {
    let url = start_service().await;
    let mut console = loaded_console(&url).await;

    let john = console.users()[0].clone();
    console.management_mut().open_delete(&john);
    console.management_mut().cancel_delete();

    assert_eq!(console.management().delete_dialog(), &DeleteDialog::Closed);

    console.reload().await.unwrap();
    assert!(console.users().iter().any(|u| u.id == john.id));
}

#[tokio::test]
async fn test_confirmed_delete_removes_user_and_selection() {
    let url = start_service().await;
    let mut console = loaded_console(&url).await;

    console.table_mut().toggle_row(1);
    let john = console.users()[0].clone();
    console.management_mut().open_delete(&john);
    console.confirm_delete().await.unwrap();

    assert!(console.users().iter().all(|u| u.id != 1));
    assert!(console.table().selection().is_empty());
}

#[tokio::test]
async fn test_update_missing_user_leaves_list_unchanged() {
    let url = start_service().await;
    let mut console = loaded_console(&url).await;
    let before = console.users().to_vec();

    let err = console
        .management_mut()
        .store_mut()
        .edit(
            999,
            UserPatch {
                name: Some("Ghost".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Update(_)));
    assert!(err.is_not_found());
    assert_eq!(console.users(), before.as_slice());
}

#[tokio::test]
async fn test_sort_by_name_desc() {
    let url = start_service().await;
    let mut console = loaded_console(&url).await;

    console.table_mut().set_sort(Column::Name, SortDirection::Desc);

    let names: Vec<_> = console.view().rows.iter().map(|u| u.name.clone()).collect();
    assert_eq!(names, vec!["John Doe", "Jane Smith"]);
}
