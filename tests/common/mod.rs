//! Common test utilities

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::util::ServiceExt;

use todo_backend::api::{self, AppState};
use todo_backend::{db, Todo, TodoId, TodoPatch, TodoRepository, TodoStore};

pub const BASE_URL: &str = "http://localhost:3000/todos";

/// Router over a fresh in-memory store
pub fn memory_app() -> Router {
    api::build_router(AppState::new(TodoStore::in_memory(), BASE_URL))
}

/// Setup test database - create the table and empty it
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    db::ensure_schema(&pool).await.expect("Failed to create schema");

    sqlx::query("TRUNCATE TABLE todos RESTART IDENTITY")
        .execute(&pool)
        .await
        .expect("Failed to clean up DB");

    pool
}

/// Send a request and return status plus parsed JSON body (`Value::Null` when empty)
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

fn id(value: i64) -> TodoId {
    TodoId::new(value).unwrap()
}

/// Behaviour every `TodoRepository` backend must share.
///
/// Runs sequentially against one repository starting from an empty store.
pub async fn repository_contract<R: TodoRepository>(repo: &R) {
    repo.delete_all().await.unwrap();
    assert!(repo.find_all().await.unwrap().is_empty());

    // create -> find round trip
    let x = repo.create(Todo::draft("x").unwrap()).await.unwrap();
    let x_id = x.id().expect("created todo has an id");
    assert!(!x.is_completed());
    assert!(x.order().is_none());
    assert_eq!(repo.find(x_id).await.unwrap(), Some(x.clone()));
    assert_eq!(repo.find_all().await.unwrap(), vec![x.clone()]);

    // delete, then delete again
    repo.delete(x_id).await.unwrap();
    repo.delete(x_id).await.unwrap();
    assert!(repo.find_all().await.unwrap().is_empty());
    assert_eq!(repo.find(x_id).await.unwrap(), None);

    // insertion order with increasing ids
    let a = repo.create(Todo::draft_with_order("a", 5).unwrap()).await.unwrap();
    let b = repo.create(Todo::draft_with_order("b", 1).unwrap()).await.unwrap();
    assert!(a.id() > Some(x_id));
    assert!(a.id() < b.id());
    assert_eq!(repo.find_all().await.unwrap(), vec![a.clone(), b.clone()]);

    // non-drafts are rejected
    let err = repo.create(a.clone()).await.unwrap_err();
    assert!(err.is_validation());

    // update is not an upsert
    let ghost = Todo::create(x_id.value(), "ghost", None, true).unwrap();
    assert_eq!(repo.update(ghost).await.unwrap(), None);
    assert_eq!(repo.find(x_id).await.unwrap(), None);

    // update replaces the whole value
    let a_id = a.id().unwrap();
    let replaced = Todo::create(a_id.value(), "a2", None, true).unwrap();
    assert_eq!(repo.update(replaced.clone()).await.unwrap(), Some(replaced.clone()));
    assert_eq!(repo.find(a_id).await.unwrap(), Some(replaced.clone()));

    // modify on a missing id writes nothing
    let before = repo.find_all().await.unwrap();
    let missing = repo
        .modify(id(i64::MAX), TodoPatch::from_fields(None, None, Some(true)).unwrap().into_update())
        .await
        .unwrap();
    assert_eq!(missing, None);
    assert_eq!(repo.find_all().await.unwrap(), before);

    // identity patch
    let b_id = b.id().unwrap();
    assert_eq!(repo.modify(b_id, Ok).await.unwrap(), Some(b.clone()));

    // partial patch leaves other fields alone
    let patch = TodoPatch::from_fields(None, Some(9), None).unwrap();
    let patched = repo.modify(b_id, patch.into_update()).await.unwrap().unwrap();
    assert_eq!(patched.title().as_str(), "b");
    assert_eq!(patched.order().map(|o| o.value()), Some(9));
    assert!(!patched.is_completed());
    assert_eq!(repo.find(b_id).await.unwrap(), Some(patched));

    // delete_all, twice
    repo.delete_all().await.unwrap();
    repo.delete_all().await.unwrap();
    assert!(repo.find_all().await.unwrap().is_empty());
}
