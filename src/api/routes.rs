//! API Routes
//!
//! HTTP endpoint definitions for the todo collection.

use axum::{
    extract::{FromRequest, FromRequestParts, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::{Order, Title, Todo, TodoId, TodoPatch, ValidationError};
use crate::error::{AppError, AppResult};
use crate::repository::TodoRepository;

use super::AppState;

// =========================================================================
// Extractors
// =========================================================================

/// `Json` whose rejections render as `AppError`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Path` whose rejections render as `AppError`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
}

/// Full replacement of a todo (PUT)
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Partial update of a todo (PATCH); absent fields stay untouched
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PatchTodoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub order: Option<i32>,
    pub completed: bool,
    pub url: String,
}

impl TodoResponse {
    /// Wire shape of a persisted todo
    fn from_domain(todo: &Todo, state: &AppState) -> AppResult<Self> {
        let id = todo
            .id()
            .ok_or_else(|| AppError::Internal("repository returned a draft".to_string()))?;

        Ok(Self {
            id: id.value(),
            title: todo.title().to_string(),
            order: todo.order().map(|o| o.value()),
            completed: todo.is_completed(),
            url: state.todo_url(id),
        })
    }

    fn from_optional(todo: Option<Todo>, state: &AppState) -> AppResult<Option<Self>> {
        todo.map(|todo| Self::from_domain(&todo, state)).transpose()
    }
}

/// Violation for a required body field that is absent or `null`
fn missing(field: &'static str) -> ValidationError {
    ValidationError::field(field, format!("{field} is required"))
}

/// Title check that treats an absent title like an invalid one
fn title_error(title: Option<String>) -> Option<ValidationError> {
    match title {
        Some(title) => Title::new(title).err(),
        None => Some(missing("title")),
    }
}

fn order_error(order: Option<i32>) -> Option<ValidationError> {
    order.map(Order::new).and_then(Result::err)
}

// =========================================================================
// API Router
// =========================================================================

/// Create the todo router, to be nested under the collection path
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(create).delete(delete_all))
        .route(
            "/:id",
            get(find).put(update).patch(modify).delete(delete),
        )
}

// =========================================================================
// GET /todos
// =========================================================================

/// List every todo in insertion order
async fn find_all(State(state): State<AppState>) -> AppResult<Json<Vec<TodoResponse>>> {
    let todos = state.store.find_all().await?;

    let body = todos
        .iter()
        .map(|todo| TodoResponse::from_domain(todo, &state))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(body))
}

// =========================================================================
// POST /todos
// =========================================================================

/// Create a todo from a title and optional order
async fn create(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateTodoRequest>,
) -> AppResult<(StatusCode, Json<TodoResponse>)> {
    let draft = match (request.title, request.order) {
        (Some(title), Some(order)) => Todo::draft_with_order(title, order)?,
        (Some(title), None) => Todo::draft(title)?,
        (None, order) => {
            return Err(ValidationError::collect([Some(missing("title")), order_error(order)]).into())
        }
    };

    let todo = state.store.create(draft).await?;
    tracing::info!(id = ?todo.id(), "Todo created");

    Ok((StatusCode::CREATED, Json(TodoResponse::from_domain(&todo, &state)?)))
}

// =========================================================================
// DELETE /todos
// =========================================================================

async fn delete_all(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.store.delete_all().await?;
    Ok(StatusCode::OK)
}

// =========================================================================
// GET /todos/:id
// =========================================================================

/// Get a todo by id; a missing todo is a `null` body
async fn find(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Option<TodoResponse>>> {
    let id = TodoId::new(id)?;
    let todo = state.store.find(id).await?;

    Ok(Json(TodoResponse::from_optional(todo, &state)?))
}

// =========================================================================
// PUT /todos/:id
// =========================================================================

/// Replace a todo entirely
async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(request): AppJson<UpdateTodoRequest>,
) -> AppResult<Json<Option<TodoResponse>>> {
    if request.id.is_some_and(|body_id| body_id != id) {
        return Err(ValidationError::field("id", "body id does not match path id").into());
    }

    let todo = match (request.title, request.completed) {
        (Some(title), Some(completed)) => Todo::create(id, title, request.order, completed)?,
        (title, completed) => {
            return Err(ValidationError::collect([
                TodoId::new(id).err(),
                title_error(title),
                order_error(request.order),
                completed.is_none().then(|| missing("completed")),
            ])
            .into())
        }
    };
    let updated = state.store.update(todo).await?;

    if updated.is_none() {
        tracing::debug!(id, "Update of missing todo ignored");
    }

    Ok(Json(TodoResponse::from_optional(updated, &state)?))
}

// =========================================================================
// PATCH /todos/:id
// =========================================================================

/// Change only the fields present in the body
async fn modify(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(request): AppJson<PatchTodoRequest>,
) -> AppResult<Json<Option<TodoResponse>>> {
    let patch = TodoPatch::from_fields(request.title, request.order, request.completed);
    if patch.as_ref().is_ok_and(TodoPatch::is_empty) {
        tracing::debug!(id, "Empty patch, todo left unchanged");
    }

    let (id, patch) = match (TodoId::new(id), patch) {
        (Ok(id), Ok(patch)) => (id, patch),
        (id, patch) => return Err(ValidationError::collect([id.err(), patch.err()]).into()),
    };

    let modified = state.store.modify(id, patch.into_update()).await?;

    Ok(Json(TodoResponse::from_optional(modified, &state)?))
}

// =========================================================================
// DELETE /todos/:id
// =========================================================================

async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    let id = TodoId::new(id)?;
    state.store.delete(id).await?;

    Ok(StatusCode::OK)
}
