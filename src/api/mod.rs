//! API module
//!
//! HTTP API endpoints and middleware.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::repository::TodoStore;

pub mod middleware;
pub mod routes;

pub use routes::create_router;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: TodoStore,
    /// Public url of the todo collection, without trailing slash
    pub base_url: Arc<str>,
}

impl AppState {
    pub fn new(store: TodoStore, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            store,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    /// Url of a single persisted todo
    pub fn todo_url(&self, id: crate::domain::TodoId) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the application router: `/health` plus the todo collection
/// nested under `/todos`
pub fn build_router(state: AppState) -> Router {
    // Layers run in reverse order of addition: correlation id -> logging -> handler
    let todo_routes = create_router()
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(axum::middleware::from_fn(middleware::correlation_id_middleware));

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .nest("/todos", todo_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
