//! todo_backend Library
//!
//! Re-exports modules for integration testing and the server binary.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod repository;

mod error;

pub use config::{Config, StorageBackend};
pub use domain::{Order, State, Title, Todo, TodoId, TodoPatch, ValidationError};
pub use error::{AppError, AppResult};
pub use repository::{RepositoryError, StorageError, TodoRepository, TodoStore};
