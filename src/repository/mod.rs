//! Repository module
//!
//! Storage-agnostic contract for persisting todos, plus its backends.

mod error;
mod memory;
mod postgres;
mod store;

use async_trait::async_trait;

use crate::domain::{Todo, TodoId, ValidationError};

pub use error::{RepositoryError, StorageError};
pub use memory::InMemoryTodoRepository;
pub use postgres::PgTodoRepository;
pub use store::TodoStore;

/// Repository interface for todo CRUD operations.
///
/// Absence is ordinary data: lookups and updates return `Option`, and
/// deleting a missing id succeeds.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Persist a draft and return it with its new identifier.
    ///
    /// Identifiers are monotonic per backend and never reused. Todos that
    /// already have an id are rejected with a validation error.
    async fn create(&self, todo: Todo) -> Result<Todo, RepositoryError>;

    /// Get a todo by ID
    async fn find(&self, id: TodoId) -> Result<Option<Todo>, RepositoryError>;

    /// All todos in insertion order
    async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError>;

    /// Replace the stored todo with the same id, if there is one.
    ///
    /// This is not an upsert: `None` means nothing was written.
    async fn update(&self, todo: Todo) -> Result<Option<Todo>, RepositoryError>;

    /// Delete a todo by ID; a missing id is a no-op
    async fn delete(&self, id: TodoId) -> Result<(), RepositoryError>;

    /// Delete every todo
    async fn delete_all(&self) -> Result<(), RepositoryError>;

    /// Read, patch and write back the todo with `id`.
    ///
    /// Returns `None` without writing anything when `id` does not exist.
    /// There is no compare-and-swap between the read and the write, so a
    /// concurrent writer to the same id can be overwritten (last write wins).
    async fn modify<F>(&self, id: TodoId, patch: F) -> Result<Option<Todo>, RepositoryError>
    where
        F: FnOnce(Todo) -> Result<Todo, ValidationError> + Send,
    {
        let Some(current) = self.find(id).await? else {
            return Ok(None);
        };

        let candidate = patch(current)?;
        if candidate.id() != Some(id) {
            return Err(ValidationError::field("id", "a patch cannot change the id").into());
        }

        self.update(candidate).await
    }
}

/// Shared precondition of `create`
pub(crate) fn require_draft(todo: &Todo) -> Result<(), ValidationError> {
    if todo.is_draft() {
        Ok(())
    } else {
        Err(ValidationError::field("id", "only drafts can be created"))
    }
}

/// Shared precondition of `update`
pub(crate) fn require_id(todo: &Todo) -> Result<TodoId, ValidationError> {
    todo.id()
        .ok_or_else(|| ValidationError::field("id", "only persisted todos can be updated"))
}
