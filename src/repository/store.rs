//! Backend selection
//!
//! `TodoStore` is the repository the HTTP layer talks to. The concrete
//! backend is chosen once at startup from configuration.

use async_trait::async_trait;

use crate::domain::{Todo, TodoId};

use super::{InMemoryTodoRepository, PgTodoRepository, RepositoryError, TodoRepository};

#[derive(Debug, Clone)]
pub enum TodoStore {
    InMemory(InMemoryTodoRepository),
    Postgres(PgTodoRepository),
}

impl TodoStore {
    pub fn in_memory() -> Self {
        TodoStore::InMemory(InMemoryTodoRepository::new())
    }

    pub fn postgres(pool: sqlx::PgPool) -> Self {
        TodoStore::Postgres(PgTodoRepository::new(pool))
    }

    /// Backend name, for logging
    pub fn backend(&self) -> &'static str {
        match self {
            TodoStore::InMemory(_) => "memory",
            TodoStore::Postgres(_) => "postgres",
        }
    }
}

impl From<InMemoryTodoRepository> for TodoStore {
    fn from(repository: InMemoryTodoRepository) -> Self {
        TodoStore::InMemory(repository)
    }
}

impl From<PgTodoRepository> for TodoStore {
    fn from(repository: PgTodoRepository) -> Self {
        TodoStore::Postgres(repository)
    }
}

#[async_trait]
impl TodoRepository for TodoStore {
    async fn create(&self, todo: Todo) -> Result<Todo, RepositoryError> {
        match self {
            TodoStore::InMemory(repo) => repo.create(todo).await,
            TodoStore::Postgres(repo) => repo.create(todo).await,
        }
    }

    async fn find(&self, id: TodoId) -> Result<Option<Todo>, RepositoryError> {
        match self {
            TodoStore::InMemory(repo) => repo.find(id).await,
            TodoStore::Postgres(repo) => repo.find(id).await,
        }
    }

    async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError> {
        match self {
            TodoStore::InMemory(repo) => repo.find_all().await,
            TodoStore::Postgres(repo) => repo.find_all().await,
        }
    }

    async fn update(&self, todo: Todo) -> Result<Option<Todo>, RepositoryError> {
        match self {
            TodoStore::InMemory(repo) => repo.update(todo).await,
            TodoStore::Postgres(repo) => repo.update(todo).await,
        }
    }

    async fn delete(&self, id: TodoId) -> Result<(), RepositoryError> {
        match self {
            TodoStore::InMemory(repo) => repo.delete(id).await,
            TodoStore::Postgres(repo) => repo.delete(id).await,
        }
    }

    async fn delete_all(&self) -> Result<(), RepositoryError> {
        match self {
            TodoStore::InMemory(repo) => repo.delete_all().await,
            TodoStore::Postgres(repo) => repo.delete_all().await,
        }
    }
}
