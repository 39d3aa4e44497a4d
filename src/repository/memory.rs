//! In-memory Todo Repository
//!
//! Process-local backend, used for development and tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{Todo, TodoId};

use super::{require_draft, require_id, RepositoryError, TodoRepository};

/// Todos kept in a map keyed by id.
///
/// Ids come from a monotonic counter, so iterating the map in key order is
/// iterating in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    counter: Arc<AtomicI64>,
    storage: Arc<RwLock<BTreeMap<TodoId, Todo>>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> Result<TodoId, RepositoryError> {
        let next = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(TodoId::new(next)?)
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, RepositoryError> {
        require_draft(&todo)?;

        let id = self.next_id()?;
        let created = todo.with_id(id);
        self.storage.write().await.insert(id, created.clone());

        tracing::debug!(id = %id, "Todo created in memory");
        Ok(created)
    }

    async fn find(&self, id: TodoId) -> Result<Option<Todo>, RepositoryError> {
        Ok(self.storage.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError> {
        Ok(self.storage.read().await.values().cloned().collect())
    }

    async fn update(&self, todo: Todo) -> Result<Option<Todo>, RepositoryError> {
        let id = require_id(&todo)?;

        let mut storage = self.storage.write().await;
        match storage.get_mut(&id) {
            Some(existing) => {
                *existing = todo.clone();
                tracing::debug!(id = %id, "Todo updated in memory");
                Ok(Some(todo))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: TodoId) -> Result<(), RepositoryError> {
        if self.storage.write().await.remove(&id).is_some() {
            tracing::debug!(id = %id, "Todo deleted from memory");
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), RepositoryError> {
        self.storage.write().await.clear();
        Ok(())
    }
}
