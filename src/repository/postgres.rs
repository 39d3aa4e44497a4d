//! Postgres Todo Repository
//!
//! Backend over the `todos` table. Identifiers come from the table's identity
//! column, so they are monotonic and never reused.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Todo, TodoId};

use super::{require_draft, require_id, RepositoryError, StorageError, TodoRepository};

/// Raw `todos` row
type TodoRow = (i64, String, Option<i32>, bool);

/// Repository for todos stored in Postgres
#[derive(Debug, Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    /// Create a new PgTodoRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Turn a row back into a todo, treating invariant violations as corruption
fn to_domain((id, title, position, completed): TodoRow) -> Result<Todo, StorageError> {
    Todo::create(id, title, position, completed)
        .map_err(|source| StorageError::CorruptRow { id, source })
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, RepositoryError> {
        require_draft(&todo)?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO todos (title, position)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(todo.title().as_str())
        .bind(todo.order().map(|o| o.value()))
        .fetch_one(&self.pool)
        .await?;

        let id = TodoId::new(id).map_err(|source| StorageError::CorruptRow { id, source })?;

        tracing::debug!(id = %id, "Todo inserted");
        Ok(todo.with_id(id))
    }

    async fn find(&self, id: TodoId) -> Result<Option<Todo>, RepositoryError> {
        let row: Option<TodoRow> = sqlx::query_as(
            r#"
            SELECT id, title, position, completed
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(to_domain).transpose()?)
    }

    async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError> {
        let rows: Vec<TodoRow> = sqlx::query_as(
            r#"
            SELECT id, title, position, completed
            FROM todos
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let todos = rows
            .into_iter()
            .map(to_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(todos)
    }

    async fn update(&self, todo: Todo) -> Result<Option<Todo>, RepositoryError> {
        let id = require_id(&todo)?;

        let row: Option<TodoRow> = sqlx::query_as(
            r#"
            UPDATE todos
            SET title = $1, position = $2, completed = $3
            WHERE id = $4
            RETURNING id, title, position, completed
            "#,
        )
        .bind(todo.title().as_str())
        .bind(todo.order().map(|o| o.value()))
        .bind(todo.is_completed())
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        if row.is_some() {
            tracing::debug!(id = %id, "Todo updated");
        }

        Ok(row.map(to_domain).transpose()?)
    }

    async fn delete(&self, id: TodoId) -> Result<(), RepositoryError> {
        let rows = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::debug!(id = %id, rows_deleted = rows, "Todo delete");
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), RepositoryError> {
        let rows = sqlx::query("DELETE FROM todos")
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(rows_deleted = rows, "All todos deleted");
        Ok(())
    }
}
