//! Database module
//!
//! Database connection and schema utilities.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;

/// Schema for the `todos` table, kept in migrations/ as raw SQL
const CREATE_TODOS: &str = include_str!("../migrations/0001_create_todos.sql");

/// Create the connection pool described by `config`
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
}

/// Verify database connectivity
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await?;

    Ok(())
}

/// Check if the `todos` table exists
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = current_schema() AND table_name = 'todos'
        )
        "#
    )
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Create the `todos` table if it is missing
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    if check_schema(pool).await? {
        tracing::debug!("Table 'todos' already exists");
        return Ok(());
    }

    sqlx::query(CREATE_TODOS).execute(pool).await?;
    tracing::info!("Created table 'todos'");

    Ok(())
}
