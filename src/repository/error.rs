//! Repository Errors
//!
//! Error types for repository operations.

use crate::domain::ValidationError;

/// Failures of the backing store
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row no longer satisfies the todo invariants
    #[error("Stored todo {id} is invalid: {source}")]
    CorruptRow {
        id: i64,
        #[source]
        source: ValidationError,
    },
}

/// Errors returned by `TodoRepository` operations.
///
/// "Not found" is not an error: lookups return `Option`.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The todo handed to the repository is not acceptable for the operation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        RepositoryError::Storage(StorageError::Database(err))
    }
}

impl RepositoryError {
    /// Check if this is a client error (caller's fault)
    pub fn is_validation(&self) -> bool {
        matches!(self, RepositoryError::Validation(_))
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, RepositoryError::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_classification() {
        let validation = RepositoryError::from(ValidationError::field("id", "draft cannot have an id"));
        assert!(validation.is_validation());
        assert!(!validation.is_storage());

        let storage = RepositoryError::from(sqlx::Error::PoolClosed);
        assert!(storage.is_storage());
        assert!(!storage.is_validation());
    }

    #[test]
    fn test_corrupt_row_display() {
        let err = StorageError::CorruptRow {
            id: 7,
            source: ValidationError::field("title", "title cannot be empty"),
        };
        let message = err.to_string();
        assert!(message.contains("Stored todo 7"));
        assert!(message.contains("title cannot be empty"));
    }
}
