//! Repository Module
//!
//! CRUD operations as free async functions over `&SqlitePool`, one module
//! per table. Repositories only touch their own table plus the cached
//! balance column; cross-entity orchestration lives in the service layer.

pub mod admin_notification;
pub mod announcement;
pub mod customer;
pub mod inquiry;
pub mod notification;
pub mod point_history;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound("Row not found".to_string()),
            other => RepoError::Database(other.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
