//! Repository Module
//!
//! CRUD operations over the SQLite tables, one module per entity. Functions
//! take a `&SqlitePool` and return [`RepoResult`].

pub mod company;
pub mod department;
pub mod stat;
pub mod stat_title;
pub mod user;

#[cfg(test)]
mod tests;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    /// A referenced parent row is gone
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    /// Domain failure carrying its own error code
    #[error("{1}")]
    Business(ErrorCode, String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::Duplicate(db_err.message().to_string())
            }
            // parent deleted between the existence check and the write
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                RepoError::NotFound(db_err.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Business(code, msg) => AppError::with_message(code, msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Map a UNIQUE violation on `column` to a business error.
///
/// SQLite reports `UNIQUE constraint failed: <table>.<column>`.
pub(crate) fn unique_violation(err: sqlx::Error, column: &str, code: ErrorCode) -> RepoError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
        && db_err.message().contains(column)
    {
        return RepoError::Business(code, code.message().to_string());
    }
    err.into()
}
