use thiserror::Error;

use crate::db::repository::RepoError;

/// Startup and runtime failures of the server process
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Seeding failed: {0}")]
    Seed(#[from] RepoError),
}

/// Result alias for server bootstrap
pub type Result<T> = std::result::Result<T, ServerError>;
