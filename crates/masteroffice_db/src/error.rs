//! Error types for the database client

use masteroffice_common::StoreError;
use thiserror::Error;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),
}

// Every database failure that reaches the directory is an outage from its
// point of view; missing rows and conflicts are detected by the repository.
impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        StoreError::unavailable(err)
    }
}
