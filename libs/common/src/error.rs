//! Infrastructure error types shared across the identity platform

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The connection pool could not be established
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// A query or statement failed to execute
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Schema migrations failed to apply
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Invalid database configuration
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
