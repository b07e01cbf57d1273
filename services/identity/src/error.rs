//! Error types for identity operations
//!
//! All failures are recovered at the repository boundary and surfaced as
//! explicit values; callers can distinguish permanent rejections
//! (duplicates, validation) from retryable infrastructure failures.

use common::error::DatabaseError;
use thiserror::Error;

/// Error type for account and credential operations
#[derive(Error, Debug)]
pub enum IdentityError {
    /// Another account already holds the requested username
    #[error("Username already exists")]
    DuplicateUsername,

    /// Another account already holds the requested email
    #[error("Email already exists")]
    DuplicateEmail,

    /// Supplied username or email is empty or malformed
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Password could not be hashed
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),

    /// The persistence backend cannot be reached or rejected the operation
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] DatabaseError),
}

/// Type alias for Result with IdentityError
pub type IdentityResult<T> = Result<T, IdentityError>;

impl IdentityError {
    /// True for failures that a caller may retry once the backend recovers
    pub fn is_retryable(&self) -> bool {
        matches!(self, IdentityError::StoreUnavailable(_))
    }
}
