//! Custom error types for the portal service

use thiserror::Error;

/// Errors surfaced by the credential store
///
/// The duplicate variants carry which field collided so signup can report
/// it; hashing and database failures must never be presented to the user
/// as "Invalid credentials".
#[derive(Error, Debug)]
pub enum UserStoreError {
    /// The requested username is already registered
    #[error("Username already taken")]
    DuplicateUsername,

    /// The requested email is already registered
    #[error("Email already registered")]
    DuplicateEmail,

    /// Password hashing or verification machinery failed
    #[error("Password hashing error: {0}")]
    Hashing(String),

    /// Underlying storage failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Type alias for credential store results
pub type UserStoreResult<T> = Result<T, UserStoreError>;
