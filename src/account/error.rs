//! Error types for account operations.

use thiserror::Error;

use crate::store::StoreError;

/// Error type for registration, authentication and user lookups.
#[derive(Error, Debug)]
pub enum AccountError {
    /// Missing or malformed input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Another user already registered with this email.
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// Another user already claimed this username.
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// No user record matched the lookup.
    #[error("User not found: {0}")]
    NotFound(String),

    /// Password did not match the stored credential.
    #[error("Incorrect password")]
    WrongPassword,

    /// Underlying store failure.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for account operations.
pub type Result<T> = std::result::Result<T, AccountError>;
