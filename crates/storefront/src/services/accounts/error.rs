//! Account error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// A required profile field was empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] cenphone_core::EmailError),

    /// Invalid username.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] cenphone_core::UsernameError),

    /// Telephone number failed validation.
    #[error("telephone must contain at least 10 digits")]
    InvalidTelephone,

    /// Password too weak.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password and confirmation do not match.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// An account with this email or username already exists.
    #[error("an account with this email or username already exists")]
    DuplicateAccount,

    /// Invalid credentials (unknown email or wrong password).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User not found.
    #[error("user not found")]
    UserNotFound,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Gateway/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}
