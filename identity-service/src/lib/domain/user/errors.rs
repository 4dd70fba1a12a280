use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all identity operations.
///
/// `NotFoundByEmail` and `InvalidCredentials` stay separate here so
/// diagnostics can tell them apart; the HTTP boundary collapses them into a
/// single response.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    // Domain-level errors
    #[error("Email already in use: {0}")]
    EmailAlreadyInUse(String),

    #[error("No user found with email: {0}")]
    NotFoundByEmail(String),

    #[error("No user found with ID: {0}")]
    NotFoundById(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Internal error: {0}")]
    Internal(String),
}
