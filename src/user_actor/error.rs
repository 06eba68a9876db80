//! Error types for the User actor.

use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The requested user was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// Another account already uses this email.
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// The payload failed field validation.
    #[error("Invalid user data: {0}")]
    Validation(String),

    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The password could not be hashed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for UserError {
    fn from(msg: String) -> Self {
        UserError::ActorCommunicationError(msg)
    }
}

impl From<validator::ValidationErrors> for UserError {
    fn from(errors: validator::ValidationErrors) -> Self {
        UserError::Validation(errors.to_string())
    }
}

impl From<argon2::password_hash::Error> for UserError {
    fn from(error: argon2::password_hash::Error) -> Self {
        UserError::PasswordHash(error.to_string())
    }
}
