use crate::model::Role;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use validator::Validate;

/// Type-safe identifier for Users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user_{}", self.0)
    }
}

/// Represents a registered user in the system.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for User`](#impl-ActorEntity-for-User) for details on:
/// - Creation parameters ([`UserCreate`])
/// - Update parameters ([`UserUpdate`])
///
/// Only the argon2 PHC string of the password is kept, and it is never serialized.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
}

impl Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Payload for creating a new user.
#[derive(Clone, Validate, Deserialize)]
pub struct UserCreate {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: String,
    #[validate(email(message = "email is not valid"))]
    #[validate(length(max = 150, message = "email must be at most 150 characters"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "password must be 1 to 100 characters"))]
    pub password: String,
    pub role: Role,
}

impl UserCreate {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role,
        }
    }
}

// Payloads are logged at debug level by the actor loop.
impl Debug for UserCreate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCreate")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Payload for updating an existing user.
#[derive(Debug, Clone, Default, Validate, Serialize, Deserialize)]
pub struct UserUpdate {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "email is not valid"))]
    #[validate(length(max = 150, message = "email must be at most 150 characters"))]
    pub email: Option<String>,
}

/// Emails are compared case-insensitively and without surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
