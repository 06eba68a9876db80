//! ActorEntity trait implementation for the User domain type.
//!
//! See the trait implementation on [`User`] for method documentation.

use super::credentials::hash_password;
use super::UserError;
use crate::framework::ActorEntity;
use crate::model::{normalize_email, User, UserCreate, UserId, UserUpdate};
use async_trait::async_trait;
use validator::Validate;

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Delete = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = UserError;

    /// Validates the payload and replaces the plaintext password with its hash.
    ///
    /// Name and email are trimmed before validation, so a blank name is rejected.
    fn from_create_params(id: UserId, mut params: UserCreate) -> Result<Self, UserError> {
        params.name = params.name.trim().to_string();
        params.email = normalize_email(&params.email);
        params.validate()?;
        let password_hash = hash_password(&params.password)?;
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            password_hash,
            role: params.role,
        })
    }

    /// One account per email.
    fn unique_key(&self) -> Option<String> {
        Some(normalize_email(&self.email))
    }

    /// Handles updates to the User entity.
    ///
    /// # Fields Updated
    /// - `name`: User's display name
    /// - `email`: User's email address (normalized)
    async fn on_update(&mut self, mut update: UserUpdate, _ctx: &()) -> Result<(), UserError> {
        update.name = update.name.map(|name| name.trim().to_string());
        update.email = update.email.as_deref().map(normalize_email);
        update.validate()?;
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), UserError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    #[test]
    fn test_blank_name_is_rejected_after_trimming() {
        let err = User::from_create_params(
            UserId(1),
            UserCreate::new("   ", "ana@example.com", "pw", Role::Cliente),
        )
        .unwrap_err();
        assert!(matches!(err, UserError::Validation(_)));
    }

    #[test]
    fn test_create_stores_trimmed_fields() {
        let user = User::from_create_params(
            UserId(1),
            UserCreate::new("  Ana ", " Ana@Example.com ", "pw", Role::Cliente),
        )
        .unwrap();
        assert_eq!(user.name, "Ana");
        assert_eq!(user.email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name() {
        let mut user = User::from_create_params(
            UserId(1),
            UserCreate::new("Ana", "ana@example.com", "pw", Role::Cliente),
        )
        .unwrap();

        let err = user
            .on_update(
                UserUpdate {
                    name: Some(" \t ".into()),
                    ..Default::default()
                },
                &(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::Validation(_)));
        assert_eq!(user.name, "Ana");
    }
}
