//! # User Client
//!
//! Registration, profile updates and login against the identity store.
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{normalize_email, Requester, User, UserCreate, UserId, UserUpdate};
use crate::user_actor::credentials::verify_password;
use crate::user_actor::UserError;
use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            FrameworkError::Conflict(email) => UserError::EmailTaken(email),
            other => other
                .into_entity_error::<UserError>()
                .unwrap_or_else(|e| UserError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl UserClient {
    /// Register a new account. The email must not be in use.
    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Check an email/password pair and return who the caller is.
    ///
    /// Unknown email and wrong password both yield [`UserError::InvalidCredentials`].
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Requester, UserError> {
        let email = normalize_email(email);
        let user = self
            .list()
            .await?
            .into_iter()
            .find(|user| user.email == email);

        match user {
            Some(user) if verify_password(password, &user.password_hash) => {
                info!(user_id = %user.id, role = %user.role, "Authenticated");
                Ok(Requester::new(user.id, user.role))
            }
            _ => {
                warn!("Authentication failed");
                Err(UserError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;
    use crate::model::Role;
    use crate::user_actor::credentials::hash_password;

    fn stored(id: u32, email: &str, password: &str) -> User {
        User {
            id: UserId(id),
            name: "Ana".into(),
            email: email.into(),
            password_hash: hash_password(password).unwrap(),
            role: Role::Empleado,
        }
    }

    #[tokio::test]
    async fn test_authenticate_matches_email_case_insensitively() {
        let mut mock = MockClient::<User>::new();
        mock.expect_list()
            .return_ok(vec![stored(1, "ana@example.com", "pw")]);
        let client = UserClient::new(mock.client());

        let requester = client.authenticate(" Ana@Example.com ", "pw").await.unwrap();
        assert_eq!(requester, Requester::new(UserId(1), Role::Empleado));
        mock.verify();
    }

    #[tokio::test]
    async fn test_authenticate_hides_which_part_was_wrong() {
        let mut mock = MockClient::<User>::new();
        mock.expect_list()
            .return_ok(vec![stored(1, "ana@example.com", "pw")]);
        mock.expect_list()
            .return_ok(vec![stored(1, "ana@example.com", "pw")]);
        let client = UserClient::new(mock.client());

        let wrong_password = client.authenticate("ana@example.com", "nope").await;
        let wrong_email = client.authenticate("bob@example.com", "pw").await;
        assert_eq!(wrong_password, Err(UserError::InvalidCredentials));
        assert_eq!(wrong_email, Err(UserError::InvalidCredentials));
        mock.verify();
    }

    #[tokio::test]
    async fn test_conflict_maps_to_email_taken() {
        let mut mock = MockClient::<User>::new();
        mock.expect_create()
            .return_err(FrameworkError::Conflict("ana@example.com".into()));
        let client = UserClient::new(mock.client());

        let err = client
            .create_user(UserCreate::new("Ana", "ana@example.com", "pw", Role::Cliente))
            .await
            .unwrap_err();
        assert_eq!(err, UserError::EmailTaken("ana@example.com".into()));
    }
}
