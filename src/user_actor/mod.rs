//! # User Actor
//!
//! This module implements the identity store: user accounts with their role and
//! a hashed credential.
//!
//! ## Overview
//!
//! The User actor has no dependencies and no custom actions. From the order
//! side it is read-only; orders only ask it whether an owner exists.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`User`]
//! - [`error`] - [`UserError`] type for type-safe error handling
//! - [`credentials`] - argon2 hashing and verification
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pedidos::model::{Role, UserCreate};
//! use pedidos::user_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = user_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     client
//!         .create_user(UserCreate::new("Ana", "ana@example.com", "s3creto", Role::Cliente))
//!         .await?;
//!     let requester = client.authenticate("ana@example.com", "s3creto").await?;
//!     assert_eq!(requester.role, Role::Cliente);
//!     Ok(())
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Unique email**: enforced by the actor through [`ActorEntity::unique_key`](crate::framework::ActorEntity::unique_key)
//! - **No plaintext**: only the PHC hash is stored, and `Debug` output redacts it
//! - **Type-safe errors**: All operations return `Result<T, UserError>`

pub mod credentials;
pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::framework::ResourceActor;
use crate::model::User;

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, UserClient::new(generic_client))
}
