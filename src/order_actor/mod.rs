//! # Order Actor
//!
//! Orders and their single line item. Every write goes through the hooks in
//! [`entity`], which keep product stock in step with the line items.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Order`] and its [`OrderContext`]
//! - [`error`] - [`OrderError`] with the full failure taxonomy
//! - [`actions`] - [`OrderAction::Advance`] for fulfilment
//! - [`policy`] - [`OrderPolicy`] quantity rules
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! The Order actor depends on the User and Product actors. They are injected
//! through [`OrderContext`] when the actor is started:
//!
//! ```rust,ignore
//! let (order_actor, order_client) = order_actor::new(32);
//! tokio::spawn(order_actor.run(OrderContext::new(
//!     user_client.clone(),
//!     product_client.clone(),
//!     OrderPolicy::default(),
//! )));
//! ```

pub mod actions;
pub mod entity;
pub mod error;
pub mod policy;

pub use actions::*;
pub use entity::OrderContext;
pub use error::*;
pub use policy::*;

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::Order;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
