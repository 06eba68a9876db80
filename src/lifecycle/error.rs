//! Errors surfaced by the [`OrderSystem`](super::OrderSystem) facade.

use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// An actor task panicked or was cancelled during shutdown.
    #[error("Actor task failed: {0}")]
    ActorTask(String),
}
