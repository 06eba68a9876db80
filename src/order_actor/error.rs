//! Error types for the Order actor.

use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use thiserror::Error;

/// Errors that can occur during order operations.
///
/// Every variant is recoverable: a failed operation leaves orders and stock as
/// they were.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// Quantity is zero or above the configured cap. `available` is what the
    /// product could supply, so the caller can ask again.
    #[error("Invalid quantity: {requested} (available {available})")]
    InvalidQuantity { requested: u32, available: u32 },

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// `available` is the stock the request was checked against.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// `requested × unit price` is beyond what an order total can hold.
    #[error("Order amount too large: {requested} units at this price")]
    AmountOverflow { requested: u32 },

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// A client tried to read or change somebody else's order.
    #[error("Order {0} belongs to another user")]
    NotOwner(String),

    /// The order has left `Pendiente` and can no longer be revised or released.
    #[error("Order {id} is {status} and can no longer be changed")]
    OrderNotEditable { id: String, status: String },

    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Orders belong to clients; staff accounts cannot own one.
    #[error("User {0} is not a client")]
    OwnerNotClient(String),

    /// Staff placing an order must say whom it is for.
    #[error("An owner is required when staff place an order")]
    MissingOwner,

    #[error("Not allowed: {0}")]
    Forbidden(String),

    /// The order is already in its final state.
    #[error("Order {id} cannot advance from {status}")]
    InvalidTransition { id: String, status: String },

    /// The stores could not complete the unit of work; nothing was committed.
    #[error("Storage conflict: {0}")]
    StorageConflict(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::StorageConflict(msg)
    }
}

impl From<ProductError> for OrderError {
    fn from(error: ProductError) -> Self {
        match error {
            ProductError::NotFound(id) => OrderError::ProductNotFound(id),
            ProductError::InsufficientStock {
                requested,
                available,
            } => OrderError::InsufficientStock {
                requested,
                available,
            },
            ProductError::AmountOverflow { requested } => OrderError::AmountOverflow { requested },
            other => OrderError::StorageConflict(other.to_string()),
        }
    }
}

impl From<UserError> for OrderError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::NotFound(id) => OrderError::UserNotFound(id),
            other => OrderError::StorageConflict(other.to_string()),
        }
    }
}
