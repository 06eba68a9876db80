//! Error types for the Product actor.

use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The provided quantity is invalid (zero, or more than is held).
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// `requested × price` does not fit in a `Decimal`.
    #[error("Order amount too large: {requested} units at this price")]
    AmountOverflow { requested: u32 },

    /// Stock plus reserved units would no longer fit in a `u32`.
    #[error("Stock overflow on {0}")]
    StockOverflow(String),

    /// The payload failed field validation.
    #[error("Invalid product data: {0}")]
    Validation(String),

    /// Orders still hold units of this product.
    #[error("Product {id} is held by orders ({reserved} units reserved)")]
    InUse { id: String, reserved: u32 },

    /// Only staff may change the catalog.
    #[error("Not allowed to modify the catalog")]
    Forbidden,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::ActorCommunicationError(msg)
    }
}

impl From<validator::ValidationErrors> for ProductError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ProductError::Validation(errors.to_string())
    }
}
