//! # Product Actor
//!
//! This module implements the catalog store: products with their price and stock,
//! plus the stock actions the order side uses to reserve and release units.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for stock management
//! - [`query`] - [`ProductQuery`] and [`CatalogPage`] for filtered, paginated listings
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Custom Actions
//!
//! ```rust,ignore
//! // Check current stock level (read-only)
//! let stock = product_client.check_stock(product_id).await?;
//!
//! // Reserve stock for an order (mutating, can fail)
//! let reservation = product_client.reserve(product_id, quantity).await?;
//!
//! // Give back one reservation and take another, all-or-nothing
//! let reservation = product_client
//!     .swap_reservation(old_product, old_quantity, new_product, new_quantity)
//!     .await?;
//! ```
//!
//! ## Key Features
//!
//! - **Stock never goes negative**: `Reserve` checks and decrements in the same request
//! - **Atomic swaps**: revisions go through a single batch request
//! - **Referential safety**: a product with reserved units cannot be deleted

pub mod actions;
pub mod entity;
pub mod error;
pub mod query;

pub use actions::*;
pub use error::*;
pub use query::*;

use crate::clients::ProductClient;
use crate::framework::ResourceActor;
use crate::model::Product;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}
