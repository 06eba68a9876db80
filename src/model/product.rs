use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use validator::Validate;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// Represents a product in the catalog.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`])
/// - Update parameters ([`ProductUpdate`])
/// - Custom actions ([`ProductAction`](crate::product_actor::ProductAction))
///
/// `stock` is what can still be ordered. `reserved` is what existing orders hold;
/// a reservation moves units from one to the other and a release moves them back.
/// `stock + reserved` always fits in a `u32`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
    pub reserved: u32,
}

impl Product {
    /// `quantity × price`, or `None` if it does not fit in a `Decimal`.
    pub fn line_total(&self, quantity: u32) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(quantity))
    }
}

/// Payload for creating a new product.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct ProductCreate {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
}

/// Payload for updating a product. Absent fields are left alone.
#[derive(Debug, Clone, Default, Validate, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
}

/// What a successful reservation hands back to the order side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Price at the moment of reservation; becomes the line item's snapshot.
    pub unit_price: Decimal,
    /// `quantity × unit_price`, computed before any stock moved.
    pub subtotal: Decimal,
    /// Stock left after the reservation.
    pub remaining: u32,
}
