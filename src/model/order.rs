use crate::model::{ProductId, Requester, Reservation, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Identifier of an order's line item. Every revision replaces the item, so the
/// revision number is bumped and the old id is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineItemId {
    pub order: OrderId,
    pub revision: u32,
}

impl Display for LineItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/item_{}", self.order, self.revision)
    }
}

/// Fulfilment state. Orders only ever move forward through these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pendiente,
    Procesado,
    Enviado,
    Entregado,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pendiente,
        OrderStatus::Procesado,
        OrderStatus::Enviado,
        OrderStatus::Entregado,
    ];

    /// The state after this one, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            OrderStatus::Pendiente => Some(OrderStatus::Procesado),
            OrderStatus::Procesado => Some(OrderStatus::Enviado),
            OrderStatus::Enviado => Some(OrderStatus::Entregado),
            OrderStatus::Entregado => None,
        }
    }

    /// Only pending orders may be revised or released.
    pub fn is_editable(self) -> bool {
        self == OrderStatus::Pendiente
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::Pendiente => "Pendiente",
            OrderStatus::Procesado => "Procesado",
            OrderStatus::Enviado => "Enviado",
            OrderStatus::Entregado => "Entregado",
        };
        f.write_str(name)
    }
}

/// The single product line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

impl LineItem {
    /// A line whose price is not known yet. The order actor fills it in from the reservation.
    pub fn unpriced(order_id: OrderId, product_id: ProductId, quantity: u32) -> Self {
        Self {
            id: LineItemId {
                order: order_id,
                revision: 1,
            },
            order_id,
            product_id,
            quantity,
            unit_price: Decimal::ZERO,
            subtotal: Decimal::ZERO,
        }
    }

    /// Takes price and subtotal from the reservation that backs this line.
    pub fn price_from(&mut self, reservation: &Reservation) {
        self.unit_price = reservation.unit_price;
        self.subtotal = reservation.subtotal;
    }

    /// The line that replaces this one after a revision.
    pub fn revised(&self, reservation: &Reservation) -> Self {
        Self {
            id: LineItemId {
                order: self.order_id,
                revision: self.id.revision + 1,
            },
            order_id: self.order_id,
            product_id: reservation.product_id,
            quantity: reservation.quantity,
            unit_price: reservation.unit_price,
            subtotal: reservation.subtotal,
        }
    }
}

/// Represents a customer order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation parameters ([`OrderCreate`])
/// - Revision parameters ([`OrderRevision`])
/// - Release parameters ([`OrderRelease`])
/// - Custom actions ([`OrderAction`](crate::order_actor::OrderAction))
///
/// `total` always equals `item.subtotal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total: Decimal,
    pub item: LineItem,
}

impl Order {
    /// A pending order whose line is not priced yet.
    pub fn pending(id: OrderId, owner_id: UserId, product_id: ProductId, quantity: u32) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            created_at: now,
            updated_at: now,
            status: OrderStatus::Pendiente,
            total: Decimal::ZERO,
            item: LineItem::unpriced(id, product_id, quantity),
        }
    }

    /// Swaps in a new line item and keeps the total in step with it.
    pub fn replace_item(&mut self, item: LineItem) {
        self.total = item.subtotal;
        self.item = item;
        self.updated_at = Utc::now();
    }
}

/// Payload for reserving stock into a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub owner_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Payload for revising the line item of a pending order.
#[derive(Debug, Clone)]
pub struct OrderRevision {
    pub requester: Requester,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Payload for releasing (cancelling) a pending order.
#[derive(Debug, Clone)]
pub struct OrderRelease {
    pub requester: Requester,
}
