//! Custom actions for the Product actor.
//!
//! This module defines the domain-specific operations (Actions) that can be performed
//! on a [`Product`](crate::model::Product) entity: checking stock, reserving units for
//! an order and releasing them again.
//! These actions are handled by the [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action) method,
//! either one at a time or several in one all-or-nothing batch.

use crate::model::Reservation;

/// Custom actions for Product entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Checks the current stock level without modifying it.
    CheckStock,
    /// Moves units from `stock` to `reserved` and snapshots the current price.
    ///
    /// # Errors
    /// Fails on a zero quantity, or if the amount exceeds available stock.
    Reserve(u32),
    /// Moves units from `reserved` back to `stock`.
    Release(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    /// Result from CheckStock action - returns the current stock level
    CheckStock(u32),
    /// Result from Reserve action
    Reserved(Reservation),
    /// Result from Release action - returns the stock level after the release
    Released { stock: u32 },
}
