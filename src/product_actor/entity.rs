//! ActorEntity trait implementation for the Product domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`Product`] to be managed by the generic [`crate::framework::ResourceActor`].
//!
//! Includes the stock actions the order side relies on: reserving and releasing.
//!
//! See the trait implementation on [`Product`] for method documentation.

use super::actions::{ProductAction, ProductActionResult};
use super::ProductError;
use crate::framework::ActorEntity;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate, Reservation};
use async_trait::async_trait;
use rust_decimal::Decimal;
use validator::Validate;

fn ensure_positive_price(price: Decimal) -> Result<(), ProductError> {
    if price <= Decimal::ZERO {
        return Err(ProductError::Validation(format!(
            "price must be greater than zero, got {price}"
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Delete = ();
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    /// Creates a new Product from creation parameters.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        params.validate()?;
        ensure_positive_price(params.price)?;
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            stock: params.stock,
            reserved: 0,
        })
    }

    /// Handles updates to the Product entity.
    ///
    /// # Fields Updated
    /// - `name`, `description`
    /// - `price`: affects future reservations only; existing line items keep their snapshot
    /// - `stock`: the orderable quantity; units already reserved are not touched
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), ProductError> {
        update.validate()?;
        if let Some(price) = update.price {
            ensure_positive_price(price)?;
            self.price = price;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(stock) = update.stock {
            if stock.checked_add(self.reserved).is_none() {
                return Err(ProductError::Validation(format!(
                    "stock {stock} plus {} reserved units is out of range",
                    self.reserved
                )));
            }
            self.stock = stock;
        }
        Ok(())
    }

    /// A product still held by orders cannot be removed.
    async fn on_delete(&self, _params: (), _ctx: &()) -> Result<(), ProductError> {
        if self.reserved > 0 {
            return Err(ProductError::InUse {
                id: self.id.to_string(),
                reserved: self.reserved,
            });
        }
        Ok(())
    }

    /// Handles custom actions for the Product entity.
    ///
    /// # Actions
    /// - `CheckStock`: Returns the current stock level
    /// - `Reserve`: Decrements stock if available and returns the price snapshot.
    ///   The subtotal is computed first so an oversized amount moves no stock.
    /// - `Release`: Returns previously reserved units to stock
    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock)),
            ProductAction::Reserve(quantity) => {
                if quantity == 0 {
                    return Err(ProductError::InvalidQuantity(quantity));
                }
                if self.stock < quantity {
                    return Err(ProductError::InsufficientStock {
                        requested: quantity,
                        available: self.stock,
                    });
                }
                let subtotal = self
                    .line_total(quantity)
                    .ok_or(ProductError::AmountOverflow {
                        requested: quantity,
                    })?;
                let reserved = self
                    .reserved
                    .checked_add(quantity)
                    .ok_or_else(|| ProductError::StockOverflow(self.id.to_string()))?;
                self.stock -= quantity;
                self.reserved = reserved;
                Ok(ProductActionResult::Reserved(Reservation {
                    product_id: self.id,
                    quantity,
                    unit_price: self.price,
                    subtotal,
                    remaining: self.stock,
                }))
            }
            ProductAction::Release(quantity) => {
                if quantity == 0 || quantity > self.reserved {
                    return Err(ProductError::InvalidQuantity(quantity));
                }
                self.stock = self
                    .stock
                    .checked_add(quantity)
                    .ok_or_else(|| ProductError::StockOverflow(self.id.to_string()))?;
                self.reserved -= quantity;
                Ok(ProductActionResult::Released { stock: self.stock })
            }
        }
    }
}
