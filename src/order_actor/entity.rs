//! ActorEntity trait implementation for the Order domain type.
//!
//! The hooks here are the reconciliation engine: every change to an order's
//! line item is paired with the matching stock movement in the catalog, and the
//! order is only written once that movement has been committed.
//!
//! | Operation | Hook             | Stock movement                           |
//! |-----------|------------------|------------------------------------------|
//! | Reserve   | `on_create`      | `Reserve(q)` on the product              |
//! | Revise    | `on_update`      | batch `Release(old)` + `Reserve(new)`    |
//! | Release   | `on_delete`      | `Release(q)` on the product              |
//! | Advance   | `handle_action`  | none                                     |
//!
//! The catalog call is the last fallible step of each hook, so when it fails
//! nothing has been committed anywhere, and when it succeeds the order write
//! that follows cannot fail. The line subtotal comes back with the reservation,
//! already computed by the catalog before it moved any stock.

use super::actions::{OrderAction, OrderActionResult};
use super::policy::OrderPolicy;
use super::OrderError;
use crate::clients::{ActorClient, ProductClient, UserClient};
use crate::framework::ActorEntity;
use crate::model::{
    Order, OrderCreate, OrderId, OrderRelease, OrderRevision, ProductId, Requester, Role,
};
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

/// Dependencies the Order actor needs at runtime.
#[derive(Clone)]
pub struct OrderContext {
    pub users: UserClient,
    pub products: ProductClient,
    pub policy: OrderPolicy,
}

impl OrderContext {
    pub fn new(users: UserClient, products: ProductClient, policy: OrderPolicy) -> Self {
        Self {
            users,
            products,
            policy,
        }
    }
}

impl OrderContext {
    /// Rejects a quantity the policy does not allow, reporting what `product_id`
    /// could supply. `returned` is what the order already holds of that product
    /// and would get back before reserving again.
    async fn check_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
        returned: u32,
    ) -> Result<(), OrderError> {
        if self.policy.allows(quantity) {
            return Ok(());
        }
        let stock = self.products.check_stock(product_id).await?;
        Err(OrderError::InvalidQuantity {
            requested: quantity,
            available: stock.saturating_add(returned),
        })
    }
}

impl Order {
    /// Revise and Release share this precondition.
    fn ensure_editable_by(&self, requester: &Requester) -> Result<(), OrderError> {
        if !requester.can_act_for(self.owner_id) {
            return Err(OrderError::NotOwner(self.id.to_string()));
        }
        if !self.status.is_editable() {
            return Err(OrderError::OrderNotEditable {
                id: self.id.to_string(),
                status: self.status.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderRevision;
    type Delete = OrderRelease;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        Ok(Self::pending(
            id,
            params.owner_id,
            params.product_id,
            params.quantity,
        ))
    }

    /// Reserve: validate, take the stock, snapshot the price.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        ctx.check_quantity(self.item.product_id, self.item.quantity, 0)
            .await?;

        let owner = ctx
            .users
            .get(self.owner_id)
            .await?
            .ok_or_else(|| OrderError::UserNotFound(self.owner_id.to_string()))?;
        if owner.role != Role::Cliente {
            return Err(OrderError::OwnerNotClient(owner.id.to_string()));
        }

        let reservation = ctx
            .products
            .reserve(self.item.product_id, self.item.quantity)
            .await?;

        self.item.price_from(&reservation);
        self.total = self.item.subtotal;
        info!(
            order_id = %self.id,
            product_id = %reservation.product_id,
            quantity = self.item.quantity,
            remaining = reservation.remaining,
            "Stock reserved"
        );
        Ok(())
    }

    /// Revise: give back the current line's units and take the new ones in one
    /// catalog batch, then replace the line item.
    async fn on_update(&mut self, revision: OrderRevision, ctx: &OrderContext) -> Result<(), OrderError> {
        self.ensure_editable_by(&revision.requester)?;
        let returned = if revision.product_id == self.item.product_id {
            self.item.quantity
        } else {
            0
        };
        ctx.check_quantity(revision.product_id, revision.quantity, returned)
            .await?;

        let reservation = ctx
            .products
            .swap_reservation(
                self.item.product_id,
                self.item.quantity,
                revision.product_id,
                revision.quantity,
            )
            .await?;

        let item = self.item.revised(&reservation);
        info!(
            order_id = %self.id,
            from = %self.item.product_id,
            to = %item.product_id,
            quantity = item.quantity,
            "Line item revised"
        );
        self.replace_item(item);
        Ok(())
    }

    /// Release: return the units to the product; the actor then drops the order.
    async fn on_delete(&self, release: OrderRelease, ctx: &OrderContext) -> Result<(), OrderError> {
        self.ensure_editable_by(&release.requester)?;

        let stock = ctx
            .products
            .release(self.item.product_id, self.item.quantity)
            .await?;
        info!(
            order_id = %self.id,
            product_id = %self.item.product_id,
            stock,
            "Stock released"
        );
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &OrderContext,
    ) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::Advance { requester } => {
                if !requester.is_staff() {
                    return Err(OrderError::Forbidden(
                        "only staff can advance an order".to_string(),
                    ));
                }
                let next = self.status.next().ok_or_else(|| OrderError::InvalidTransition {
                    id: self.id.to_string(),
                    status: self.status.to_string(),
                })?;
                self.status = next;
                self.updated_at = Utc::now();
                Ok(OrderActionResult::Advanced(next))
            }
        }
    }
}
