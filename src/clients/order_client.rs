//! # Order Client
//!
//! Provides a high-level API for interacting with the `Order` actor.
//!
//! The three reconciliation operations ([`OrderClient::reserve`],
//! [`OrderClient::revise`], [`OrderClient::release`]) return committed line items
//! or an [`OrderError`]; framework types never leak out. The validation and
//! stock movements themselves happen inside the Order actor's hooks.
use crate::clients::actor_client::ActorClient;
use crate::clients::DEFAULT_PAGE_SIZE;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{
    LineItem, Order, OrderCreate, OrderId, OrderRelease, OrderRevision, OrderStatus, Page,
    ProductId, Requester, UserId,
};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    page_size: usize,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self {
            inner,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Page size used by [`OrderClient::list_orders`] when asked for 0.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::OrderNotFound(id),
            other => other
                .into_entity_error::<OrderError>()
                .unwrap_or_else(|e| OrderError::StorageConflict(e.to_string())),
        }
    }
}

impl OrderClient {
    // --- Reconciliation engine ---

    /// Reserve `quantity` units of a product into a new pending order for `owner_id`.
    #[instrument(skip(self))]
    pub async fn reserve(
        &self,
        product_id: ProductId,
        quantity: u32,
        owner_id: UserId,
    ) -> Result<LineItem, OrderError> {
        Ok(self.create(owner_id, product_id, quantity).await?.item)
    }

    /// Replace a pending order's line item.
    ///
    /// The old reservation is released before the new one is checked, so the new
    /// request sees the post-release stock. On failure the order and both
    /// products are left exactly as they were.
    #[instrument(skip(self))]
    pub async fn revise(
        &self,
        order_id: OrderId,
        product_id: ProductId,
        quantity: u32,
        requester: &Requester,
    ) -> Result<LineItem, OrderError> {
        debug!("Sending request");
        let revision = OrderRevision {
            requester: *requester,
            product_id,
            quantity,
        };
        let order = self
            .inner
            .update(order_id, revision)
            .await
            .map_err(Self::map_error)?;
        info!(order_id = %order.id, total = %order.total, "Order revised");
        Ok(order.item)
    }

    /// Cancel a pending order and give its units back to stock.
    #[instrument(skip(self))]
    pub async fn release(&self, order_id: OrderId, requester: &Requester) -> Result<(), OrderError> {
        self.delete(
            order_id,
            OrderRelease {
                requester: *requester,
            },
        )
        .await?;
        info!(%order_id, "Order released");
        Ok(())
    }

    // --- Role-aware order surface ---

    /// Place an order as `requester`.
    ///
    /// A client always orders for itself; naming anybody else is `NotOwner`.
    /// Staff must name the client the order is for.
    #[instrument(skip(self))]
    pub async fn place_order(
        &self,
        requester: &Requester,
        owner_id: Option<UserId>,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Order, OrderError> {
        let owner_id = if requester.is_staff() {
            owner_id.ok_or(OrderError::MissingOwner)?
        } else {
            match owner_id {
                Some(owner) if owner != requester.user_id => {
                    return Err(OrderError::NotOwner(owner.to_string()))
                }
                _ => requester.user_id,
            }
        };
        self.create(owner_id, product_id, quantity).await
    }

    /// Fetch one order. Clients may only see their own.
    #[instrument(skip(self))]
    pub async fn details(&self, requester: &Requester, order_id: OrderId) -> Result<Order, OrderError> {
        let order = self
            .get(order_id)
            .await?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;
        if !requester.can_act_for(order.owner_id) {
            return Err(OrderError::NotOwner(order_id.to_string()));
        }
        Ok(order)
    }

    /// Newest first. Clients see only their own orders, staff see all of them.
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        requester: &Requester,
        page: usize,
        page_size: usize,
    ) -> Result<Page<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .list()
            .await?
            .into_iter()
            .filter(|order| requester.can_act_for(order.owner_id))
            .collect();
        sort_newest_first(&mut orders);
        Ok(Page::paginate(orders, page, page_size, self.page_size))
    }

    /// Every pending order across all clients, newest first. Admin only.
    #[instrument(skip(self))]
    pub async fn pending_orders(&self, requester: &Requester) -> Result<Vec<Order>, OrderError> {
        if !requester.is_admin() {
            return Err(OrderError::Forbidden(
                "only administrators can list pending orders".to_string(),
            ));
        }
        let mut orders: Vec<Order> = self
            .list()
            .await?
            .into_iter()
            .filter(|order| order.status == OrderStatus::Pendiente)
            .collect();
        sort_newest_first(&mut orders);
        Ok(orders)
    }

    /// Move an order one step forward in fulfilment. Staff only.
    #[instrument(skip(self))]
    pub async fn advance_status(
        &self,
        requester: &Requester,
        order_id: OrderId,
    ) -> Result<OrderStatus, OrderError> {
        let result = self
            .inner
            .perform_action(
                order_id,
                OrderAction::Advance {
                    requester: *requester,
                },
            )
            .await
            .map_err(Self::map_error)?;
        match result {
            OrderActionResult::Advanced(status) => {
                info!(%order_id, %status, "Order advanced");
                Ok(status)
            }
        }
    }

    async fn create(
        &self,
        owner_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Order, OrderError> {
        debug!("Sending create to order actor");
        let order = self
            .inner
            .create(OrderCreate {
                owner_id,
                product_id,
                quantity,
            })
            .await
            .map_err(Self::map_error)?;
        info!(order_id = %order.id, owner_id = %order.owner_id, total = %order.total, "Order placed");
        Ok(order)
    }
}

fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then(b.id.0.cmp(&a.id.0))
    });
}
