use super::{SystemConfig, SystemError};
use crate::clients::{ActorClient, OrderClient, ProductClient, UserClient};
use crate::model::{AdminStats, Requester};
use crate::order_actor::{OrderContext, OrderPolicy};
use tracing::{error, info, instrument};

/// The main runtime orchestrator for the order management core.
///
/// `OrderSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping all actors in the system
/// - **Dependency Wiring**: Connecting actors that depend on each other (the Order actor needs the User and Product clients)
/// - **Configuration**: Applying [`SystemConfig`] to mailboxes, paging and order rules
///
/// # Architecture
///
/// The system consists of three actors:
/// - **User Actor**: The identity store
/// - **Product Actor**: The catalog, including stock and reservations
/// - **Order Actor**: Orders; reconciles every line item change with the catalog
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new(SystemConfig::from_env());
///
/// let me = system.user_client.authenticate("ana@example.com", "s3creto").await?;
/// let order = system.order_client.place_order(&me, None, product_id, 2).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    /// Client for interacting with the Order actor
    pub order_client: OrderClient,

    /// Client for interacting with the User actor
    pub user_client: UserClient,

    /// Client for interacting with the Product actor
    pub product_client: ProductClient,

    config: SystemConfig,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Creates and initializes a new `OrderSystem` with all actors running.
    ///
    /// This method:
    /// 1. Creates the User, Product and Order actors with the configured mailbox size
    /// 2. Spawns User and Product, which have no dependencies
    /// 3. Spawns Order with an [`OrderContext`] holding clones of the other two clients
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: SystemConfig) -> Self {
        info!(?config, "Starting order system");

        // 1. Create actors (no dependencies)
        let (user_actor, user_client) = crate::user_actor::new(config.channel_buffer);
        let (product_actor, product_client) = crate::product_actor::new(config.channel_buffer);
        let (order_actor, order_client) = crate::order_actor::new(config.channel_buffer);
        let product_client = product_client.with_page_size(config.page_size);
        let order_client = order_client.with_page_size(config.page_size);

        // 2. Start actors with injected context
        let user_handle = tokio::spawn(user_actor.run(()));
        let product_handle = tokio::spawn(product_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(OrderContext::new(
            user_client.clone(),
            product_client.clone(),
            OrderPolicy::with_max_quantity(config.max_order_quantity),
        )));

        Self {
            order_client,
            user_client,
            product_client,
            config,
            handles: vec![user_handle, product_handle, order_handle],
        }
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Dashboard numbers across all three stores. Admin only.
    #[instrument(skip(self))]
    pub async fn admin_stats(&self, requester: &Requester) -> Result<AdminStats, SystemError> {
        if !requester.is_admin() {
            return Err(SystemError::AccessDenied(
                "only administrators can view statistics".to_string(),
            ));
        }

        let (users, products, orders) = tokio::try_join!(
            async { self.user_client.list().await.map_err(SystemError::from) },
            async { self.product_client.list().await.map_err(SystemError::from) },
            async { self.order_client.list().await.map_err(SystemError::from) },
        )?;

        Ok(AdminStats::collect(
            users.len(),
            &products,
            &orders,
            self.config.low_stock_threshold,
        ))
    }

    /// Gracefully shuts down the entire system.
    ///
    /// This method:
    /// 1. Drops all clients, which closes their communication channels
    /// 2. Waits for all actor tasks to complete
    /// 3. Returns an error if any actor task panicked
    ///
    /// The Order actor holds clones of the other clients in its context, so the User
    /// and Product actors only see their channels close once it has stopped. The
    /// dependency graph is acyclic, so every actor terminates.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        // =====================================================================
        // Step 1: Close all channels by dropping clients
        // =====================================================================
        drop(self.order_client);
        drop(self.user_client);
        drop(self.product_client);

        // =====================================================================
        // Step 2: Wait for all actor tasks to complete
        // =====================================================================
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::ActorTask(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
