//! # Pedidos demo
//!
//! Walks through one session against an in-memory [`OrderSystem`]:
//! 1. Registering accounts and logging in.
//! 2. Stocking the catalog and searching it.
//! 3. Placing, revising and releasing orders, including a revision that fails.
//! 4. Moving an order through fulfilment and reading the dashboard.

use pedidos::lifecycle::{setup_tracing, OrderSystem, SystemConfig, SystemError};
use pedidos::model::{ProductCreate, Role, UserCreate};
use pedidos::product_actor::ProductQuery;
use rust_decimal::Decimal;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let system = OrderSystem::new(SystemConfig::from_env());

    // --- Accounts ---
    let span = tracing::info_span!("accounts");
    let (admin, clerk, ana) = async {
        for (name, email, role) in [
            ("Admin", "admin@pedidos.test", Role::Admin),
            ("Eva", "eva@pedidos.test", Role::Empleado),
            ("Ana", "ana@pedidos.test", Role::Cliente),
        ] {
            system
                .user_client
                .create_user(UserCreate::new(name, email, "demo-password", role))
                .await?;
        }
        let users = &system.user_client;
        Ok::<_, SystemError>((
            users.authenticate("admin@pedidos.test", "demo-password").await?,
            users.authenticate("eva@pedidos.test", "demo-password").await?,
            users.authenticate("ana@pedidos.test", "demo-password").await?,
        ))
    }
    .instrument(span)
    .await?;

    // --- Catalog ---
    let span = tracing::info_span!("catalog");
    let (keyboard, mouse) = async {
        let keyboard = system
            .product_client
            .create_product(
                &admin,
                ProductCreate {
                    name: "Teclado".to_string(),
                    description: "Teclado mecánico".to_string(),
                    price: Decimal::new(4999, 2),
                    stock: 5,
                },
            )
            .await?;
        let mouse = system
            .product_client
            .create_product(
                &clerk,
                ProductCreate {
                    name: "Ratón".to_string(),
                    description: "Ratón inalámbrico".to_string(),
                    price: Decimal::new(1950, 2),
                    stock: 20,
                },
            )
            .await?;

        let found = system
            .product_client
            .search(ProductQuery::named("tec"))
            .await?;
        info!(hits = found.page.total_items, "Catalog search");
        Ok::<_, SystemError>((keyboard.id, mouse.id))
    }
    .instrument(span)
    .await?;

    // --- Orders ---
    let span = tracing::info_span!("orders");
    let order_id = async {
        let order = system
            .order_client
            .place_order(&ana, None, keyboard, 3)
            .await?;
        info!(order_id = %order.id, total = %order.total, "Ana placed an order");

        // Same product, more units: only the difference must be in stock.
        let item = system
            .order_client
            .revise(order.id, keyboard, 4, &ana)
            .await?;
        info!(subtotal = %item.subtotal, "Revised to 4 keyboards");

        // Not enough mice: the order and both stocks stay as they were.
        if let Err(e) = system.order_client.revise(order.id, mouse, 50, &ana).await {
            warn!(error = %e, "Revision rejected");
        }

        let spare = system
            .order_client
            .place_order(&clerk, Some(ana.user_id), mouse, 2)
            .await?;
        system.order_client.release(spare.id, &ana).await?;
        info!(
            mice = system.product_client.check_stock(mouse).await?,
            "Released the second order"
        );

        Ok::<_, SystemError>(order.id)
    }
    .instrument(span)
    .await?;

    // --- Fulfilment and dashboard ---
    let status = system.order_client.advance_status(&clerk, order_id).await?;
    info!(%order_id, %status, "Order is being processed");

    let stats = system.admin_stats(&admin).await?;
    info!(?stats, "Dashboard");

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
