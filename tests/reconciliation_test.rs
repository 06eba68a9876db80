//! Stock/order reconciliation against the full system with all real actors.

use pedidos::clients::ActorClient;
use pedidos::lifecycle::{OrderSystem, SystemConfig};
use pedidos::model::{ProductCreate, ProductId, Requester, Role, UserCreate};
use pedidos::order_actor::OrderError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

struct Shop {
    system: OrderSystem,
    admin: Requester,
    ana: Requester,
    bob: Requester,
}

async fn shop() -> Shop {
    let system = OrderSystem::new(SystemConfig::default());
    let mut accounts = Vec::new();
    for (name, role) in [("admin", Role::Admin), ("ana", Role::Cliente), ("bob", Role::Cliente)] {
        let user = system
            .user_client
            .create_user(UserCreate::new(name, format!("{name}@example.com"), "pw", role))
            .await
            .expect("Failed to create user");
        accounts.push(Requester::new(user.id, user.role));
    }
    Shop {
        system,
        admin: accounts[0],
        ana: accounts[1],
        bob: accounts[2],
    }
}

impl Shop {
    async fn product(&self, name: &str, price: Decimal, stock: u32) -> ProductId {
        self.system
            .product_client
            .create_product(
                &self.admin,
                ProductCreate {
                    name: name.to_string(),
                    description: String::new(),
                    price,
                    stock,
                },
            )
            .await
            .expect("Failed to create product")
            .id
    }

    async fn stock(&self, id: ProductId) -> u32 {
        self.system
            .product_client
            .check_stock(id)
            .await
            .expect("Failed to check stock")
    }

    async fn close(self) {
        self.system.shutdown().await.expect("Failed to shutdown system");
    }
}

#[tokio::test]
async fn test_reserve_decrements_stock_and_prices_order() {
    let shop = shop().await;
    let widget = shop.product("Widget", dec!(2.50), 10).await;

    let item = shop
        .system
        .order_client
        .reserve(widget, 4, shop.ana.user_id)
        .await
        .unwrap();

    assert_eq!(shop.stock(widget).await, 6);
    let order = shop.system.order_client.details(&shop.ana, item.order_id).await.unwrap();
    assert_eq!(order.total, dec!(10.00));
    assert_eq!(order.total, Decimal::from(item.quantity) * item.unit_price);

    shop.close().await;
}

#[tokio::test]
async fn test_reserve_beyond_stock_changes_nothing() {
    let shop = shop().await;
    let widget = shop.product("Widget", dec!(1), 3).await;

    let err = shop
        .system
        .order_client
        .reserve(widget, 4, shop.ana.user_id)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::InsufficientStock {
            requested: 4,
            available: 3
        }
    );
    assert_eq!(shop.stock(widget).await, 3);
    assert!(shop.system.order_client.list().await.unwrap().is_empty());

    shop.close().await;
}

#[tokio::test]
async fn test_reserve_unknown_product_and_zero_quantity() {
    let shop = shop().await;
    let widget = shop.product("Widget", dec!(1), 3).await;
    let orders = &shop.system.order_client;

    assert_eq!(
        orders.reserve(ProductId(99), 1, shop.ana.user_id).await,
        Err(OrderError::ProductNotFound("product_99".into()))
    );
    assert_eq!(
        orders.reserve(widget, 0, shop.ana.user_id).await,
        Err(OrderError::InvalidQuantity {
            requested: 0,
            available: 3
        })
    );

    shop.close().await;
}

#[tokio::test]
async fn test_same_product_revise_applies_net_delta() {
    let shop = shop().await;
    let widget = shop.product("Widget", dec!(3), 5).await;
    let orders = &shop.system.order_client;

    let item = orders.reserve(widget, 3, shop.ana.user_id).await.unwrap();
    assert_eq!(shop.stock(widget).await, 2);

    // Only one more unit is needed, and two are free.
    let revised = orders.revise(item.order_id, widget, 4, &shop.ana).await.unwrap();
    assert_eq!(shop.stock(widget).await, 1);
    assert_eq!(revised.subtotal, dec!(12));

    // Shrinking gives units back.
    orders.revise(item.order_id, widget, 1, &shop.ana).await.unwrap();
    assert_eq!(shop.stock(widget).await, 4);

    shop.close().await;
}

#[tokio::test]
async fn test_revise_checks_post_release_stock() {
    let shop = shop().await;
    let widget = shop.product("Widget", dec!(1), 5).await;
    let orders = &shop.system.order_client;

    let item = orders.reserve(widget, 3, shop.ana.user_id).await.unwrap();

    // 6 > 5 even after the 3 come back; the error reports what was there after release.
    let err = orders.revise(item.order_id, widget, 6, &shop.ana).await.unwrap_err();
    assert_eq!(
        err,
        OrderError::InsufficientStock {
            requested: 6,
            available: 5
        }
    );

    shop.close().await;
}

#[tokio::test]
async fn test_failed_revise_is_atomic() {
    let shop = shop().await;
    let widget = shop.product("Widget", dec!(2), 5).await;
    let gadget = shop.product("Gadget", dec!(7), 1).await;
    let orders = &shop.system.order_client;

    let item = orders.reserve(widget, 3, shop.ana.user_id).await.unwrap();
    let before = orders.details(&shop.ana, item.order_id).await.unwrap();

    let err = orders.revise(item.order_id, gadget, 2, &shop.ana).await.unwrap_err();
    assert!(matches!(err, OrderError::InsufficientStock { requested: 2, available: 1 }));

    let err = orders
        .revise(item.order_id, ProductId(404), 1, &shop.ana)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::ProductNotFound(_)));

    assert_eq!(shop.stock(widget).await, 2);
    assert_eq!(shop.stock(gadget).await, 1);
    assert_eq!(orders.details(&shop.ana, item.order_id).await.unwrap(), before);

    shop.close().await;
}

#[tokio::test]
async fn test_cross_product_revise_moves_stock_between_products() {
    let shop = shop().await;
    let widget = shop.product("Widget", dec!(2), 5).await;
    let gadget = shop.product("Gadget", dec!(7), 4).await;
    let orders = &shop.system.order_client;

    let item = orders.reserve(widget, 3, shop.ana.user_id).await.unwrap();
    let revised = orders.revise(item.order_id, gadget, 4, &shop.ana).await.unwrap();

    assert_eq!(shop.stock(widget).await, 5);
    assert_eq!(shop.stock(gadget).await, 0);
    assert_eq!(revised.unit_price, dec!(7));
    let order = orders.details(&shop.ana, item.order_id).await.unwrap();
    assert_eq!(order.total, dec!(28));

    shop.close().await;
}

#[tokio::test]
async fn test_revise_snapshots_current_price() {
    let shop = shop().await;
    let widget = shop.product("Widget", dec!(2), 5).await;
    let orders = &shop.system.order_client;

    let item = orders.reserve(widget, 2, shop.ana.user_id).await.unwrap();
    shop.system
        .product_client
        .update_product(
            &shop.admin,
            widget,
            pedidos::model::ProductUpdate {
                price: Some(dec!(3)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Existing line keeps its snapshot until it is revised.
    let order = orders.details(&shop.ana, item.order_id).await.unwrap();
    assert_eq!(order.total, dec!(4));

    let revised = orders.revise(item.order_id, widget, 2, &shop.ana).await.unwrap();
    assert_eq!(revised.unit_price, dec!(3));
    assert_eq!(revised.subtotal, dec!(6));

    shop.close().await;
}

#[tokio::test]
async fn test_release_restores_stock_exactly_once() {
    let shop = shop().await;
    let widget = shop.product("Widget", dec!(1), 5).await;
    let orders = &shop.system.order_client;

    let item = orders.reserve(widget, 3, shop.ana.user_id).await.unwrap();
    orders.release(item.order_id, &shop.ana).await.unwrap();
    assert_eq!(shop.stock(widget).await, 5);
    assert!(orders.get(item.order_id).await.unwrap().is_none());

    assert_eq!(
        orders.release(item.order_id, &shop.ana).await,
        Err(OrderError::OrderNotFound(item.order_id.to_string()))
    );
    assert_eq!(shop.stock(widget).await, 5);

    shop.close().await;
}

#[tokio::test]
async fn test_concurrent_reserves_for_last_unit() {
    let shop = shop().await;
    let widget = shop.product("Widget", dec!(1), 1).await;

    let mut handles = vec![];
    for owner in [shop.ana.user_id, shop.bob.user_id] {
        let orders = shop.system.order_client.clone();
        handles.push(tokio::spawn(async move { orders.reserve(widget, 1, owner).await }));
    }

    let mut successful = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successful += 1,
            Err(e) => assert!(matches!(e, OrderError::InsufficientStock { available: 0, .. })),
        }
    }

    assert_eq!(successful, 1, "Exactly one reservation may win");
    assert_eq!(shop.stock(widget).await, 0);

    shop.close().await;
}

#[tokio::test]
async fn test_many_concurrent_orders_never_oversell() {
    let shop = shop().await;
    let widget = shop.product("Widget", dec!(1), 20).await;

    let mut handles = vec![];
    for i in 0..15 {
        let orders = shop.system.order_client.clone();
        let owner = if i % 2 == 0 { shop.ana } else { shop.bob };
        handles.push(tokio::spawn(async move {
            orders.place_order(&owner, None, widget, 2).await
        }));
    }

    let mut successful = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successful += 1;
        }
    }

    assert_eq!(successful, 10);
    assert_eq!(shop.stock(widget).await, 0);

    shop.close().await;
}

#[tokio::test]
async fn test_reserved_product_cannot_be_deleted() {
    let shop = shop().await;
    let widget = shop.product("Widget", dec!(1), 5).await;
    let products = &shop.system.product_client;

    let item = shop
        .system
        .order_client
        .reserve(widget, 1, shop.ana.user_id)
        .await
        .unwrap();
    assert!(matches!(
        products.delete_product(&shop.admin, widget).await,
        Err(pedidos::product_actor::ProductError::InUse { reserved: 1, .. })
    ));

    shop.system.order_client.release(item.order_id, &shop.ana).await.unwrap();
    products.delete_product(&shop.admin, widget).await.unwrap();
    assert!(products.get(widget).await.unwrap().is_none());

    shop.close().await;
}

#[tokio::test]
async fn test_oversized_amount_moves_no_stock() {
    let shop = shop().await;
    let price = Decimal::from_i128_with_scale(10_i128.pow(20), 0);
    let gold = shop.product("Lingote", price, 1_000_000_000).await;
    let widget = shop.product("Widget", dec!(1), 5).await;
    let orders = &shop.system.order_client;

    assert_eq!(
        orders.reserve(gold, 1_000_000_000, shop.ana.user_id).await,
        Err(OrderError::AmountOverflow {
            requested: 1_000_000_000
        })
    );
    assert_eq!(shop.stock(gold).await, 1_000_000_000);
    assert!(orders.list().await.unwrap().is_empty());

    // Same limit when revising into the expensive product.
    let item = orders.reserve(widget, 2, shop.ana.user_id).await.unwrap();
    assert!(matches!(
        orders.revise(item.order_id, gold, 1_000_000_000, &shop.ana).await,
        Err(OrderError::AmountOverflow { .. })
    ));
    assert_eq!(shop.stock(widget).await, 3);
    assert_eq!(shop.stock(gold).await, 1_000_000_000);
    assert_eq!(orders.details(&shop.ana, item.order_id).await.unwrap().item, item);

    shop.close().await;
}

#[tokio::test]
async fn test_stock_cannot_be_raised_past_reserved_units() {
    let shop = shop().await;
    let widget = shop.product("Widget", dec!(1), 5).await;
    let products = &shop.system.product_client;
    let orders = &shop.system.order_client;

    let item = orders.reserve(widget, 1, shop.ana.user_id).await.unwrap();
    let raise = products
        .update_product(
            &shop.admin,
            widget,
            pedidos::model::ProductUpdate {
                stock: Some(u32::MAX),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        raise,
        Err(pedidos::product_actor::ProductError::Validation(_))
    ));

    orders.release(item.order_id, &shop.ana).await.unwrap();
    assert_eq!(shop.stock(widget).await, 5);

    shop.close().await;
}
