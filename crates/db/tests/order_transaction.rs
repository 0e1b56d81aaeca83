//! Integration tests for the order transaction and the recent-orders read
//! model.
//!
//! - Commit: one order, N line items, stock decremented per item
//! - Rollback: a missing or foreign product leaves no trace
//! - Stock policy: allow-negative vs clamp-at-zero
//! - Read model ordering, item count and totals

use assert_matches::assert_matches;
use rust_decimal::Decimal;
use sqlx::PgPool;
use storefront_core::order::{NewOrder, OrderLineInput, OrderStatus};
use storefront_core::stock::StockPolicy;
use storefront_db::models::product::CreateProduct;
use storefront_db::models::tenant::CreateTenant;
use storefront_db::models::user::CreateUser;
use storefront_db::repositories::{OrderRepo, ProductRepo, TenantRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    tenant_id: i64,
    seller_id: i64,
    p1: i64,
    p2: i64,
}

async fn seed_tenant(pool: &PgPool, slug: &str) -> i64 {
    TenantRepo::create(
        pool,
        &CreateTenant {
            name: format!("Store {slug}"),
            slug: slug.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_product(pool: &PgPool, tenant_id: i64, name: &str, price: Decimal, stock: i32) -> i64 {
    ProductRepo::create(
        pool,
        tenant_id,
        &CreateProduct {
            name: name.to_string(),
            price,
            stock_quantity: Some(stock),
            is_available: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed(pool: &PgPool) -> Fixture {
    let tenant_id = seed_tenant(pool, "acme").await;
    let seller_id = UserRepo::create(
        pool,
        tenant_id,
        &CreateUser {
            name: "Bea".to_string(),
            role: None,
        },
    )
    .await
    .unwrap()
    .id;
    let p1 = seed_product(pool, tenant_id, "Espresso", Decimal::new(1000, 2), 10).await;
    let p2 = seed_product(pool, tenant_id, "Croissant", Decimal::new(2500, 2), 5).await;
    Fixture {
        tenant_id,
        seller_id,
        p1,
        p2,
    }
}

fn line(product_id: i64, quantity: i32, unit_price: Option<Decimal>) -> OrderLineInput {
    OrderLineInput {
        product_id,
        quantity,
        unit_price,
    }
}

fn new_order(seller_id: i64, items: Vec<OrderLineInput>) -> NewOrder {
    NewOrder {
        customer_name: "Carla".to_string(),
        customer_phone: "555-0101".to_string(),
        seller_id,
        items,
    }
}

async fn stock_of(pool: &PgPool, tenant_id: i64, product_id: i64) -> i32 {
    ProductRepo::find_by_id(pool, tenant_id, product_id)
        .await
        .unwrap()
        .unwrap()
        .stock_quantity
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Test: commit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_order_commits_items_and_decrements_stock(pool: PgPool) {
    let f = seed(&pool).await;
    let order = new_order(
        f.seller_id,
        vec![
            line(f.p1, 2, Some(Decimal::new(1000, 2))),
            line(f.p2, 1, Some(Decimal::new(2500, 2))),
        ],
    );

    let created = OrderRepo::create_with_items(&pool, f.tenant_id, &order, StockPolicy::default())
        .await
        .unwrap();

    assert_eq!(created.total.to_string(), "45.00");
    assert_eq!(count(&pool, "orders").await, 1);
    assert_eq!(count(&pool, "order_items").await, 2);
    assert_eq!(stock_of(&pool, f.tenant_id, f.p1).await, 8);
    assert_eq!(stock_of(&pool, f.tenant_id, f.p2).await, 4);
    assert_eq!(created.stock_levels.len(), 2);
    assert_eq!(created.stock_levels[0].stock_quantity, 8);

    let stored = OrderRepo::find_by_id(&pool, f.tenant_id, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, OrderStatus::Pending.as_str());
    assert_eq!(stored.seller_id, f.seller_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_unit_price_defaults_to_product_price(pool: PgPool) {
    let f = seed(&pool).await;
    let order = new_order(f.seller_id, vec![line(f.p2, 2, None)]);

    let created = OrderRepo::create_with_items(&pool, f.tenant_id, &order, StockPolicy::default())
        .await
        .unwrap();

    let detail = OrderRepo::find_with_items(&pool, f.tenant_id, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.items[0].unit_price, Decimal::new(2500, 2));
    assert_eq!(detail.total, Decimal::new(5000, 2));
}

// ---------------------------------------------------------------------------
// Test: rollback
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_product_rolls_back_everything(pool: PgPool) {
    let f = seed(&pool).await;
    let order = new_order(f.seller_id, vec![line(f.p1, 2, None), line(999_999, 1, None)]);

    let result =
        OrderRepo::create_with_items(&pool, f.tenant_id, &order, StockPolicy::default()).await;

    assert_matches!(result, Err(sqlx::Error::RowNotFound));
    assert_eq!(count(&pool, "orders").await, 0);
    assert_eq!(count(&pool, "order_items").await, 0);
    assert_eq!(stock_of(&pool, f.tenant_id, f.p1).await, 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_product_of_other_tenant_rolls_back(pool: PgPool) {
    let f = seed(&pool).await;
    let other = seed_tenant(&pool, "other").await;
    let foreign = seed_product(&pool, other, "Foreign", Decimal::ONE, 3).await;

    let order = new_order(f.seller_id, vec![line(f.p1, 1, None), line(foreign, 1, None)]);
    let result =
        OrderRepo::create_with_items(&pool, f.tenant_id, &order, StockPolicy::default()).await;

    assert!(result.is_err());
    assert_eq!(count(&pool, "orders").await, 0);
    assert_eq!(stock_of(&pool, f.tenant_id, f.p1).await, 10);
    assert_eq!(stock_of(&pool, other, foreign).await, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seller_of_other_tenant_is_rejected(pool: PgPool) {
    let f = seed(&pool).await;
    let other = seed_tenant(&pool, "other").await;
    let outsider = UserRepo::create(
        &pool,
        other,
        &CreateUser {
            name: "Zed".to_string(),
            role: Some("attendant".to_string()),
        },
    )
    .await
    .unwrap();

    let order = new_order(outsider.id, vec![line(f.p1, 1, None)]);
    let result =
        OrderRepo::create_with_items(&pool, f.tenant_id, &order, StockPolicy::default()).await;

    assert_matches!(result, Err(sqlx::Error::RowNotFound));
    assert_eq!(stock_of(&pool, f.tenant_id, f.p1).await, 10);
}

// ---------------------------------------------------------------------------
// Test: stock policy
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_allow_negative_policy_goes_below_zero(pool: PgPool) {
    let f = seed(&pool).await;
    let order = new_order(f.seller_id, vec![line(f.p2, 7, None)]);

    OrderRepo::create_with_items(&pool, f.tenant_id, &order, StockPolicy::AllowNegative)
        .await
        .unwrap();

    assert_eq!(stock_of(&pool, f.tenant_id, f.p2).await, -2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clamp_policy_floors_at_zero(pool: PgPool) {
    let f = seed(&pool).await;
    let order = new_order(f.seller_id, vec![line(f.p2, 7, None)]);

    let created = OrderRepo::create_with_items(&pool, f.tenant_id, &order, StockPolicy::ClampAtZero)
        .await
        .unwrap();

    assert_eq!(stock_of(&pool, f.tenant_id, f.p2).await, 0);
    assert_eq!(created.stock_levels[0].stock_quantity, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sql_decrement_matches_policy_apply(pool: PgPool) {
    let f = seed(&pool).await;

    for policy in [StockPolicy::AllowNegative, StockPolicy::ClampAtZero] {
        for (stock, quantity) in [(5, 3), (5, 5), (5, 7), (0, 2)] {
            let name = format!("{policy} {stock}-{quantity}");
            let product = seed_product(&pool, f.tenant_id, &name, Decimal::new(100, 2), stock).await;
            let order = new_order(f.seller_id, vec![line(product, quantity, None)]);

            let created = OrderRepo::create_with_items(&pool, f.tenant_id, &order, policy)
                .await
                .unwrap();

            let expected = policy.apply(stock, quantity);
            assert_eq!(stock_of(&pool, f.tenant_id, product).await, expected, "{name}");
            assert_eq!(created.stock_levels[0].stock_quantity, expected, "{name}");
        }
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_orders_on_one_product_are_serialized(pool: PgPool) {
    let f = seed(&pool).await;

    let mut handles = Vec::new();
    for _ in 0..5 {
        let pool = pool.clone();
        let order = new_order(f.seller_id, vec![line(f.p1, 1, None)]);
        let tenant_id = f.tenant_id;
        handles.push(tokio::spawn(async move {
            OrderRepo::create_with_items(&pool, tenant_id, &order, StockPolicy::default()).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(stock_of(&pool, f.tenant_id, f.p1).await, 5);
    assert_eq!(count(&pool, "orders").await, 5);
}

// ---------------------------------------------------------------------------
// Test: read model
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_recent_is_newest_first_with_counts(pool: PgPool) {
    let f = seed(&pool).await;

    let first = OrderRepo::create_with_items(
        &pool,
        f.tenant_id,
        &new_order(f.seller_id, vec![line(f.p1, 1, None)]),
        StockPolicy::default(),
    )
    .await
    .unwrap();
    let second = OrderRepo::create_with_items(
        &pool,
        f.tenant_id,
        &new_order(f.seller_id, vec![line(f.p1, 2, None), line(f.p2, 1, None)]),
        StockPolicy::default(),
    )
    .await
    .unwrap();

    let recent = OrderRepo::list_recent(&pool, f.tenant_id, 10).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, second.id);
    assert_eq!(recent[1].id, first.id);

    assert_eq!(recent[0].seller_name, "Bea");
    assert_eq!(recent[0].item_count, 2);
    assert_eq!(recent[0].items[0].product_name, "Espresso");
    assert_eq!(recent[0].items[1].product_name, "Croissant");
    assert_eq!(recent[0].total, Decimal::new(4500, 2));

    let limited = OrderRepo::list_recent(&pool, f.tenant_id, 1).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, second.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_recent_is_tenant_scoped(pool: PgPool) {
    let f = seed(&pool).await;
    let other = seed_tenant(&pool, "other").await;

    OrderRepo::create_with_items(
        &pool,
        f.tenant_id,
        &new_order(f.seller_id, vec![line(f.p1, 1, None)]),
        StockPolicy::default(),
    )
    .await
    .unwrap();

    assert!(OrderRepo::list_recent(&pool, other, 10).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_status_requires_expected_current(pool: PgPool) {
    let f = seed(&pool).await;
    let created = OrderRepo::create_with_items(
        &pool,
        f.tenant_id,
        &new_order(f.seller_id, vec![line(f.p1, 1, None)]),
        StockPolicy::default(),
    )
    .await
    .unwrap();

    let done = OrderRepo::update_status(
        &pool,
        f.tenant_id,
        created.id,
        OrderStatus::Pending,
        OrderStatus::Completed,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(done.status, "completed");

    let stale = OrderRepo::update_status(
        &pool,
        f.tenant_id,
        created.id,
        OrderStatus::Pending,
        OrderStatus::Cancelled,
    )
    .await
    .unwrap();
    assert!(stale.is_none());
}
