//! Integration tests for the admin product endpoints and dashboard metrics.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_as, post_json_as, put_json_as, seed_product, seed_seller, seed_tenant};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: create and list products
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_product_returns_201(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let app = common::build_test_app(pool);

    let response = post_json_as(
        app.clone(),
        tenant,
        "/api/v1/products",
        json!({"name": "  Cold brew ", "price": "12.50", "stockQuantity": 4}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Cold brew");
    assert_eq!(json["data"]["price"], "12.50");
    assert_eq!(json["data"]["stockQuantity"], 4);
    assert_eq!(json["data"]["isAvailable"], true);

    let list = body_json(get_as(app, tenant, "/api/v1/products").await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_product_fields_are_400(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let app = common::build_test_app(pool);

    let blank = post_json_as(
        app.clone(),
        tenant,
        "/api/v1/products",
        json!({"name": "  ", "price": "1.00"}),
    )
    .await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(blank).await["code"], "VALIDATION_ERROR");

    let negative = post_json_as(
        app,
        tenant,
        "/api/v1/products",
        json!({"name": "Tea", "price": "-1.00"}),
    )
    .await;
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: partial update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_product_changes_only_given_fields(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let product = seed_product(&pool, tenant, "Coffee", 1000, 10).await;
    let app = common::build_test_app(pool);

    let response = put_json_as(
        app,
        tenant,
        &format!("/api/v1/products/{product}"),
        json!({"isAvailable": false}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Coffee");
    assert_eq!(json["data"]["price"], "10.00");
    assert_eq!(json["data"]["isAvailable"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_product_of_another_tenant_is_404(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let other = seed_tenant(&pool, "other").await;
    let product = seed_product(&pool, tenant, "Coffee", 1000, 10).await;
    let app = common::build_test_app(pool);

    let response = put_json_as(
        app,
        other,
        &format!("/api/v1/products/{product}"),
        json!({"stockQuantity": 0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: dashboard metrics follow orders and product edits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_metrics_reflect_new_orders(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let seller = seed_seller(&pool, tenant, "Bia").await;
    let coffee = seed_product(&pool, tenant, "Coffee", 1000, 10).await;
    let app = common::build_test_app(pool);

    let before = body_json(get_as(app.clone(), tenant, "/api/v1/dashboard/metrics").await).await;
    assert_eq!(before["data"]["orderCount"], 0);
    assert_eq!(before["data"]["lowStockProducts"], 0);

    let response = post_json_as(
        app.clone(),
        tenant,
        "/api/v1/orders",
        json!({
            "customerName": "Ana",
            "sellerId": seller,
            "items": [{"productId": coffee, "quantity": 6}]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let after = body_json(get_as(app, tenant, "/api/v1/dashboard/metrics").await).await;
    assert_eq!(after["data"]["orderCount"], 1);
    assert_eq!(after["data"]["pendingOrders"], 1);
    assert_eq!(after["data"]["revenue"], "60.00");
    assert_eq!(after["data"]["lowStockProducts"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_edit_refreshes_low_stock_count(pool: PgPool) {
    let tenant = seed_tenant(&pool, "acme").await;
    let coffee = seed_product(&pool, tenant, "Coffee", 1000, 10).await;
    let app = common::build_test_app(pool);

    let before = body_json(get_as(app.clone(), tenant, "/api/v1/dashboard/metrics").await).await;
    assert_eq!(before["data"]["lowStockProducts"], 0);

    let response = put_json_as(
        app.clone(),
        tenant,
        &format!("/api/v1/products/{coffee}"),
        json!({"stockQuantity": 2}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let after = body_json(get_as(app, tenant, "/api/v1/dashboard/metrics").await).await;
    assert_eq!(after["data"]["lowStockProducts"], 1);
}
