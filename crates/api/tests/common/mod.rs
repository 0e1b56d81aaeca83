//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tower::ServiceExt;

use storefront_api::cache::ViewCache;
use storefront_api::config::ServerConfig;
use storefront_api::router::build_app_router;
use storefront_api::state::AppState;
use storefront_api::ws::WsManager;
use storefront_core::stock::StockPolicy;
use storefront_core::types::DbId;
use storefront_db::models::product::CreateProduct;
use storefront_db::models::tenant::CreateTenant;
use storefront_db::models::user::CreateUser;
use storefront_db::repositories::{ProductRepo, TenantRepo, UserRepo};
use storefront_events::{EventBus, ThemeChannel};

/// Origin of the admin dashboard in tests; allowed for CORS and theme sockets.
pub const ADMIN_ORIGIN: &str = "http://localhost:5173";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![ADMIN_ORIGIN.to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        theme_allowed_origins: vec![ADMIN_ORIGIN.to_string()],
        stock_policy: StockPolicy::AllowNegative,
        tracking_timeout_ms: 800,
        low_stock_threshold: 5,
        view_cache_ttl_secs: 60,
    }
}

/// Build the shared state the same way `main.rs` does.
pub fn build_test_state(pool: PgPool) -> AppState {
    let config = test_config();
    AppState {
        pool,
        ws_manager: Arc::new(WsManager::new()),
        event_bus: Arc::new(EventBus::default()),
        theme_channel: Arc::new(ThemeChannel::new(&config.theme_allowed_origins)),
        view_cache: Arc::new(ViewCache::new(Duration::from_secs(config.view_cache_ttl_secs))),
        config: Arc::new(config),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = build_test_state(pool);
    let config = test_config();
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, tenant_id: Option<DbId>) -> axum::http::request::Builder {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(tenant_id) = tenant_id {
        builder = builder.header("x-tenant-id", tenant_id.to_string());
    }
    builder
}

fn with_json(builder: axum::http::request::Builder, body: serde_json::Value) -> Request<Body> {
    builder
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

/// GET without a tenant header.
pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

/// GET as a tenant.
pub async fn get_as(app: Router, tenant_id: DbId, uri: &str) -> Response {
    send(
        app,
        request(Method::GET, uri, Some(tenant_id))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// GET with one arbitrary header.
pub async fn get_with_header(app: Router, uri: &str, name: &str, value: &str) -> Response {
    send(
        app,
        request(Method::GET, uri, None)
            .header(name, value)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// POST JSON without a tenant header.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, with_json(request(Method::POST, uri, None), body)).await
}

/// POST JSON as a tenant.
pub async fn post_json_as(
    app: Router,
    tenant_id: DbId,
    uri: &str,
    body: serde_json::Value,
) -> Response {
    send(app, with_json(request(Method::POST, uri, Some(tenant_id)), body)).await
}

/// PUT JSON as a tenant.
pub async fn put_json_as(
    app: Router,
    tenant_id: DbId,
    uri: &str,
    body: serde_json::Value,
) -> Response {
    send(app, with_json(request(Method::PUT, uri, Some(tenant_id)), body)).await
}

/// PATCH JSON as a tenant.
pub async fn patch_json_as(
    app: Router,
    tenant_id: DbId,
    uri: &str,
    body: serde_json::Value,
) -> Response {
    send(app, with_json(request(Method::PATCH, uri, Some(tenant_id)), body)).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

pub async fn seed_tenant(pool: &PgPool, slug: &str) -> DbId {
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

pub async fn seed_seller(pool: &PgPool, tenant_id: DbId, name: &str) -> DbId {
    UserRepo::create(
        pool,
        tenant_id,
        &CreateUser {
            name: name.to_string(),
            role: None,
        },
    )
    .await
    .unwrap()
    .id
}

/// `price` in cents.
pub async fn seed_product(
    pool: &PgPool,
    tenant_id: DbId,
    name: &str,
    price_cents: i64,
    stock: i32,
) -> DbId {
    ProductRepo::create(
        pool,
        tenant_id,
        &CreateProduct {
            name: name.to_string(),
            price: Decimal::new(price_cents, 2),
            stock_quantity: Some(stock),
            is_available: Some(true),
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn stock_of(pool: &PgPool, product_id: DbId) -> i32 {
    sqlx::query_scalar("SELECT stock_quantity FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
