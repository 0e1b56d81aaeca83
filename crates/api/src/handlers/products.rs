//! Handlers for the admin product list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use storefront_core::error::CoreError;
use storefront_core::event_types;
use storefront_core::product::{validate_price, validate_product_name};
use storefront_core::types::DbId;
use storefront_db::models::product::{CreateProduct, Product, UpdateProduct};
use storefront_db::repositories::ProductRepo;
use storefront_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::tenant::TenantId;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/products
pub async fn list_products(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
) -> AppResult<impl IntoResponse> {
    let products = ProductRepo::list(&state.pool, tenant_id).await?;
    Ok(Json(DataResponse { data: products }))
}

/// POST /api/v1/products
pub async fn create_product(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Json(input): Json<CreateProduct>,
) -> AppResult<impl IntoResponse> {
    validate_product_name(&input.name)?;
    validate_price(input.price)?;

    let product = ProductRepo::create(&state.pool, tenant_id, &input).await?;

    tracing::info!(
        product_id = product.id,
        tenant_id,
        name = %product.name,
        "Product created",
    );
    publish_product_updated(&state, &product);

    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// PUT /api/v1/products/{id}
///
/// Partial edit; absent fields are left unchanged.
pub async fn update_product(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Path(product_id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_product_name(name)?;
    }
    if let Some(price) = input.price {
        validate_price(price)?;
    }

    let product = ProductRepo::update(&state.pool, tenant_id, product_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }))?;

    tracing::info!(product_id, tenant_id, "Product updated");
    publish_product_updated(&state, &product);

    Ok(Json(DataResponse { data: product }))
}

fn publish_product_updated(state: &AppState, product: &Product) {
    state.publish(
        PlatformEvent::new(event_types::PRODUCT_UPDATED)
            .with_tenant(product.tenant_id)
            .with_source("product", product.id)
            .with_payload(json!({
                "price": product.price,
                "stockQuantity": product.stock_quantity,
                "isAvailable": product.is_available,
            })),
    );
}
