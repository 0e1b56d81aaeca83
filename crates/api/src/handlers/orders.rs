//! Handlers for orders: the order transaction, the recent orders read model,
//! and status changes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use storefront_core::error::CoreError;
use storefront_core::event_types;
use storefront_core::order::{
    validate_new_order, validate_status_transition, NewOrder, OrderStatus, ORDER_FAILED_MESSAGE,
};
use storefront_core::pagination::{clamp_limit, DEFAULT_RECENT_ORDERS, MAX_PAGE_SIZE};
use storefront_core::product::is_low_stock;
use storefront_core::types::DbId;
use storefront_db::models::order::UpdateOrderStatus;
use storefront_db::repositories::OrderRepo;
use storefront_events::PlatformEvent;

use crate::cache::{cached_response, data_body, ViewKey};
use crate::error::{client_message, AppError, AppResult};
use crate::middleware::tenant::TenantId;
use crate::query::LimitParams;
use crate::response::{DataResponse, OrderResult};
use crate::state::AppState;

/// POST /api/v1/orders
///
/// Create an order, its line items and the stock decrements in one
/// transaction. Answers `{ success, orderId?, error? }`:
///
/// - 201 with the new order id on success,
/// - 400 when the request is rejected before any database access,
/// - 500 with a generic message when the transaction fails and rolls back.
pub async fn create_order(
    State(state): State<AppState>,
    tenant: Option<TenantId>,
    payload: Result<Json<NewOrder>, JsonRejection>,
) -> impl IntoResponse {
    let order = match payload {
        Ok(Json(order)) => order,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(OrderResult::failed(rejection.body_text())),
            );
        }
    };

    let tenant_id = match validate_new_order(tenant.map(|TenantId(id)| id), &order) {
        Ok(tenant_id) => tenant_id,
        Err(e) => {
            tracing::debug!(error = %e, "Order rejected");
            return (
                StatusCode::BAD_REQUEST,
                Json(OrderResult::failed(client_message(&e))),
            );
        }
    };

    let created = match OrderRepo::create_with_items(
        &state.pool,
        tenant_id,
        &order,
        state.config.stock_policy,
    )
    .await
    {
        Ok(created) => created,
        Err(e) => {
            tracing::error!(
                tenant_id,
                seller_id = order.seller_id,
                item_count = order.items.len(),
                error = %e,
                "Order transaction failed, rolled back",
            );
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(OrderResult::failed(ORDER_FAILED_MESSAGE)),
            );
        }
    };

    for level in &created.stock_levels {
        if is_low_stock(level.stock_quantity, state.config.low_stock_threshold) {
            tracing::warn!(
                tenant_id,
                product_id = level.product_id,
                stock_quantity = level.stock_quantity,
                "Product low on stock",
            );
        }
    }

    tracing::info!(
        order_id = created.id,
        tenant_id,
        seller_id = order.seller_id,
        item_count = order.items.len(),
        total = %created.total,
        "Order created",
    );

    state.publish(
        PlatformEvent::new(event_types::ORDER_CREATED)
            .with_tenant(tenant_id)
            .with_source("order", created.id)
            .with_payload(json!({
                "sellerId": order.seller_id,
                "itemCount": order.items.len(),
                "total": created.total,
                "stockLevels": created.stock_levels,
            })),
    );

    (StatusCode::CREATED, Json(OrderResult::created(created.id)))
}

/// GET /api/v1/orders/recent?limit=N
///
/// The tenant's most recent orders, newest first, each with seller name,
/// items, item count and total. `limit` defaults to 10, clamped to 1..=100.
pub async fn list_recent_orders(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_RECENT_ORDERS, MAX_PAGE_SIZE);
    let pool = state.pool.clone();

    let body = state
        .view_cache
        .get_or_load(tenant_id, ViewKey::RecentOrders { limit }, || async move {
            data_body(OrderRepo::list_recent(&pool, tenant_id, limit).await?)
        })
        .await?;

    Ok(cached_response("application/json", body))
}

/// GET /api/v1/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Path(order_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = OrderRepo::find_with_items(&state.pool, tenant_id, order_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id: order_id,
        }))?;

    Ok(Json(DataResponse { data: order }))
}

/// PATCH /api/v1/orders/{id}/status
///
/// Complete or cancel a pending order. Any other transition, or a status
/// changed by a concurrent request, is a 409.
pub async fn update_order_status(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Path(order_id): Path<DbId>,
    Json(input): Json<UpdateOrderStatus>,
) -> AppResult<impl IntoResponse> {
    let existing = OrderRepo::find_by_id(&state.pool, tenant_id, order_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id: order_id,
        }))?;

    let current: OrderStatus = existing.status.parse()?;
    validate_status_transition(current, input.status)?;

    let updated = OrderRepo::update_status(&state.pool, tenant_id, order_id, current, input.status)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Order status was changed by another request".into(),
            ))
        })?;

    tracing::info!(
        order_id,
        tenant_id,
        from = %current,
        to = %input.status,
        "Order status changed",
    );

    state.publish(
        PlatformEvent::new(event_types::ORDER_STATUS_CHANGED)
            .with_tenant(tenant_id)
            .with_source("order", order_id)
            .with_payload(json!({ "from": current, "to": input.status })),
    );

    Ok(Json(DataResponse { data: updated }))
}
