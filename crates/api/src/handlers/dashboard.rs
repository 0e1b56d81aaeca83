//! Handlers for the admin dashboard: aggregate metrics and activity feeds.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use storefront_core::pagination::{clamp_limit, DEFAULT_ACTIVITY_LIMIT, MAX_PAGE_SIZE};
use storefront_db::repositories::{CatalogEventRepo, DashboardRepo, EventRepo};

use crate::cache::{cached_response, data_body, ViewKey};
use crate::error::AppResult;
use crate::middleware::tenant::TenantId;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/metrics
///
/// Order count, pending orders, revenue, low-stock products and catalog
/// engagement for the tenant, served through the view cache.
pub async fn get_metrics(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
) -> AppResult<impl IntoResponse> {
    let pool = state.pool.clone();
    let threshold = state.config.low_stock_threshold;

    let body = state
        .view_cache
        .get_or_load(tenant_id, ViewKey::DashboardMetrics, || async move {
            data_body(DashboardRepo::metrics(&pool, tenant_id, threshold).await?)
        })
        .await?;

    Ok(cached_response("application/json", body))
}

/// GET /api/v1/dashboard/catalog-activity?limit=N
///
/// Latest product views and WhatsApp clicks, newest first.
pub async fn list_catalog_activity(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_ACTIVITY_LIMIT, MAX_PAGE_SIZE);
    let events = CatalogEventRepo::list_recent(&state.pool, tenant_id, limit).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/dashboard/events?limit=N
///
/// Latest persisted domain events (orders, product edits, theme saves).
pub async fn list_platform_events(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_ACTIVITY_LIMIT, MAX_PAGE_SIZE);
    let events = EventRepo::list_recent(&state.pool, tenant_id, limit).await?;
    Ok(Json(DataResponse { data: events }))
}
