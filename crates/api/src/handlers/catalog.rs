//! Public catalog endpoints, addressed by store slug.
//!
//! Reads are served through the view cache. Tracking is best-effort: it is
//! time-boxed, every failure is logged and swallowed, and the answer is
//! always 202.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;
use storefront_core::theme::css::render_stylesheet;
use storefront_core::theme::ThemeConfig;
use storefront_core::tracking::{validate_track_request, TrackRequest};
use storefront_core::types::DbId;
use storefront_db::models::tenant::Tenant;
use storefront_db::repositories::{CatalogEventRepo, ProductRepo, StoreThemeRepo, TenantRepo};

use crate::cache::{cached_response, data_body, ViewKey};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

const TEXT_CSS: &str = "text/css; charset=utf-8";

/// GET /catalog/{slug}/theme
///
/// The store's theme merged over the defaults. Invalid stored fields fall
/// back to their defaults.
pub async fn get_catalog_theme(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let tenant_id = tenant_by_slug(&state, &slug).await?.id;
    let pool = state.pool.clone();

    let body = state
        .view_cache
        .get_or_load(tenant_id, ViewKey::CatalogTheme, || async move {
            data_body(load_merged_theme(&pool, tenant_id).await?)
        })
        .await?;

    Ok(cached_response("application/json", body))
}

/// GET /catalog/{slug}/theme.css
///
/// Font imports and `:root` custom properties derived from the theme.
pub async fn get_catalog_stylesheet(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let tenant_id = tenant_by_slug(&state, &slug).await?.id;
    let pool = state.pool.clone();

    let body = state
        .view_cache
        .get_or_load(tenant_id, ViewKey::CatalogStylesheet, || async move {
            let config = load_merged_theme(&pool, tenant_id).await?;
            AppResult::Ok(Bytes::from(render_stylesheet(&config)))
        })
        .await?;

    Ok(cached_response(TEXT_CSS, body))
}

/// GET /catalog/{slug}/products
///
/// Products currently offered by the store.
pub async fn list_catalog_products(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let tenant_id = tenant_by_slug(&state, &slug).await?.id;
    let pool = state.pool.clone();

    let body = state
        .view_cache
        .get_or_load(tenant_id, ViewKey::CatalogProducts, || async move {
            data_body(ProductRepo::list_available(&pool, tenant_id).await?)
        })
        .await?;

    Ok(cached_response("application/json", body))
}

/// POST /catalog/{slug}/track
///
/// Record a `product_view` or `whatsapp_click`. Always 202.
pub async fn track_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    payload: Result<Json<TrackRequest>, JsonRejection>,
) -> StatusCode {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(slug = %slug, error = %rejection.body_text(), "Tracking payload rejected");
            return StatusCode::ACCEPTED;
        }
    };

    let timeout = state.config.tracking_timeout();
    match tokio::time::timeout(timeout, record_event(&state, &slug, &request)).await {
        Ok(Ok(event_id)) => {
            tracing::debug!(
                slug = %slug,
                event_id,
                event = request.event.as_str(),
                "Catalog event recorded",
            );
        }
        Ok(Err(e)) => {
            tracing::warn!(
                slug = %slug,
                event = request.event.as_str(),
                error = %e,
                "Catalog event dropped",
            );
        }
        Err(_) => {
            tracing::warn!(
                slug = %slug,
                event = request.event.as_str(),
                timeout_ms = timeout.as_millis() as u64,
                "Catalog event timed out",
            );
        }
    }

    StatusCode::ACCEPTED
}

async fn record_event(state: &AppState, slug: &str, request: &TrackRequest) -> AppResult<DbId> {
    validate_track_request(request)?;
    let tenant = tenant_by_slug(state, slug).await?;
    let id = CatalogEventRepo::insert(
        &state.pool,
        tenant.id,
        request.event,
        request.product_id,
        request.metadata.as_ref(),
    )
    .await?;
    Ok(id)
}

async fn tenant_by_slug(state: &AppState, slug: &str) -> AppResult<Tenant> {
    TenantRepo::find_by_slug(&state.pool, slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Store '{slug}' not found")))
}

async fn load_merged_theme(pool: &sqlx::PgPool, tenant_id: DbId) -> AppResult<ThemeConfig> {
    let stored = StoreThemeRepo::find(pool, tenant_id).await?;
    let merged = ThemeConfig::merge(stored.as_ref().map_or(&Value::Null, |t| &t.config));
    if !merged.issues.is_empty() {
        tracing::warn!(
            tenant_id,
            issues = merged.issues.len(),
            "Stored theme fields replaced by defaults",
        );
    }
    Ok(merged.config)
}
