use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Query, State};
use axum::http::header::ORIGIN;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use storefront_core::error::CoreError;
use storefront_core::types::DbId;
use storefront_db::repositories::TenantRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::tenant::TenantId;
use crate::query::TenantParams;
use crate::state::AppState;
use crate::ws::{editor, preview};

/// GET /api/v1/ws/theme/editor
///
/// Upgrade to an editor session. Refused with 403 unless the `Origin` header
/// is on the theme allow-list.
pub async fn theme_editor_ws(
    State(state): State<AppState>,
    headers: HeaderMap,
    tenant: Option<TenantId>,
    Query(params): Query<TenantParams>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> AppResult<Response> {
    let origin = authorize_origin(&state, &headers)?;
    let tenant_id = resolve_tenant(&state, tenant, params).await?;

    Ok(match ws {
        Ok(ws) => ws
            .on_upgrade(move |socket| editor::run(socket, state, tenant_id, origin))
            .into_response(),
        Err(rejection) => rejection.into_response(),
    })
}

/// GET /api/v1/ws/theme/preview
///
/// Upgrade to a preview session. Same origin and tenant rules as the editor.
pub async fn theme_preview_ws(
    State(state): State<AppState>,
    headers: HeaderMap,
    tenant: Option<TenantId>,
    Query(params): Query<TenantParams>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> AppResult<Response> {
    authorize_origin(&state, &headers)?;
    let tenant_id = resolve_tenant(&state, tenant, params).await?;

    Ok(match ws {
        Ok(ws) => ws
            .on_upgrade(move |socket| preview::run(socket, state, tenant_id))
            .into_response(),
        Err(rejection) => rejection.into_response(),
    })
}

/// Check the `Origin` header against the theme channel's allow-list.
fn authorize_origin(state: &AppState, headers: &HeaderMap) -> AppResult<String> {
    let origin = headers.get(ORIGIN).and_then(|v| v.to_str().ok());
    if let Err(e) = state.theme_channel.check_origin(origin) {
        tracing::warn!(origin = origin.unwrap_or("<none>"), error = %e, "Theme socket refused");
        return Err(e.into());
    }
    Ok(origin.unwrap_or_default().to_string())
}

/// Tenant from the `x-tenant-id` header, else `?tenant_id=`; it must exist.
async fn resolve_tenant(
    state: &AppState,
    header: Option<TenantId>,
    params: TenantParams,
) -> AppResult<DbId> {
    let tenant_id = header
        .map(|TenantId(id)| id)
        .or(params.tenant_id)
        .ok_or_else(|| AppError::Core(CoreError::Validation("Tenant id is required".into())))?;

    TenantRepo::find_by_id(&state.pool, tenant_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tenant",
            id: tenant_id,
        }))?;
    Ok(tenant_id)
}
