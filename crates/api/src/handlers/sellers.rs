//! Handlers for the store's sellers and attendants.
//!
//! The order form picks its `sellerId` from this list.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use storefront_core::user::{validate_user_name, validate_user_role};
use storefront_db::models::user::CreateUser;
use storefront_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::tenant::TenantId;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/sellers
pub async fn list_sellers(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list_by_tenant(&state.pool, tenant_id).await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/v1/sellers
///
/// `role` defaults to `seller`.
pub async fn create_seller(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    validate_user_name(&input.name)?;
    if let Some(role) = &input.role {
        validate_user_role(role)?;
    }

    let user = UserRepo::create(&state.pool, tenant_id, &input).await?;
    tracing::info!(user_id = user.id, tenant_id, role = %user.role, "Seller created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}
