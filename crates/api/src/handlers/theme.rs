//! Handlers for the tenant's stored theme document.
//!
//! The live editor/preview sync runs over WebSocket (see `crate::ws`); these
//! endpoints load and save the document directly.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use storefront_core::error::CoreError;
use storefront_core::event_types;
use storefront_core::theme::editor::stale_save_warning;
use storefront_core::theme::ThemeConfig;
use storefront_db::repositories::{StoreThemeRepo, TenantRepo};
use storefront_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::tenant::TenantId;
use crate::state::AppState;

/// Stored document as returned by `GET /api/v1/theme`.
#[derive(Debug, Serialize)]
pub struct StoredThemeResponse {
    /// As saved; possibly partial, `{}` when nothing was saved yet.
    pub config: Value,
    pub version: Option<i64>,
}

/// Body of `PUT /api/v1/theme`.
#[derive(Debug, Deserialize)]
pub struct SaveThemeRequest {
    pub config: Value,
    /// Version the client loaded, if it wants stale-save detection.
    #[serde(default)]
    pub version: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SaveThemeResponse {
    pub success: bool,
    pub version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// GET /api/v1/theme
pub async fn get_theme(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
) -> AppResult<impl IntoResponse> {
    let response = match StoreThemeRepo::find(&state.pool, tenant_id).await? {
        Some(theme) => StoredThemeResponse {
            config: theme.config,
            version: Some(theme.version),
        },
        None => StoredThemeResponse {
            config: json!({}),
            version: None,
        },
    };
    Ok(Json(response))
}

/// PUT /api/v1/theme
///
/// Merge the submitted (full or partial) document over the defaults and
/// store the result. Present-but-invalid fields reject the save with 400.
/// Last writer wins: a stale `version` is reported as a `warning`, never
/// refused.
pub async fn save_theme(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Json(input): Json<SaveThemeRequest>,
) -> AppResult<impl IntoResponse> {
    let config = ThemeConfig::merge(&input.config).into_strict()?;

    TenantRepo::find_by_id(&state.pool, tenant_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tenant",
            id: tenant_id,
        }))?;

    let saved = StoreThemeRepo::save(&state.pool, tenant_id, &config.to_value()).await?;
    let version = saved.theme.version;

    let warning = input
        .version
        .and_then(|base| stale_save_warning(Some(base), saved.previous_version));
    if let Some(warning) = &warning {
        tracing::warn!(tenant_id, version, warning = %warning, "Stale theme save");
    }

    tracing::info!(tenant_id, version, "Theme saved");

    state.publish(
        PlatformEvent::new(event_types::THEME_SAVED)
            .with_tenant(tenant_id)
            .with_source("store_theme", tenant_id)
            .with_payload(json!({ "version": version, "source": "api" })),
    );

    Ok(Json(SaveThemeResponse {
        success: true,
        version,
        warning,
    }))
}
