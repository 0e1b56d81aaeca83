//! Shared query parameter types for API handlers.

use serde::Deserialize;
use storefront_core::types::DbId;

/// `?limit=` for bounded "most recent" lists. Clamped in the handler via
/// `clamp_limit`.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// `?tenant_id=` for WebSocket upgrades, where browsers cannot set custom
/// headers.
#[derive(Debug, Default, Deserialize)]
pub struct TenantParams {
    pub tenant_id: Option<DbId>,
}
