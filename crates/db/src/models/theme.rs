//! Stored theme document model.

use serde::Serialize;
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `store_themes` table.
///
/// `config` is stored as saved and may be partial; callers merge defaults.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreTheme {
    pub tenant_id: DbId,
    pub config: serde_json::Value,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of a save: the new row and the version it replaced.
#[derive(Debug, Clone)]
pub struct SavedTheme {
    pub theme: StoreTheme,
    /// `None` when this was the tenant's first save.
    pub previous_version: Option<i64>,
}
