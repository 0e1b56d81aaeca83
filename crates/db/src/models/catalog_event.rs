//! Catalog analytics event model.

use serde::Serialize;
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `catalog_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEvent {
    pub id: DbId,
    pub tenant_id: DbId,
    pub event_type: String,
    pub product_id: Option<DbId>,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
}
