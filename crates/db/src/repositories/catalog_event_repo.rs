//! Repository for the `catalog_events` table.

use sqlx::PgPool;
use storefront_core::tracking::CatalogEventKind;
use storefront_core::types::DbId;

use crate::models::catalog_event::CatalogEvent;

/// Column list for `catalog_events` queries.
const COLUMNS: &str = "id, tenant_id, event_type, product_id, metadata, created_at";

pub struct CatalogEventRepo;

impl CatalogEventRepo {
    /// Record a catalog event. A `product_id` outside the tenant is stored
    /// as `NULL` rather than failing the write.
    pub async fn insert(
        pool: &PgPool,
        tenant_id: DbId,
        kind: CatalogEventKind,
        product_id: Option<DbId>,
        metadata: Option<&serde_json::Value>,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO catalog_events (tenant_id, event_type, product_id, metadata) \
             VALUES ($1, $2, \
                 (SELECT id FROM products WHERE id = $3 AND tenant_id = $1), \
                 COALESCE($4, '{}'::jsonb)) \
             RETURNING id",
        )
        .bind(tenant_id)
        .bind(kind.as_str())
        .bind(product_id)
        .bind(metadata)
        .fetch_one(pool)
        .await
    }

    /// A tenant's most recent catalog events, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        tenant_id: DbId,
        limit: i64,
    ) -> Result<Vec<CatalogEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM catalog_events \
             WHERE tenant_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2"
        );
        sqlx::query_as::<_, CatalogEvent>(&query)
            .bind(tenant_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
