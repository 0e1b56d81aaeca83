//! Repository for the `platform_events` table.

use sqlx::PgPool;
use storefront_core::types::DbId;

use crate::models::event::PlatformEventRow;

/// Column list for `platform_events` queries.
const COLUMNS: &str = "\
    id, tenant_id, event_type, source_entity_type, source_entity_id, payload, created_at";

pub struct EventRepo;

impl EventRepo {
    /// Insert an event row, returning the generated ID.
    pub async fn insert(
        pool: &PgPool,
        tenant_id: Option<DbId>,
        event_type: &str,
        source_entity_type: Option<&str>,
        source_entity_id: Option<DbId>,
        payload: &serde_json::Value,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO platform_events \
                (tenant_id, event_type, source_entity_type, source_entity_id, payload) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(tenant_id)
        .bind(event_type)
        .bind(source_entity_type)
        .bind(source_entity_id)
        .bind(payload)
        .fetch_one(pool)
        .await
    }

    /// A tenant's most recent events, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        tenant_id: DbId,
        limit: i64,
    ) -> Result<Vec<PlatformEventRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM platform_events \
             WHERE tenant_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2"
        );
        sqlx::query_as::<_, PlatformEventRow>(&query)
            .bind(tenant_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
