//! Repository for the `store_themes` table.

use sqlx::PgPool;
use storefront_core::types::DbId;

use crate::models::theme::{SavedTheme, StoreTheme};

/// Column list for `store_themes` queries.
const COLUMNS: &str = "tenant_id, config, version, created_at, updated_at";

pub struct StoreThemeRepo;

impl StoreThemeRepo {
    /// The stored document of a tenant. `None` if it never saved one.
    pub async fn find(pool: &PgPool, tenant_id: DbId) -> Result<Option<StoreTheme>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM store_themes WHERE tenant_id = $1");
        sqlx::query_as::<_, StoreTheme>(&query)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the tenant's document wholesale and bump its version.
    ///
    /// Last writer wins; the replaced version is returned so the caller can
    /// tell whether it overwrote someone else's save.
    pub async fn save(
        pool: &PgPool,
        tenant_id: DbId,
        config: &serde_json::Value,
    ) -> Result<SavedTheme, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous_version: Option<i64> = sqlx::query_scalar(
            "SELECT version FROM store_themes WHERE tenant_id = $1 FOR UPDATE",
        )
        .bind(tenant_id)
        .fetch_optional(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO store_themes (tenant_id, config) VALUES ($1, $2) \
             ON CONFLICT (tenant_id) DO UPDATE \
             SET config = EXCLUDED.config, version = store_themes.version + 1 \
             RETURNING {COLUMNS}"
        );
        let theme = sqlx::query_as::<_, StoreTheme>(&query)
            .bind(tenant_id)
            .bind(config)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(SavedTheme {
            theme,
            previous_version,
        })
    }
}
