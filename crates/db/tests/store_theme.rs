//! Integration tests for theme persistence.

use serde_json::json;
use sqlx::PgPool;
use storefront_db::models::tenant::CreateTenant;
use storefront_db::repositories::{StoreThemeRepo, TenantRepo};

async fn seed_tenant(pool: &PgPool) -> i64 {
    TenantRepo::create(
        pool,
        &CreateTenant {
            name: "Acme".to_string(),
            slug: "acme".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_theme_is_none(pool: PgPool) {
    let tenant_id = seed_tenant(&pool).await;
    assert!(StoreThemeRepo::find(&pool, tenant_id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_replaces_document_and_bumps_version(pool: PgPool) {
    let tenant_id = seed_tenant(&pool).await;

    let first = StoreThemeRepo::save(&pool, tenant_id, &json!({"colors": {"primary": "#111111"}}))
        .await
        .unwrap();
    assert_eq!(first.theme.version, 1);
    assert_eq!(first.previous_version, None);

    let second = StoreThemeRepo::save(&pool, tenant_id, &json!({"header": {"shadow": false}}))
        .await
        .unwrap();
    assert_eq!(second.theme.version, 2);
    assert_eq!(second.previous_version, Some(1));

    // Wholesale replace: the earlier colors section is gone.
    let stored = StoreThemeRepo::find(&pool, tenant_id).await.unwrap().unwrap();
    assert!(stored.config.get("colors").is_none());
    assert_eq!(stored.config["header"]["shadow"], false);
}
