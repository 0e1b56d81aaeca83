//! Repository for the `products` table.

use sqlx::PgPool;
use storefront_core::types::DbId;

use crate::models::product::{CreateProduct, Product, UpdateProduct};

/// Column list for `products` queries.
const COLUMNS: &str = "\
    id, tenant_id, name, price, stock_quantity, is_available, \
    created_at, updated_at";

pub struct ProductRepo;

impl ProductRepo {
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        input: &CreateProduct,
    ) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (tenant_id, name, price, stock_quantity, is_available) \
             VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(tenant_id)
            .bind(input.name.trim())
            .bind(input.price)
            .bind(input.stock_quantity)
            .bind(input.is_available)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1 AND tenant_id = $2");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await
    }

    /// Every product of a tenant (admin view), by name.
    pub async fn list(pool: &PgPool, tenant_id: DbId) -> Result<Vec<Product>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM products WHERE tenant_id = $1 ORDER BY name, id");
        sqlx::query_as::<_, Product>(&query)
            .bind(tenant_id)
            .fetch_all(pool)
            .await
    }

    /// Products shown on the public catalog.
    pub async fn list_available(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products \
             WHERE tenant_id = $1 AND is_available = true \
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(tenant_id)
            .fetch_all(pool)
            .await
    }

    /// Apply an admin edit. Absent fields keep their current value.
    pub async fn update(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                 name = COALESCE($3, name), \
                 price = COALESCE($4, price), \
                 stock_quantity = COALESCE($5, stock_quantity), \
                 is_available = COALESCE($6, is_available) \
             WHERE id = $1 AND tenant_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.price)
            .bind(input.stock_quantity)
            .bind(input.is_available)
            .fetch_optional(pool)
            .await
    }
}
