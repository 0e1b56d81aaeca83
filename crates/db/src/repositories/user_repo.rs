//! Repository for the `users` table (sellers and attendants).

use sqlx::PgPool;
use storefront_core::types::DbId;

use crate::models::user::{CreateUser, User};

/// Column list for `users` queries.
const COLUMNS: &str = "id, tenant_id, name, role, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        input: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (tenant_id, name, role) \
             VALUES ($1, $2, COALESCE($3, 'seller')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(tenant_id)
            .bind(input.name.trim())
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// All users of a tenant, by name.
    pub async fn list_by_tenant(pool: &PgPool, tenant_id: DbId) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE tenant_id = $1 ORDER BY name, id");
        sqlx::query_as::<_, User>(&query)
            .bind(tenant_id)
            .fetch_all(pool)
            .await
    }
}
