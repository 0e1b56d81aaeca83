//! Repository for the `orders` and `order_items` tables.
//!
//! [`OrderRepo::create_with_items`] is the order transaction: the order row,
//! every line item and every stock decrement commit together or not at all.

use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};
use storefront_core::order::{order_total, NewOrder, OrderStatus};
use storefront_core::stock::StockPolicy;
use storefront_core::types::DbId;

use crate::models::order::{CreatedOrder, Order, OrderHeaderRow, OrderLineView, OrderWithItems};
use crate::models::product::StockLevel;

/// Column list for `orders` queries.
const COLUMNS: &str = "\
    id, tenant_id, seller_id, customer_name, customer_phone, status, \
    created_at, updated_at";

/// Header columns for the read model (orders joined with users).
const HEADER_COLUMNS: &str = "\
    o.id, o.seller_id, u.name AS seller_name, o.customer_name, \
    o.customer_phone, o.status, o.created_at";

/// Line columns for the read model (order_items joined with products).
const LINE_COLUMNS: &str = "\
    oi.order_id, oi.product_id, p.name AS product_name, oi.quantity, oi.unit_price";

/// Provides the order transaction and the order read model.
pub struct OrderRepo;

impl OrderRepo {
    // -----------------------------------------------------------------------
    // Transaction
    // -----------------------------------------------------------------------

    /// Create an order with its line items and decrement stock, atomically.
    ///
    /// The seller must belong to `tenant_id` and every product must exist in
    /// `tenant_id`; otherwise the statement finds no row, this returns
    /// `sqlx::Error::RowNotFound` and the transaction is rolled back when
    /// dropped. Each stock decrement is a single `UPDATE`, so its row lock
    /// serializes concurrent orders for the same product.
    ///
    /// The caller is expected to have run
    /// [`storefront_core::order::validate_new_order`] first.
    pub async fn create_with_items(
        pool: &PgPool,
        tenant_id: DbId,
        order: &NewOrder,
        policy: StockPolicy,
    ) -> Result<CreatedOrder, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let order_id: DbId = sqlx::query_scalar(
            "INSERT INTO orders (tenant_id, seller_id, customer_name, customer_phone) \
             SELECT $1, u.id, $3, $4 FROM users u \
             WHERE u.id = $2 AND u.tenant_id = $1 \
             RETURNING id",
        )
        .bind(tenant_id)
        .bind(order.seller_id)
        .bind(order.customer_name.trim())
        .bind(order.customer_phone.trim())
        .fetch_one(&mut *tx)
        .await?;

        let mut stock_levels = Vec::with_capacity(order.items.len());
        let mut lines = Vec::with_capacity(order.items.len());

        for (position, item) in order.items.iter().enumerate() {
            let (price, remaining) =
                decrement_stock(&mut tx, tenant_id, item.product_id, item.quantity, policy)
                    .await?;
            let unit_price = item.unit_price.unwrap_or(price);

            sqlx::query(
                "INSERT INTO order_items (order_id, product_id, position, quantity, unit_price) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(order_id)
            .bind(item.product_id)
            .bind(position as i32)
            .bind(item.quantity)
            .bind(unit_price)
            .execute(&mut *tx)
            .await?;

            stock_levels.push(StockLevel {
                product_id: item.product_id,
                stock_quantity: remaining,
            });
            lines.push((item.quantity, unit_price));
        }

        tx.commit().await?;
        tracing::debug!(
            tenant_id,
            order_id,
            items = order.items.len(),
            policy = %policy,
            "Order transaction committed"
        );

        Ok(CreatedOrder {
            id: order_id,
            total: order_total(lines),
            stock_levels,
        })
    }

    // -----------------------------------------------------------------------
    // Read model
    // -----------------------------------------------------------------------

    /// The `limit` most recent orders of a tenant, newest first, each with
    /// seller name, line items, item count and total.
    pub async fn list_recent(
        pool: &PgPool,
        tenant_id: DbId,
        limit: i64,
    ) -> Result<Vec<OrderWithItems>, sqlx::Error> {
        let query = format!(
            "SELECT {HEADER_COLUMNS} FROM orders o \
             JOIN users u ON u.id = o.seller_id \
             WHERE o.tenant_id = $1 \
             ORDER BY o.created_at DESC, o.id DESC \
             LIMIT $2"
        );
        let headers = sqlx::query_as::<_, OrderHeaderRow>(&query)
            .bind(tenant_id)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = headers.iter().map(|h| h.id).collect();
        let mut lines_by_order = Self::lines_for(pool, &ids).await?;

        Ok(headers
            .into_iter()
            .map(|h| {
                let items = lines_by_order.remove(&h.id).unwrap_or_default();
                OrderWithItems::assemble(h, items)
            })
            .collect())
    }

    /// One order of a tenant with its items. `None` if it does not exist in
    /// that tenant.
    pub async fn find_with_items(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
    ) -> Result<Option<OrderWithItems>, sqlx::Error> {
        let query = format!(
            "SELECT {HEADER_COLUMNS} FROM orders o \
             JOIN users u ON u.id = o.seller_id \
             WHERE o.tenant_id = $1 AND o.id = $2"
        );
        let Some(header) = sqlx::query_as::<_, OrderHeaderRow>(&query)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let items = Self::lines_for(pool, &[id])
            .await?
            .remove(&id)
            .unwrap_or_default();
        Ok(Some(OrderWithItems::assemble(header, items)))
    }

    /// Line items of the given orders, grouped by order and in entry order.
    async fn lines_for(
        pool: &PgPool,
        order_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<OrderLineView>>, sqlx::Error> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT {LINE_COLUMNS} FROM order_items oi \
             JOIN products p ON p.id = oi.product_id \
             WHERE oi.order_id = ANY($1) \
             ORDER BY oi.order_id, oi.position"
        );
        let rows = sqlx::query_as::<_, OrderLineView>(&query)
            .bind(order_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<OrderLineView>> = HashMap::new();
        for row in rows {
            grouped.entry(row.order_id).or_default().push(row);
        }
        Ok(grouped)
    }

    // -----------------------------------------------------------------------
    // Status
    // -----------------------------------------------------------------------

    /// Find the raw order row.
    pub async fn find_by_id(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1 AND tenant_id = $2");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await
    }

    /// Move an order from `current` to `next`.
    ///
    /// Returns `None` if the order is not in the tenant or its status is no
    /// longer `current` (changed concurrently).
    pub async fn update_status(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
        current: OrderStatus,
        next: OrderStatus,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET status = $4 \
             WHERE id = $1 AND tenant_id = $2 AND status = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(tenant_id)
            .bind(current.as_str())
            .bind(next.as_str())
            .fetch_optional(pool)
            .await
    }
}

/// Decrement one product's stock inside the order transaction.
///
/// Returns the product's current price and its remaining stock. A product
/// outside the tenant yields `RowNotFound`.
async fn decrement_stock(
    tx: &mut Transaction<'_, Postgres>,
    tenant_id: DbId,
    product_id: DbId,
    quantity: i32,
    policy: StockPolicy,
) -> Result<(rust_decimal::Decimal, i32), sqlx::Error> {
    sqlx::query_as(
        "UPDATE products SET stock_quantity = CASE \
             WHEN $4 THEN GREATEST(stock_quantity - $3, 0) \
             ELSE stock_quantity - $3 \
         END \
         WHERE id = $1 AND tenant_id = $2 \
         RETURNING price, stock_quantity",
    )
    .bind(product_id)
    .bind(tenant_id)
    .bind(quantity)
    .bind(policy.clamps_at_zero())
    .fetch_one(&mut **tx)
    .await
}
