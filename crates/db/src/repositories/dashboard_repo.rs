//! Aggregate queries behind the admin dashboard.

use sqlx::PgPool;
use storefront_core::order::round_money;
use storefront_core::types::DbId;

use crate::models::dashboard::DashboardMetrics;

pub struct DashboardRepo;

impl DashboardRepo {
    /// Compute a tenant's dashboard counters.
    ///
    /// A product is low on stock when its quantity is at or below
    /// `low_stock_threshold`.
    pub async fn metrics(
        pool: &PgPool,
        tenant_id: DbId,
        low_stock_threshold: i32,
    ) -> Result<DashboardMetrics, sqlx::Error> {
        let mut metrics = sqlx::query_as::<_, DashboardMetrics>(
            "SELECT \
                 (SELECT COUNT(*) FROM orders WHERE tenant_id = $1) AS order_count, \
                 (SELECT COUNT(*) FROM orders \
                     WHERE tenant_id = $1 AND status = 'pending') AS pending_orders, \
                 (SELECT COALESCE(SUM(oi.quantity * oi.unit_price), 0) \
                     FROM order_items oi JOIN orders o ON o.id = oi.order_id \
                     WHERE o.tenant_id = $1 AND o.status <> 'cancelled') AS revenue, \
                 (SELECT COUNT(*) FROM products \
                     WHERE tenant_id = $1 AND stock_quantity <= $2) AS low_stock_products, \
                 (SELECT COUNT(*) FROM catalog_events \
                     WHERE tenant_id = $1 AND event_type = 'product_view') AS product_views, \
                 (SELECT COUNT(*) FROM catalog_events \
                     WHERE tenant_id = $1 AND event_type = 'whatsapp_click') AS whatsapp_clicks",
        )
        .bind(tenant_id)
        .bind(low_stock_threshold)
        .fetch_one(pool)
        .await?;

        metrics.revenue = round_money(metrics.revenue);
        Ok(metrics)
    }
}
