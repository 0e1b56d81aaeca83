//! Aggregate dashboard metrics.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Per-tenant counters shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub order_count: i64,
    pub pending_orders: i64,
    /// Sum over non-cancelled orders.
    pub revenue: Decimal,
    pub low_stock_products: i64,
    pub product_views: i64,
    pub whatsapp_clicks: i64,
}
