//! Order and line item models.
//!
//! Orders are created only through `OrderRepo::create_with_items`, which
//! takes a [`storefront_core::order::NewOrder`] directly; there is no
//! separate create DTO here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::order::{order_total, OrderStatus};
use storefront_core::types::{DbId, Timestamp};

use super::product::StockLevel;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: DbId,
    pub tenant_id: DbId,
    pub seller_id: DbId,
    pub customer_name: String,
    pub customer_phone: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Read model
// ---------------------------------------------------------------------------

/// An order joined with its seller's name.
#[derive(Debug, Clone, FromRow)]
pub struct OrderHeaderRow {
    pub id: DbId,
    pub seller_id: DbId,
    pub seller_name: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub status: String,
    pub created_at: Timestamp,
}

/// A line item joined with its product's name.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineView {
    #[serde(skip)]
    pub order_id: DbId,
    pub product_id: DbId,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// An order as shown in the recent-orders list and detail view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithItems {
    pub id: DbId,
    pub customer_name: String,
    pub customer_phone: String,
    pub seller_id: DbId,
    pub seller_name: String,
    pub status: String,
    pub created_at: Timestamp,
    pub items: Vec<OrderLineView>,
    /// Number of line items.
    pub item_count: i64,
    /// `sum(quantity × unitPrice)` at currency precision.
    pub total: Decimal,
}

impl OrderWithItems {
    pub fn assemble(header: OrderHeaderRow, items: Vec<OrderLineView>) -> Self {
        let total = order_total(items.iter().map(|i| (i.quantity, i.unit_price)));
        Self {
            id: header.id,
            customer_name: header.customer_name,
            customer_phone: header.customer_phone,
            seller_id: header.seller_id,
            seller_name: header.seller_name,
            status: header.status,
            created_at: header.created_at,
            item_count: items.len() as i64,
            items,
            total,
        }
    }
}

/// What the order transaction committed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    pub id: DbId,
    pub total: Decimal,
    /// Remaining stock of each product touched, in item order.
    pub stock_levels: Vec<StockLevel>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Body of `PATCH /orders/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}
