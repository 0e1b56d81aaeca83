//! Product entity model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub tenant_id: DbId,
    pub name: String,
    pub price: Decimal,
    /// May be negative under the `allow_negative` stock policy.
    pub stock_quantity: i32,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: String,
    pub price: Decimal,
    pub stock_quantity: Option<i32>,
    pub is_available: Option<bool>,
}

/// DTO for an admin edit. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub is_available: Option<bool>,
}

/// Stock of one product right after an order decremented it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub product_id: DbId,
    pub stock_quantity: i32,
}
