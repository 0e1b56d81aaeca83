//! Order domain types, request validation, and money math.
//!
//! Validation here runs before any database access: a request that fails
//! [`validate_new_order`] never opens a transaction.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Currency precision used for every displayed amount.
pub const DECIMAL_PLACES: u32 = 2;

/// Maximum length of a customer name.
pub const MAX_CUSTOMER_NAME_LENGTH: u64 = 200;

/// Maximum length of a customer phone number.
pub const MAX_CUSTOMER_PHONE_LENGTH: u64 = 40;

/// Maximum number of line items in a single order.
pub const MAX_ITEMS_PER_ORDER: u64 = 200;

/// Generic message reported for any failure inside the order transaction.
pub const ORDER_FAILED_MESSAGE: &str = "Failed to create order";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of an order, stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Only pending orders move; completed and cancelled are terminal.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Completed)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Unknown order status '{other}'"
            ))),
        }
    }
}

/// Validate a requested status change against the current status.
pub fn validate_status_transition(
    current: OrderStatus,
    next: OrderStatus,
) -> Result<(), CoreError> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Order cannot move from {current} to {next}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Request payload
// ---------------------------------------------------------------------------

/// One requested line: a product, how many, and optionally the price agreed
/// at the counter. When `unit_price` is absent the product's current price
/// is used.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineInput {
    pub product_id: DbId,
    #[validate(range(min = 1, message = "Quantity must be a positive integer"))]
    pub quantity: i32,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
}

/// An order as submitted by the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    #[validate(length(
        min = 1,
        max = MAX_CUSTOMER_NAME_LENGTH,
        message = "Customer name is required"
    ))]
    pub customer_name: String,
    #[serde(default)]
    #[validate(length(max = MAX_CUSTOMER_PHONE_LENGTH))]
    pub customer_phone: String,
    pub seller_id: DbId,
    #[validate(length(
        min = 1,
        max = MAX_ITEMS_PER_ORDER,
        message = "Order must contain at least one item"
    ))]
    #[validate(nested)]
    pub items: Vec<OrderLineInput>,
}

/// Validate an order request and resolve the tenant it belongs to.
///
/// Rejects a missing tenant, an empty item list, non-positive quantities,
/// negative unit prices, and a blank customer name.
pub fn validate_new_order(tenant_id: Option<DbId>, order: &NewOrder) -> Result<DbId, CoreError> {
    let tenant_id =
        tenant_id.ok_or_else(|| CoreError::Validation("Tenant id is required".to_string()))?;

    if order.items.is_empty() {
        return Err(CoreError::Validation(
            "Order must contain at least one item".to_string(),
        ));
    }

    order
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    if order.customer_name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Customer name is required".to_string(),
        ));
    }

    for (index, item) in order.items.iter().enumerate() {
        if let Some(price) = item.unit_price {
            if price.is_sign_negative() && !price.is_zero() {
                return Err(CoreError::Validation(format!(
                    "items[{index}].unitPrice must not be negative"
                )));
            }
        }
    }

    Ok(tenant_id)
}

// ---------------------------------------------------------------------------
// Money
// ---------------------------------------------------------------------------

/// Round an amount to currency precision, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    // Pad to a fixed scale so `45` displays as `45.00`.
    rounded.rescale(DECIMAL_PLACES);
    rounded
}

/// `quantity × unit_price`, unrounded.
pub fn line_total(quantity: i32, unit_price: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_price
}

/// Sum of `quantity × unit_price` over all lines, rounded to currency
/// precision once at the end.
pub fn order_total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (i32, Decimal)>,
{
    let sum: Decimal = lines
        .into_iter()
        .map(|(quantity, unit_price)| line_total(quantity, unit_price))
        .sum();
    round_money(sum)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
