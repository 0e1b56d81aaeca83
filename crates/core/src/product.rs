//! Product field validation for admin create/edit.

use rust_decimal::Decimal;

use crate::error::CoreError;

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LENGTH: usize = 200;

/// Default threshold at or below which a product counts as low on stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 5;

pub fn validate_product_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Product name must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_PRODUCT_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Product name must not exceed {MAX_PRODUCT_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_price(price: Decimal) -> Result<(), CoreError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(CoreError::Validation(
            "Price must not be negative".to_string(),
        ));
    }
    if price.scale() > crate::order::DECIMAL_PLACES && price != crate::order::round_money(price) {
        return Err(CoreError::Validation(format!(
            "Price must have at most {} decimal places",
            crate::order::DECIMAL_PLACES
        )));
    }
    Ok(())
}

/// Whether a stock level should be flagged on the dashboard.
pub fn is_low_stock(stock_quantity: i32, threshold: i32) -> bool {
    stock_quantity <= threshold
}
