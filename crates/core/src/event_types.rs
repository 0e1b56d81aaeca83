//! Well-known platform event names.
//!
//! These must match the `event_type` values written to `platform_events` and
//! matched by the API's view cache.

/// An order and its line items were committed.
pub const ORDER_CREATED: &str = "order.created";

/// An order moved to `completed` or `cancelled`.
pub const ORDER_STATUS_CHANGED: &str = "order.status_changed";

/// A product was created or edited from the admin dashboard.
pub const PRODUCT_UPDATED: &str = "product.updated";

/// A tenant's theme document was persisted.
pub const THEME_SAVED: &str = "theme.saved";
