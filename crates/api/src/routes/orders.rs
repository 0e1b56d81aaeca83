//! Route definitions for orders.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Order routes mounted at `/orders`.
///
/// ```text
/// POST  /               -> create_order
/// GET   /recent         -> list_recent_orders
/// GET   /{id}           -> get_order
/// PATCH /{id}/status    -> update_order_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create_order))
        .route("/recent", get(orders::list_recent_orders))
        .route("/{id}", get(orders::get_order))
        .route("/{id}/status", patch(orders::update_order_status))
}
