use axum::routing::get;
use axum::Router;

use crate::handlers::sellers;
use crate::state::AppState;

/// Seller routes mounted at `/sellers`.
///
/// ```text
/// GET  /   -> list_sellers
/// POST /   -> create_seller
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(sellers::list_sellers).post(sellers::create_seller))
}
