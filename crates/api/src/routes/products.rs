//! Route definitions for admin products.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Product routes mounted at `/products`.
///
/// ```text
/// GET  /         -> list_products
/// POST /         -> create_product
/// PUT  /{id}     -> update_product
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(products::list_products).post(products::create_product),
        )
        .route("/{id}", put(products::update_product))
}
