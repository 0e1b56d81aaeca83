//! Public catalog routes, addressed by store slug.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes mounted at `/catalog` (root level, NOT under `/api/v1`).
///
/// ```text
/// GET  /{slug}/theme       -> get_catalog_theme
/// GET  /{slug}/theme.css   -> get_catalog_stylesheet
/// GET  /{slug}/products    -> list_catalog_products
/// POST /{slug}/track       -> track_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{slug}/theme", get(catalog::get_catalog_theme))
        .route("/{slug}/theme.css", get(catalog::get_catalog_stylesheet))
        .route("/{slug}/products", get(catalog::list_catalog_products))
        .route("/{slug}/track", post(catalog::track_event))
}
