pub mod catalog;
pub mod dashboard;
pub mod health;
pub mod orders;
pub mod products;
pub mod sellers;
pub mod theme;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Admin routes act on the tenant named by the `x-tenant-id` header.
///
/// ```text
/// /ws/theme/editor                                 theme editor socket
/// /ws/theme/preview                                theme preview socket
///
/// /orders                                          create (POST)
/// /orders/recent                                   recent orders (GET)
/// /orders/{id}                                     get
/// /orders/{id}/status                              complete / cancel (PATCH)
///
/// /products                                        list, create
/// /products/{id}                                   update (PUT)
///
/// /sellers                                         list, create
///
/// /dashboard/metrics                               aggregate metrics
/// /dashboard/catalog-activity                      latest catalog events
/// /dashboard/events                                latest domain events
///
/// /theme                                           get, save (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket theme sessions.
        .route("/ws/theme/editor", get(ws::theme_editor_ws))
        .route("/ws/theme/preview", get(ws::theme_preview_ws))
        // Orders.
        .nest("/orders", orders::router())
        // Products.
        .nest("/products", products::router())
        // Sellers.
        .nest("/sellers", sellers::router())
        // Dashboard.
        .nest("/dashboard", dashboard::router())
        // Stored theme document.
        .nest("/theme", theme::router())
}
