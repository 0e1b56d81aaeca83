use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard routes mounted at `/dashboard`.
///
/// ```text
/// GET /metrics            -> get_metrics
/// GET /catalog-activity   -> list_catalog_activity
/// GET /events             -> list_platform_events
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(dashboard::get_metrics))
        .route("/catalog-activity", get(dashboard::list_catalog_activity))
        .route("/events", get(dashboard::list_platform_events))
}
