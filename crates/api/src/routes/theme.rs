//! Route definitions for the stored theme document.

use axum::routing::get;
use axum::Router;

use crate::handlers::theme;
use crate::state::AppState;

/// Theme routes mounted at `/theme`.
///
/// ```text
/// GET /  -> get_theme
/// PUT /  -> save_theme
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(theme::get_theme).put(theme::save_theme))
}
