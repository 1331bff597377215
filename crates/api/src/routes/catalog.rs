//! Route definitions for the static catalogues.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalogue routes, merged at the API root. No authentication.
///
/// ```text
/// GET  /themes     -> list_themes
/// GET  /platforms  -> list_platforms
/// GET  /fields     -> list_fields
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/themes", get(catalog::list_themes))
        .route("/platforms", get(catalog::list_platforms))
        .route("/fields", get(catalog::list_fields))
}
