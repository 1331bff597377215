//! Route definitions for the home dashboard.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard routes, merged at the API root.
///
/// ```text
/// GET  /activity             -> recent_activity (?date=YYYY-MM-DD)
/// GET  /dashboard/insights   -> insights
/// GET  /subscription         -> subscription
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/activity", get(dashboard::recent_activity))
        .route("/dashboard/insights", get(dashboard::insights))
        .route("/subscription", get(dashboard::subscription))
}
