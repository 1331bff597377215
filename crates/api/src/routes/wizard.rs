//! Route definitions for server-side wizard sessions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::wizard;
use crate::state::AppState;

/// Routes mounted at `/wizard-sessions`.
///
/// ```text
/// POST /                         -> create_session
/// GET  /{id}                     -> get_session
/// POST /{id}/dispatch            -> dispatch_action
/// POST /{id}/theme               -> select_theme
/// POST /{id}/save-about          -> save_about
/// POST /{id}/save-links          -> save_links
/// POST /{id}/save-lead-capture   -> save_lead_capture
/// POST /{id}/complete            -> complete
/// POST /{id}/abandon             -> abandon
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(wizard::create_session))
        .route("/{id}", get(wizard::get_session))
        .route("/{id}/dispatch", post(wizard::dispatch_action))
        .route("/{id}/theme", post(wizard::select_theme))
        .route("/{id}/save-about", post(wizard::save_about))
        .route("/{id}/save-links", post(wizard::save_links))
        .route("/{id}/save-lead-capture", post(wizard::save_lead_capture))
        .route("/{id}/complete", post(wizard::complete))
        .route("/{id}/abandon", post(wizard::abandon))
}
