//! Public web preview routes (root level, no authentication).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Mount the shared-card pages at the root.
///
/// ```text
/// GET  /card/{share_id}          -> card_page (HTML)
/// POST /card/{share_id}/contact  -> submit_contact (form-encoded)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/card/{share_id}", get(public::card_page))
        .route("/card/{share_id}/contact", post(public::submit_contact))
}
