//! Route definitions for image uploads.

use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Routes mounted at `/uploads`.
///
/// ```text
/// POST /  -> upload_image (multipart, field `file`)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(upload::upload_image))
}
