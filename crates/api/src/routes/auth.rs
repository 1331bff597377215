//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /signup    -> signup
/// POST /login     -> login
/// POST /exchange  -> exchange (deep-link code)
/// POST /refresh   -> refresh
/// POST /logout    -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/exchange", post(auth::exchange))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
}
