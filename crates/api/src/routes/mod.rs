pub mod auth;
pub mod cards;
pub mod catalog;
pub mod dashboard;
pub mod health;
pub mod profile;
pub mod public;
pub mod uploads;
pub mod wizard;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                     create account (public)
/// /auth/login                                      login (public)
/// /auth/exchange                                   deep-link code exchange (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
///
/// /profile                                         get, update
///
/// /cards                                           list (?date=)
/// /cards/{id}                                      get, update
/// /contacts                                        captured leads
///
/// /activity                                        recent activity (?date=)
/// /dashboard/insights                              card + lead counts
/// /subscription                                    subscription display
///
/// /themes                                          theme catalogue (public)
/// /platforms                                       platform catalogue (public)
/// /fields                                          About field registry (public)
///
/// /wizard-sessions                                 start
/// /wizard-sessions/{id}                            get
/// /wizard-sessions/{id}/dispatch                   apply an action (POST)
/// /wizard-sessions/{id}/theme                      record theme selection (POST)
/// /wizard-sessions/{id}/save-about                 save About, advance (POST)
/// /wizard-sessions/{id}/save-links                 save links, advance (POST)
/// /wizard-sessions/{id}/save-lead-capture          save lead form, advance (POST)
/// /wizard-sessions/{id}/complete                   finish (POST)
/// /wizard-sessions/{id}/abandon                    abandon (POST)
///
/// /uploads                                         multipart image upload (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes.
        .nest("/auth", auth::router())
        // Profile of the signed-in user.
        .nest("/profile", profile::router())
        // Saved cards and the leads they captured.
        .nest("/cards", cards::router())
        .route("/contacts", get(handlers::contact::list_contacts))
        // Dashboard widgets.
        .merge(dashboard::router())
        // Static catalogues for the front ends.
        .merge(catalog::router())
        // Card-creation wizard.
        .nest("/wizard-sessions", wizard::router())
        // Image uploads.
        .nest("/uploads", uploads::router())
}
