//! Route definitions for saved cards.

use axum::routing::get;
use axum::Router;

use crate::handlers::card;
use crate::state::AppState;

/// Routes mounted at `/cards`.
///
/// ```text
/// GET  /      -> list_cards (?date=YYYY-MM-DD)
/// GET  /{id}  -> get_card
/// PUT  /{id}  -> update_card
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(card::list_cards))
        .route("/{id}", get(card::get_card).put(card::update_card))
}
