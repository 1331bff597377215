//! Handlers for leads captured through shared cards.

use axum::extract::State;
use axum::Json;
use onlycard_db::models::contact::Contact;
use onlycard_db::repositories::ContactRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/contacts
///
/// Contacts shared back on any of the caller's cards, newest first.
pub async fn list_contacts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Contact>>>> {
    let contacts = ContactRepo::list_for_owner(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: contacts }))
}
