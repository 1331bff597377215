//! Public web preview of shared cards and the "Share Contact" capture.
//!
//! These handlers answer browsers, so failures render HTML pages rather than
//! the JSON error envelope.

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use onlycard_core::error::CoreError;
use onlycard_core::lead_capture::ContactSubmission;
use onlycard_db::models::card::Card;
use onlycard_db::models::contact::CreateContact;
use onlycard_db::repositories::{CardRepo, ContactRepo};
use uuid::Uuid;

use crate::preview::{render_card_page, render_not_found, FormNotice};
use crate::state::AppState;

type HtmlResponse = (StatusCode, Html<String>);

fn not_found() -> HtmlResponse {
    (StatusCode::NOT_FOUND, Html(render_not_found()))
}

fn failed(err: impl std::fmt::Display) -> HtmlResponse {
    tracing::error!(error = %err, "Card preview failed");
    (StatusCode::INTERNAL_SERVER_ERROR, Html(render_not_found()))
}

async fn load_card(state: &AppState, share_id: &str) -> Result<Card, HtmlResponse> {
    let share_id = Uuid::parse_str(share_id.trim()).map_err(|_| not_found())?;
    CardRepo::find_by_share_id(&state.pool, share_id)
        .await
        .map_err(failed)?
        .ok_or_else(not_found)
}

fn render(card: &Card, notice: Option<&FormNotice>) -> Result<String, HtmlResponse> {
    let links = card.parsed_social_links().map_err(failed)?;
    let lead = card.parsed_lead_capture().map_err(failed)?;
    Ok(render_card_page(card, &links, &lead, notice))
}

/// GET /card/{share_id}
pub async fn card_page(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
) -> Result<Html<String>, HtmlResponse> {
    let card = load_card(&state, &share_id).await?;
    Ok(Html(render(&card, None)?))
}

/// POST /card/{share_id}/contact
///
/// Store a contact shared back by a visitor. Fields the form does not
/// collect are dropped; an invalid submission re-renders the page with the
/// message and status 400. A body that is not a form re-renders the page
/// with the rejection's status.
pub async fn submit_contact(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
    form: Result<Form<ContactSubmission>, FormRejection>,
) -> Result<HtmlResponse, HtmlResponse> {
    let card = load_card(&state, &share_id).await?;
    let config = card.parsed_lead_capture().map_err(failed)?;

    let submission = match form {
        Ok(Form(submission)) => submission,
        Err(rejection) => {
            tracing::debug!(card_id = card.id, error = %rejection, "Contact form rejected");
            let page = render(&card, Some(&FormNotice::Error(rejection.body_text())))?;
            return Ok((rejection.status(), Html(page)));
        }
    };

    let submission = match submission.prepare(&config) {
        Ok(submission) => submission,
        Err(CoreError::Validation(msg)) => {
            let page = render(&card, Some(&FormNotice::Error(msg)))?;
            return Ok((StatusCode::BAD_REQUEST, Html(page)));
        }
        Err(other) => return Err(failed(other)),
    };

    let contact = ContactRepo::create(&state.pool, &CreateContact::new(card.id, submission, &config))
        .await
        .map_err(failed)?;
    tracing::info!(card_id = card.id, contact_id = contact.id, "Contact captured");

    let page = render(&card, Some(&FormNotice::Saved))?;
    Ok((StatusCode::CREATED, Html(page)))
}
