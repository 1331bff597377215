//! Handlers for server-side wizard sessions.
//!
//! A session persists the wizard's `{step, draft, card_id}` between requests.
//! In-memory edits go through `dispatch`; the save endpoints write the card
//! and then move the wizard on. A failed save leaves the session untouched.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use onlycard_core::card::CardDraft;
use onlycard_core::error::CoreError;
use onlycard_core::lead_capture::LeadCaptureConfig;
use onlycard_core::share::new_share_id;
use onlycard_core::theme::ThemeId;
use onlycard_core::types::DbId;
use onlycard_core::wizard::{ThemeSelection, Wizard, WizardAction, WizardStatus, WizardStep};
use onlycard_db::models::card::{Card, CardContent};
use onlycard_db::models::wizard_session::{WizardSession, WizardSnapshot};
use onlycard_db::repositories::{CardRepo, PgCardWriter, WizardSessionRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::card::{find_owned_card, CardResponse};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /wizard-sessions`.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// Edit this card instead of starting from scratch.
    pub card_id: Option<DbId>,
}

/// Request body for `POST /wizard-sessions/{id}/theme`.
#[derive(Debug, Deserialize)]
pub struct SelectThemeRequest {
    pub theme: String,
}

/// Request body for `POST /wizard-sessions/{id}/save-links`.
#[derive(Debug, Deserialize)]
pub struct SaveLinksRequest {
    /// Raw handles keyed by storage field, e.g. `instagram_username`.
    pub handles: BTreeMap<String, String>,
}

/// Client view of a wizard session.
#[derive(Debug, Serialize)]
pub struct WizardView {
    pub id: DbId,
    pub status: WizardStatus,
    pub step: WizardStep,
    pub step_index: usize,
    pub step_label: &'static str,
    pub is_last_step: bool,
    pub card_id: Option<DbId>,
    pub can_save_about: bool,
    pub draft: CardDraft,
}

impl WizardView {
    fn new(session: &WizardSession, wizard: &Wizard) -> AppResult<Self> {
        let step = wizard.step();
        Ok(Self {
            id: session.id,
            status: session.status()?,
            step,
            step_index: step.index(),
            step_label: step.label(),
            is_last_step: step.is_last(),
            card_id: wizard.card_id(),
            can_save_about: wizard.can_save_about(),
            draft: wizard.draft().clone(),
        })
    }
}

/// Response of `POST /wizard-sessions/{id}/dispatch`.
#[derive(Debug, Serialize)]
pub struct DispatchResponse {
    pub session: WizardView,
    pub changed: bool,
}

/// Response of `POST /wizard-sessions/{id}/theme`.
#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub session: WizardView,
    pub selection: ThemeSelection,
}

/// Response of the save endpoints and `complete`.
#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub session: WizardView,
    pub card: CardResponse,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a session owned by the caller together with its wizard.
async fn load(state: &AppState, id: DbId, user_id: DbId) -> AppResult<(WizardSession, Wizard)> {
    let session = WizardSessionRepo::find_owned(&state.pool, id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WizardSession",
            id,
        }))?;
    let wizard = session.to_wizard()?;
    Ok((session, wizard))
}

/// Like [`load`], but only for sessions that are still running.
async fn load_active(
    state: &AppState,
    id: DbId,
    user_id: DbId,
) -> AppResult<(WizardSession, Wizard)> {
    let (session, wizard) = load(state, id, user_id).await?;
    if session.status()? != WizardStatus::InProgress {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Wizard session {id} is already {}",
            session.status
        ))));
    }
    Ok((session, wizard))
}

fn require_step(wizard: &Wizard, step: WizardStep) -> AppResult<()> {
    if wizard.step() != step {
        return Err(AppError::Core(CoreError::Validation(format!(
            "This action is only available on the {} step",
            step.label()
        ))));
    }
    Ok(())
}

/// The card a save step writes to; About must have been saved first.
fn require_card(wizard: &Wizard) -> AppResult<DbId> {
    wizard.card_id().ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Save the About step before continuing".into(),
        ))
    })
}

/// Persist the wizard and return the fresh view.
async fn store(state: &AppState, id: DbId, wizard: &Wizard) -> AppResult<WizardView> {
    let snapshot = WizardSnapshot::of(wizard)?;
    let session = WizardSessionRepo::save_snapshot(&state.pool, id, &snapshot)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WizardSession",
            id,
        }))?;
    WizardView::new(&session, wizard)
}

fn card_missing(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Card", id })
}

fn encode(
    what: &str,
    value: Result<serde_json::Value, serde_json::Error>,
) -> AppResult<serde_json::Value> {
    value.map_err(|e| AppError::InternalError(format!("Failed to encode {what}: {e}")))
}

fn saved(state: &AppState, session: WizardView, card: Card) -> SavedResponse {
    SavedResponse {
        session,
        card: CardResponse::new(card, &state.config.public_base_url),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/wizard-sessions
///
/// Start a wizard. With `card_id`, the caller's card is loaded into the draft
/// and the wizard starts on About.
pub async fn create_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateSessionRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<WizardView>>)> {
    let wizard = match input.card_id {
        Some(card_id) => {
            let card = find_owned_card(&state, card_id, auth.user_id).await?;
            Wizard::from_card(card.id, card.to_draft()?)
        }
        None => Wizard::new(),
    };

    let session =
        WizardSessionRepo::create(&state.pool, auth.user_id, &WizardSnapshot::of(&wizard)?).await?;

    tracing::info!(
        session_id = session.id,
        user_id = auth.user_id,
        card_id = ?wizard.card_id(),
        "Wizard session started"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: WizardView::new(&session, &wizard)?,
        }),
    ))
}

/// GET /api/v1/wizard-sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<WizardView>>> {
    let (session, wizard) = load(&state, id, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: WizardView::new(&session, &wizard)?,
    }))
}

/// POST /api/v1/wizard-sessions/{id}/dispatch
///
/// Apply one [`WizardAction`]. Refused navigation is not an error; it is
/// reported as `changed: false`.
pub async fn dispatch_action(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(action): Json<WizardAction>,
) -> AppResult<Json<DataResponse<DispatchResponse>>> {
    let (_, mut wizard) = load_active(&state, id, auth.user_id).await?;
    let changed = wizard.dispatch(action)?;
    let session = store(&state, id, &wizard).await?;

    tracing::debug!(session_id = id, changed, step = ?wizard.step(), "Wizard action applied");
    Ok(Json(DataResponse {
        data: DispatchResponse { session, changed },
    }))
}

/// POST /api/v1/wizard-sessions/{id}/theme
///
/// Record a theme selection. If the draft already belongs to a saved card the
/// card's theme is updated too; a failed write is reported in `selection`.
/// From the Theme step the wizard moves on to About; later steps are kept.
pub async fn select_theme(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SelectThemeRequest>,
) -> AppResult<Json<DataResponse<ThemeResponse>>> {
    let theme = ThemeId::parse_strict(&input.theme)?;
    let (_, mut wizard) = load_active(&state, id, auth.user_id).await?;

    let writer = PgCardWriter::new(&state.pool);
    let selection = wizard.record_theme_selection(theme, &writer).await;
    let session = store(&state, id, &wizard).await?;

    tracing::info!(session_id = id, theme = theme.as_str(), "Theme selected");
    Ok(Json(DataResponse {
        data: ThemeResponse { session, selection },
    }))
}

/// POST /api/v1/wizard-sessions/{id}/save-about
///
/// Create the card on first save (or update it when editing), then advance
/// to Links. Requires a theme and at least two filled, enabled fields.
pub async fn save_about(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SavedResponse>>> {
    let (_, mut wizard) = load_active(&state, id, auth.user_id).await?;
    require_step(&wizard, WizardStep::About)?;

    let content = CardContent::from_draft(wizard.draft())?;
    let card = match wizard.card_id() {
        Some(card_id) => CardRepo::update_content(&state.pool, card_id, &content)
            .await?
            .ok_or_else(|| card_missing(card_id))?,
        None => {
            let card = CardRepo::create(&state.pool, auth.user_id, new_share_id(), &content).await?;
            wizard.set_card_id(card.id);
            tracing::info!(card_id = card.id, user_id = auth.user_id, "Card created");
            card
        }
    };
    wizard.go_to_step(WizardStep::Links.index());
    let session = store(&state, id, &wizard).await?;

    tracing::info!(session_id = id, card_id = card.id, "About saved");
    Ok(Json(DataResponse {
        data: saved(&state, session, card),
    }))
}

/// POST /api/v1/wizard-sessions/{id}/save-links
///
/// Normalize the handles into links, store them on the card, and advance to
/// Lead Capture. Blank handles remove their link.
pub async fn save_links(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SaveLinksRequest>,
) -> AppResult<Json<DataResponse<SavedResponse>>> {
    let (_, mut wizard) = load_active(&state, id, auth.user_id).await?;
    require_step(&wizard, WizardStep::Links)?;
    let card_id = require_card(&wizard)?;

    wizard.dispatch(WizardAction::SetSocialHandles {
        handles: input.handles,
    })?;
    let links = encode("social links", serde_json::to_value(&wizard.draft().social_links))?;
    let card = CardRepo::update_social_links(&state.pool, card_id, &links)
        .await?
        .ok_or_else(|| card_missing(card_id))?;

    wizard.go_to_step(WizardStep::LeadCapture.index());
    let session = store(&state, id, &wizard).await?;

    tracing::info!(
        session_id = id,
        card_id,
        links = wizard.draft().social_links.len(),
        "Links saved"
    );
    Ok(Json(DataResponse {
        data: saved(&state, session, card),
    }))
}

/// POST /api/v1/wizard-sessions/{id}/save-lead-capture
///
/// Store the lead form configuration on the card and advance to Email.
pub async fn save_lead_capture(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(config): Json<LeadCaptureConfig>,
) -> AppResult<Json<DataResponse<SavedResponse>>> {
    let (_, mut wizard) = load_active(&state, id, auth.user_id).await?;
    require_step(&wizard, WizardStep::LeadCapture)?;
    let card_id = require_card(&wizard)?;

    wizard.dispatch(WizardAction::SetLeadCapture { config })?;
    let lead_capture = encode("lead capture", serde_json::to_value(&wizard.draft().lead_capture))?;
    let card = CardRepo::update_lead_capture(&state.pool, card_id, &lead_capture)
        .await?
        .ok_or_else(|| card_missing(card_id))?;

    wizard.go_to_step(WizardStep::Email.index());
    let session = store(&state, id, &wizard).await?;

    tracing::info!(session_id = id, card_id, "Lead capture saved");
    Ok(Json(DataResponse {
        data: saved(&state, session, card),
    }))
}

/// POST /api/v1/wizard-sessions/{id}/complete
///
/// Finish the wizard from the Email step. Returns the card with its share URL.
pub async fn complete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SavedResponse>>> {
    let (_, wizard) = load_active(&state, id, auth.user_id).await?;
    require_step(&wizard, WizardStep::Email)?;
    let card_id = require_card(&wizard)?;
    let card = find_owned_card(&state, card_id, auth.user_id).await?;

    let session = WizardSessionRepo::set_status(&state.pool, id, WizardStatus::Completed)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WizardSession",
            id,
        }))?;

    tracing::info!(session_id = id, card_id, "Wizard completed");
    Ok(Json(DataResponse {
        data: saved(&state, WizardView::new(&session, &wizard)?, card),
    }))
}

/// POST /api/v1/wizard-sessions/{id}/abandon
pub async fn abandon(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<WizardView>>> {
    let (_, wizard) = load_active(&state, id, auth.user_id).await?;
    let session = WizardSessionRepo::set_status(&state.pool, id, WizardStatus::Abandoned)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WizardSession",
            id,
        }))?;

    tracing::info!(session_id = id, "Wizard abandoned");
    Ok(Json(DataResponse {
        data: WizardView::new(&session, &wizard)?,
    }))
}
