//! Handlers for saved cards.
//!
//! Every card is returned with the theme variant the mobile list draws and
//! its public share URL.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use onlycard_core::card::{CardType, ImageSlot};
use onlycard_core::error::CoreError;
use onlycard_core::fields::{AboutFields, FieldToggles};
use onlycard_core::lead_capture::LeadCaptureConfig;
use onlycard_core::platform::normalize_all;
use onlycard_core::share::share_url;
use onlycard_core::theme::{dispatch, Surface, ThemeId, ThemeVariant};
use onlycard_core::types::DbId;
use onlycard_db::models::card::{Card, CardContent};
use onlycard_db::repositories::CardRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::DateFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A card as the front ends consume it.
#[derive(Debug, Serialize)]
pub struct CardResponse {
    #[serde(flatten)]
    pub card: Card,
    /// Variant the mobile list renders; unknown themes fall back.
    pub theme_variant: ThemeVariant,
    pub share_url: String,
}

impl CardResponse {
    pub fn new(card: Card, public_base_url: &str) -> Self {
        Self {
            theme_variant: dispatch(Surface::Mobile, Some(&card.theme)),
            share_url: share_url(public_base_url, card.share_id),
            card,
        }
    }
}

/// Request body for `PUT /cards/{id}`. Absent fields keep their value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCardRequest {
    pub card_type: Option<CardType>,
    pub theme: Option<String>,
    /// Image handles; an empty string clears the slot.
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub logo_image: Option<String>,
    /// Replaces every About field.
    pub fields: Option<AboutFields>,
    /// Defaults to "enabled where filled" when `fields` is given alone.
    pub field_enabled: Option<FieldToggles>,
    /// Raw handles keyed by storage field, e.g. `instagram_username`.
    pub social_handles: Option<BTreeMap<String, String>>,
    pub lead_capture: Option<LeadCaptureConfig>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a card owned by `user_id` or fail with 404.
pub(crate) async fn find_owned_card(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Card> {
    CardRepo::find_owned(&state.pool, id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Card", id }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/cards?date=YYYY-MM-DD
///
/// List the caller's cards, newest first, optionally for one UTC day.
pub async fn list_cards(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DateFilterParams>,
) -> AppResult<Json<DataResponse<Vec<CardResponse>>>> {
    let cards = CardRepo::list_by_user(&state.pool, auth.user_id, params.range()).await?;
    let data = cards
        .into_iter()
        .map(|card| CardResponse::new(card, &state.config.public_base_url))
        .collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/cards/{id}
pub async fn get_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CardResponse>>> {
    let card = find_owned_card(&state, id, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: CardResponse::new(card, &state.config.public_base_url),
    }))
}

/// PUT /api/v1/cards/{id}
///
/// Applies the changes to the stored card and re-validates it as a whole:
/// the theme must be known and at least two enabled About fields filled.
pub async fn update_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCardRequest>,
) -> AppResult<Json<DataResponse<CardResponse>>> {
    let card = find_owned_card(&state, id, auth.user_id).await?;
    let mut draft = card.to_draft()?;

    if let Some(card_type) = input.card_type {
        draft.card_type = card_type;
    }
    if let Some(theme) = input.theme.as_deref() {
        draft.theme = Some(ThemeId::parse_strict(theme)?);
    }
    for (slot, handle) in [
        (ImageSlot::Profile, input.profile_image),
        (ImageSlot::Cover, input.cover_image),
        (ImageSlot::Logo, input.logo_image),
    ] {
        if handle.is_some() {
            draft.set_image(slot, handle);
        }
    }
    match (input.fields, input.field_enabled) {
        (Some(fields), toggles) => {
            draft.field_enabled = toggles.unwrap_or_else(|| FieldToggles::from_values(&fields));
            draft.fields = fields;
        }
        (None, Some(toggles)) => draft.field_enabled = toggles,
        (None, None) => {}
    }
    if let Some(handles) = &input.social_handles {
        draft.social_links = normalize_all(handles.iter().map(|(f, h)| (f.as_str(), h.as_str())))?;
    }
    if let Some(lead_capture) = input.lead_capture {
        draft.lead_capture = lead_capture.normalized()?;
    }

    let content = CardContent::from_draft(&draft)?;
    let card = CardRepo::update_content(&state.pool, id, &content)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Card", id }))?;

    tracing::info!(card_id = id, user_id = auth.user_id, "Card updated");
    Ok(Json(DataResponse {
        data: CardResponse::new(card, &state.config.public_base_url),
    }))
}
