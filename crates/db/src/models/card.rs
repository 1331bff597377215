//! Card entity model, the draft <-> row conversions, and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use onlycard_core::card::{CardDraft, CardType};
use onlycard_core::error::CoreError;
use onlycard_core::fields::{self, AboutFields, FieldToggles};
use onlycard_core::lead_capture::LeadCaptureConfig;
use onlycard_core::platform::{handle_from_link, SocialLinks};
use onlycard_core::theme::{dispatch, Surface, ThemeId, ThemeVariant};
use onlycard_core::types::{DbId, ShareId, Timestamp};

/// A row from the `cards` table.
///
/// `theme` is kept as the stored string; front ends resolve it through
/// `onlycard_core::theme::dispatch`. Disabled About fields are stored blank.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Card {
    pub id: DbId,
    pub share_id: ShareId,
    pub user_id: DbId,
    pub card_type: String,
    pub has_business_card: bool,
    pub theme: String,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub logo_image: Option<String>,
    pub full_name: String,
    pub designation: String,
    pub company: String,
    pub address: String,
    pub mobile: String,
    pub email: String,
    pub website: String,
    pub bio: String,
    pub social_links: serde_json::Value,
    pub lead_capture: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Card {
    pub fn fields(&self) -> AboutFields {
        AboutFields {
            full_name: self.full_name.clone(),
            designation: self.designation.clone(),
            company: self.company.clone(),
            address: self.address.clone(),
            mobile: self.mobile.clone(),
            email: self.email.clone(),
            website: self.website.clone(),
            bio: self.bio.clone(),
        }
    }

    pub fn parsed_social_links(&self) -> Result<SocialLinks, CoreError> {
        serde_json::from_value(self.social_links.clone()).map_err(|e| {
            CoreError::Internal(format!("Card {} has malformed social_links: {e}", self.id))
        })
    }

    /// Stored lead-capture config; an empty object yields the defaults.
    pub fn parsed_lead_capture(&self) -> Result<LeadCaptureConfig, CoreError> {
        serde_json::from_value(self.lead_capture.clone()).map_err(|e| {
            CoreError::Internal(format!("Card {} has malformed lead_capture: {e}", self.id))
        })
    }

    fn draft_theme(&self) -> Option<ThemeId> {
        match dispatch(Surface::Mobile, Some(&self.theme)) {
            ThemeVariant::Themed(theme) => Some(theme),
            ThemeVariant::Unknown => None,
        }
    }

    /// Load the card back into a draft for editing.
    ///
    /// Toggles are enabled exactly for the fields that carry a value. The
    /// theme resolves the way the mobile list draws it, so an unrecognized
    /// stored theme loads as the mobile fallback.
    pub fn to_draft(&self) -> Result<CardDraft, CoreError> {
        let fields = self.fields();
        let social_links = self.parsed_social_links()?;
        let social_handles = social_links
            .iter()
            .filter_map(|(&platform, url)| {
                handle_from_link(platform, url).map(|h| (platform, h.to_string()))
            })
            .collect();

        Ok(CardDraft {
            card_type: CardType::from_str_db(&self.card_type)?,
            profile_image: self.profile_image.clone(),
            cover_image: self.cover_image.clone(),
            logo_image: self.logo_image.clone(),
            field_enabled: FieldToggles::from_values(&fields),
            fields,
            theme: self.draft_theme(),
            social_links,
            social_handles,
            lead_capture: self.parsed_lead_capture()?,
        })
    }
}

/// Every mutable column of a card, derived from a finished draft.
#[derive(Debug, Clone)]
pub struct CardContent {
    pub card_type: String,
    pub theme: String,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub logo_image: Option<String>,
    pub fields: AboutFields,
    pub social_links: serde_json::Value,
    pub lead_capture: serde_json::Value,
}

impl CardContent {
    /// Validate `draft` for persistence: a theme is required and the About
    /// save policy must hold. Disabled fields are blanked.
    pub fn from_draft(draft: &CardDraft) -> Result<Self, CoreError> {
        let theme = draft.require_theme()?;
        fields::validate_about(&draft.fields, &draft.field_enabled)?;

        let to_json = |what: &str, value: Result<serde_json::Value, serde_json::Error>| {
            value.map_err(|e| CoreError::Internal(format!("Failed to encode {what}: {e}")))
        };

        Ok(Self {
            card_type: draft.card_type.as_str().to_string(),
            theme: theme.as_str().to_string(),
            profile_image: draft.profile_image.clone(),
            cover_image: draft.cover_image.clone(),
            logo_image: draft.logo_image.clone(),
            fields: draft.visible_fields(),
            social_links: to_json("social links", serde_json::to_value(&draft.social_links))?,
            lead_capture: to_json("lead capture", serde_json::to_value(&draft.lead_capture))?,
        })
    }
}

/// Per-type card counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, FromRow)]
pub struct CardCounts {
    pub total: i64,
    pub business: i64,
    pub personal: i64,
}
