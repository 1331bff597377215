//! Card types and the in-progress card draft.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::fields::{AboutFields, FieldToggles};
use crate::lead_capture::LeadCaptureConfig;
use crate::platform::{Platform, SocialLinks};
use crate::theme::ThemeId;

/// Personal or business card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Personal,
    #[default]
    Business,
}

impl CardType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Business => "business",
        }
    }

    /// Parse a card type string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "personal" => Ok(Self::Personal),
            "business" => Ok(Self::Business),
            _ => Err(CoreError::Validation(format!(
                "Invalid card type '{s}'. Must be one of: personal, business"
            ))),
        }
    }

    pub fn is_business(self) -> bool {
        self == Self::Business
    }
}

/// Which uploaded image a handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSlot {
    Profile,
    Cover,
    Logo,
}

/// Card state accumulated across the wizard steps before it is saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardDraft {
    pub card_type: CardType,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub logo_image: Option<String>,
    pub fields: AboutFields,
    pub field_enabled: FieldToggles,
    pub theme: Option<ThemeId>,
    pub social_links: SocialLinks,
    /// Raw handles as typed on the Links step, keyed by platform.
    pub social_handles: std::collections::BTreeMap<Platform, String>,
    pub lead_capture: LeadCaptureConfig,
}

impl CardDraft {
    /// Mirrors `card_type`; stored alongside it for the front ends.
    pub fn has_business_card(&self) -> bool {
        self.card_type.is_business()
    }

    pub fn set_image(&mut self, slot: ImageSlot, handle: Option<String>) {
        let handle = handle.map(|h| h.trim().to_string()).filter(|h| !h.is_empty());
        match slot {
            ImageSlot::Profile => self.profile_image = handle,
            ImageSlot::Cover => self.cover_image = handle,
            ImageSlot::Logo => self.logo_image = handle,
        }
    }

    /// Field values as they appear on the card: disabled fields are blanked.
    pub fn visible_fields(&self) -> AboutFields {
        let mut visible = AboutFields::default();
        for key in crate::fields::FieldKey::ALL {
            if self.field_enabled.get(key) {
                visible.set(key, self.fields.get(key).trim().to_string());
            }
        }
        visible
    }

    /// The theme a draft must carry before it becomes a card.
    pub fn require_theme(&self) -> Result<ThemeId, CoreError> {
        self.theme.ok_or_else(|| {
            CoreError::Validation("A theme must be selected before the card is saved".into())
        })
    }
}
