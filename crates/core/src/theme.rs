//! Card themes and the shared theme dispatch table.
//!
//! Both front ends (mobile card list and web preview) resolve a stored theme
//! identifier through [`dispatch`]. They differ only in what happens when the
//! identifier is not something their surface can draw:
//!
//! - mobile falls back to [`ThemeId::HangingGlass`];
//! - web shows an explicit "Unknown theme" marker, and does not support the
//!   mobile-only [`ThemeId::StaticCard`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Marker text shown by the web preview for undrawable themes.
pub const UNKNOWN_THEME_MARKER: &str = "Unknown theme";

/// A known card theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeId {
    #[serde(rename = "theme-hanging-glass")]
    HangingGlass,
    #[serde(rename = "theme-cover-social")]
    CoverSocial,
    #[serde(rename = "theme-classic-dark")]
    ClassicDark,
    #[serde(rename = "theme-static-card")]
    StaticCard,
}

impl ThemeId {
    pub const ALL: [ThemeId; 4] = [
        Self::HangingGlass,
        Self::CoverSocial,
        Self::ClassicDark,
        Self::StaticCard,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HangingGlass => "theme-hanging-glass",
            Self::CoverSocial => "theme-cover-social",
            Self::ClassicDark => "theme-classic-dark",
            Self::StaticCard => "theme-static-card",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HangingGlass => "Hanging Glass",
            Self::CoverSocial => "Cover Social",
            Self::ClassicDark => "Classic Dark",
            Self::StaticCard => "Static Card",
        }
    }

    /// Preview asset shown in the theme picker.
    pub fn preview_asset(self) -> &'static str {
        match self {
            Self::HangingGlass => "theme.png",
            Self::CoverSocial => "theme1.png",
            Self::ClassicDark => "theme2.png",
            Self::StaticCard => "theme6.png",
        }
    }

    /// Parse a stored identifier. Surrounding whitespace and case are ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == normalized)
    }

    /// Like [`ThemeId::parse`] but rejects unknown identifiers.
    pub fn parse_strict(raw: &str) -> Result<Self, CoreError> {
        Self::parse(raw).ok_or_else(|| {
            CoreError::Validation(format!(
                "Unknown theme '{raw}'. Must be one of: {}",
                Self::ALL.map(Self::as_str).join(", ")
            ))
        })
    }

    /// Whether `surface` can draw this theme.
    pub fn supported_on(self, surface: Surface) -> bool {
        match surface {
            Surface::Mobile => true,
            Surface::Web => self != Self::StaticCard,
        }
    }
}

/// Where a card is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Mobile,
    Web,
}

/// What a surface should draw for a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Themed(ThemeId),
    /// Web-only placeholder for undrawable themes.
    Unknown,
}

impl ThemeVariant {
    /// Identifier of the drawn theme, or the unknown marker.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Themed(theme) => theme.as_str(),
            Self::Unknown => UNKNOWN_THEME_MARKER,
        }
    }
}

impl Serialize for ThemeVariant {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Resolve a stored theme identifier to the variant `surface` should draw.
pub fn dispatch(surface: Surface, stored: Option<&str>) -> ThemeVariant {
    match (stored.and_then(ThemeId::parse), surface) {
        (Some(theme), s) if theme.supported_on(s) => ThemeVariant::Themed(theme),
        (_, Surface::Mobile) => ThemeVariant::Themed(ThemeId::HangingGlass),
        (_, Surface::Web) => ThemeVariant::Unknown,
    }
}
