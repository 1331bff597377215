//! Lead-capture form configuration and contact submission validation.
//!
//! A card owner configures which fields the "share your contact" form on the
//! web preview asks for. Email is always collected; it is the only way the
//! owner can reach the lead.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

/// Default form header shown above the contact form.
pub const DEFAULT_FORM_HEADER: &str = "Share Back Your Contact";

/// Default disclaimer shown under the form header.
pub const DEFAULT_DISCLAIMER: &str = "We won't sell or share your data";

/// Maximum length of the configurable header and disclaimer.
pub const MAX_FORM_TEXT_LEN: usize = 200;

/// A field on the lead-capture form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    FirstName,
    LastName,
    Mobile,
    Email,
    Designation,
    Note,
}

impl LeadField {
    pub const ALL: [LeadField; 6] = [
        Self::FirstName,
        Self::LastName,
        Self::Mobile,
        Self::Email,
        Self::Designation,
        Self::Note,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Mobile => "mobile",
            Self::Email => "email",
            Self::Designation => "designation",
            Self::Note => "note",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Mobile => "Mobile",
            Self::Email => "Email",
            Self::Designation => "Designation",
            Self::Note => "Note",
        }
    }
}

/// Which lead fields the form shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadFieldToggles {
    pub first_name: bool,
    pub last_name: bool,
    pub mobile: bool,
    pub email: bool,
    pub designation: bool,
    pub note: bool,
}

impl Default for LeadFieldToggles {
    fn default() -> Self {
        Self {
            first_name: true,
            last_name: true,
            mobile: true,
            email: true,
            designation: true,
            note: true,
        }
    }
}

impl LeadFieldToggles {
    /// Whether `field` is collected. Email always is.
    pub fn is_enabled(&self, field: LeadField) -> bool {
        match field {
            LeadField::FirstName => self.first_name,
            LeadField::LastName => self.last_name,
            LeadField::Mobile => self.mobile,
            LeadField::Email => true,
            LeadField::Designation => self.designation,
            LeadField::Note => self.note,
        }
    }

    pub fn set(&mut self, field: LeadField, enabled: bool) {
        match field {
            LeadField::FirstName => self.first_name = enabled,
            LeadField::LastName => self.last_name = enabled,
            LeadField::Mobile => self.mobile = enabled,
            LeadField::Email => self.email = enabled,
            LeadField::Designation => self.designation = enabled,
            LeadField::Note => self.note = enabled,
        }
    }
}

/// Lead-capture configuration stored on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadCaptureConfig {
    pub form_header: String,
    pub disclaimer: String,
    pub fields: LeadFieldToggles,
}

impl Default for LeadCaptureConfig {
    fn default() -> Self {
        Self {
            form_header: DEFAULT_FORM_HEADER.to_string(),
            disclaimer: DEFAULT_DISCLAIMER.to_string(),
            fields: LeadFieldToggles::default(),
        }
    }
}

impl LeadCaptureConfig {
    /// Fields the form renders, in display order.
    pub fn visible_fields(&self) -> Vec<LeadField> {
        LeadField::ALL
            .into_iter()
            .filter(|&f| self.fields.is_enabled(f))
            .collect()
    }

    /// Trim the texts, restore defaults for blanks, and enforce length limits.
    pub fn normalized(mut self) -> Result<Self, CoreError> {
        self.form_header = self.form_header.trim().to_string();
        self.disclaimer = self.disclaimer.trim().to_string();
        if self.form_header.is_empty() {
            self.form_header = DEFAULT_FORM_HEADER.to_string();
        }
        if self.disclaimer.is_empty() {
            self.disclaimer = DEFAULT_DISCLAIMER.to_string();
        }
        for (name, text) in [("Form header", &self.form_header), ("Disclaimer", &self.disclaimer)] {
            if text.chars().count() > MAX_FORM_TEXT_LEN {
                return Err(CoreError::Validation(format!(
                    "{name} must be at most {MAX_FORM_TEXT_LEN} characters"
                )));
            }
        }
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Contact submissions
// ---------------------------------------------------------------------------

/// A contact shared back through a card's web preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ContactSubmission {
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(email(message = "Please enter a valid email."))]
    pub email: String,
    #[validate(length(max = 40))]
    pub mobile: Option<String>,
    #[validate(length(max = 100))]
    pub designation: Option<String>,
    #[validate(length(max = 2000))]
    pub note: Option<String>,
}

fn clean(value: Option<String>, enabled: bool) -> Option<String> {
    if !enabled {
        return None;
    }
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ContactSubmission {
    /// Trim every value, drop fields the form does not collect, and validate.
    pub fn prepare(self, config: &LeadCaptureConfig) -> Result<Self, CoreError> {
        let toggles = &config.fields;
        let prepared = Self {
            first_name: clean(self.first_name, toggles.is_enabled(LeadField::FirstName)),
            last_name: clean(self.last_name, toggles.is_enabled(LeadField::LastName)),
            email: self.email.trim().to_string(),
            mobile: clean(self.mobile, toggles.is_enabled(LeadField::Mobile)),
            designation: clean(self.designation, toggles.is_enabled(LeadField::Designation)),
            note: clean(self.note, toggles.is_enabled(LeadField::Note)),
        };
        prepared
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        Ok(prepared)
    }
}
