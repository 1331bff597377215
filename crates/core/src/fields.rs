//! About-step field registry and the save policy that gates it.
//!
//! The registry is a static, ordered list describing every editable "About"
//! attribute of a card. [`AboutFields`] and [`FieldToggles`] are the typed
//! value and visibility records keyed by [`FieldKey`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Field keys
// ---------------------------------------------------------------------------

/// One editable About attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    FullName,
    Designation,
    Company,
    Address,
    Mobile,
    Email,
    Website,
    Bio,
}

impl FieldKey {
    /// Every key, in registry order.
    pub const ALL: [FieldKey; 8] = [
        Self::FullName,
        Self::Designation,
        Self::Company,
        Self::Address,
        Self::Mobile,
        Self::Email,
        Self::Website,
        Self::Bio,
    ];

    /// Column / JSON name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Designation => "designation",
            Self::Company => "company",
            Self::Address => "address",
            Self::Mobile => "mobile",
            Self::Email => "email",
            Self::Website => "website",
            Self::Bio => "bio",
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Static description of an About field as rendered by the form.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldDef {
    pub key: FieldKey,
    pub label: &'static str,
    pub icon: &'static str,
    pub placeholder: &'static str,
}

/// The About fields in display order.
pub const ABOUT_FIELDS: [FieldDef; 8] = [
    FieldDef {
        key: FieldKey::FullName,
        label: "Full Name",
        icon: "checkmark-circle-outline",
        placeholder: "John Copper",
    },
    FieldDef {
        key: FieldKey::Designation,
        label: "Designation",
        icon: "checkmark-circle-outline",
        placeholder: "Graphic Designer",
    },
    FieldDef {
        key: FieldKey::Company,
        label: "Company Name",
        icon: "checkmark-circle-outline",
        placeholder: "Solution22",
    },
    FieldDef {
        key: FieldKey::Address,
        label: "Address",
        icon: "location-outline",
        placeholder: "Melbourne, Australia",
    },
    FieldDef {
        key: FieldKey::Mobile,
        label: "Mobile",
        icon: "call-outline",
        placeholder: "00 0000 0000",
    },
    FieldDef {
        key: FieldKey::Email,
        label: "Email",
        icon: "mail-outline",
        placeholder: "Solution22@gmail.com.au",
    },
    FieldDef {
        key: FieldKey::Website,
        label: "Website",
        icon: "checkmark-circle-outline",
        placeholder: "www.Solution22.com.au",
    },
    FieldDef {
        key: FieldKey::Bio,
        label: "Bio",
        icon: "document-text-outline",
        placeholder: "Write your bio...",
    },
];

/// Look up the registry entry for a key.
pub fn field_def(key: FieldKey) -> &'static FieldDef {
    // ABOUT_FIELDS is ordered exactly like FieldKey::ALL.
    &ABOUT_FIELDS[key as usize]
}

// ---------------------------------------------------------------------------
// Values and toggles
// ---------------------------------------------------------------------------

/// Text values of the About fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutFields {
    pub full_name: String,
    pub designation: String,
    pub company: String,
    pub address: String,
    pub mobile: String,
    pub email: String,
    pub website: String,
    pub bio: String,
}

impl AboutFields {
    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::FullName => &self.full_name,
            FieldKey::Designation => &self.designation,
            FieldKey::Company => &self.company,
            FieldKey::Address => &self.address,
            FieldKey::Mobile => &self.mobile,
            FieldKey::Email => &self.email,
            FieldKey::Website => &self.website,
            FieldKey::Bio => &self.bio,
        }
    }

    pub fn set(&mut self, key: FieldKey, value: String) {
        let slot = match key {
            FieldKey::FullName => &mut self.full_name,
            FieldKey::Designation => &mut self.designation,
            FieldKey::Company => &mut self.company,
            FieldKey::Address => &mut self.address,
            FieldKey::Mobile => &mut self.mobile,
            FieldKey::Email => &mut self.email,
            FieldKey::Website => &mut self.website,
            FieldKey::Bio => &mut self.bio,
        };
        *slot = value;
    }
}

/// Per-field visibility on the rendered card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldToggles {
    pub full_name: bool,
    pub designation: bool,
    pub company: bool,
    pub address: bool,
    pub mobile: bool,
    pub email: bool,
    pub website: bool,
    pub bio: bool,
}

impl Default for FieldToggles {
    /// A fresh draft shows every field.
    fn default() -> Self {
        Self::all(true)
    }
}

impl FieldToggles {
    pub fn all(enabled: bool) -> Self {
        Self {
            full_name: enabled,
            designation: enabled,
            company: enabled,
            address: enabled,
            mobile: enabled,
            email: enabled,
            website: enabled,
            bio: enabled,
        }
    }

    /// Enable exactly the fields that carry a value.
    ///
    /// Used when an existing card is loaded back for editing.
    pub fn from_values(fields: &AboutFields) -> Self {
        let mut toggles = Self::all(false);
        for key in FieldKey::ALL {
            toggles.set(key, !fields.get(key).is_empty());
        }
        toggles
    }

    pub fn get(&self, key: FieldKey) -> bool {
        match key {
            FieldKey::FullName => self.full_name,
            FieldKey::Designation => self.designation,
            FieldKey::Company => self.company,
            FieldKey::Address => self.address,
            FieldKey::Mobile => self.mobile,
            FieldKey::Email => self.email,
            FieldKey::Website => self.website,
            FieldKey::Bio => self.bio,
        }
    }

    pub fn set(&mut self, key: FieldKey, enabled: bool) {
        let slot = match key {
            FieldKey::FullName => &mut self.full_name,
            FieldKey::Designation => &mut self.designation,
            FieldKey::Company => &mut self.company,
            FieldKey::Address => &mut self.address,
            FieldKey::Mobile => &mut self.mobile,
            FieldKey::Email => &mut self.email,
            FieldKey::Website => &mut self.website,
            FieldKey::Bio => &mut self.bio,
        };
        *slot = enabled;
    }

    pub fn toggle(&mut self, key: FieldKey) {
        self.set(key, !self.get(key));
    }
}

// ---------------------------------------------------------------------------
// Save policy
// ---------------------------------------------------------------------------

/// Minimum number of enabled, non-blank fields before About can be saved.
pub const MIN_FILLED_FIELDS: usize = 2;

/// Count the fields that are both enabled and non-blank after trimming.
pub fn filled_count(fields: &AboutFields, toggles: &FieldToggles) -> usize {
    FieldKey::ALL
        .iter()
        .filter(|&&key| toggles.get(key) && !fields.get(key).trim().is_empty())
        .count()
}

/// Whether the About save action is enabled.
pub fn can_save_about(fields: &AboutFields, toggles: &FieldToggles) -> bool {
    filled_count(fields, toggles) >= MIN_FILLED_FIELDS
}

/// [`can_save_about`] as a `Result`, for callers that surface the reason.
pub fn validate_about(fields: &AboutFields, toggles: &FieldToggles) -> Result<(), CoreError> {
    let filled = filled_count(fields, toggles);
    if filled < MIN_FILLED_FIELDS {
        return Err(CoreError::Validation(format!(
            "At least {MIN_FILLED_FIELDS} enabled fields must be filled in (currently {filled})"
        )));
    }
    Ok(())
}
