//! Per-user profile model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use onlycard_core::activity::profile_completion;
use onlycard_core::types::{DbId, Timestamp};

/// A row from the `profiles` table. One per user, created at signup.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    pub full_name: Option<String>,
    pub designation: Option<String>,
    pub company: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub mobile: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Profile {
    /// Share of profile fields filled in, 0..=100.
    pub fn completion_percent(&self) -> u8 {
        profile_completion([
            self.full_name.as_deref(),
            self.designation.as_deref(),
            self.company.as_deref(),
            self.avatar_url.as_deref(),
            self.bio.as_deref(),
            self.mobile.as_deref(),
            self.website.as_deref(),
            self.address.as_deref(),
        ])
    }
}

/// DTO for updating a profile. All fields are optional; `None` keeps the
/// stored value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(length(max = 200))]
    pub full_name: Option<String>,
    #[validate(length(max = 200))]
    pub designation: Option<String>,
    #[validate(length(max = 200))]
    pub company: Option<String>,
    #[validate(length(max = 2048))]
    pub avatar_url: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[validate(length(max = 40))]
    pub mobile: Option<String>,
    #[validate(length(max = 2048))]
    pub website: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
}
