//! Leads captured through a card's web preview.

use serde::Serialize;
use sqlx::FromRow;
use onlycard_core::lead_capture::{ContactSubmission, LeadCaptureConfig};
use onlycard_core::types::{DbId, Timestamp};

/// A row from the `contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contact {
    pub id: DbId,
    pub card_id: DbId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub mobile: Option<String>,
    pub designation: Option<String>,
    pub note: Option<String>,
    /// Form header shown when the contact was captured.
    pub form_header: String,
    pub disclaimer: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a captured contact.
#[derive(Debug, Clone)]
pub struct CreateContact {
    pub card_id: DbId,
    pub submission: ContactSubmission,
    pub form_header: String,
    pub disclaimer: String,
}

impl CreateContact {
    /// `submission` must already have gone through `ContactSubmission::prepare`.
    pub fn new(card_id: DbId, submission: ContactSubmission, config: &LeadCaptureConfig) -> Self {
        Self {
            card_id,
            submission,
            form_header: config.form_header.clone(),
            disclaimer: config.disclaimer.clone(),
        }
    }
}
