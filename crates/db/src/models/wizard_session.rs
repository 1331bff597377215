//! Server-side wizard session model.

use serde::Serialize;
use sqlx::FromRow;
use onlycard_core::card::CardDraft;
use onlycard_core::error::CoreError;
use onlycard_core::types::{DbId, Timestamp};
use onlycard_core::wizard::{Wizard, WizardStatus, WizardStep};

/// A row from the `wizard_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WizardSession {
    pub id: DbId,
    pub user_id: DbId,
    pub card_id: Option<DbId>,
    pub current_step: i32,
    pub draft: serde_json::Value,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl WizardSession {
    pub fn status(&self) -> Result<WizardStatus, CoreError> {
        WizardStatus::from_str_db(&self.status)
    }

    /// Rebuild the in-memory state machine from the row.
    pub fn to_wizard(&self) -> Result<Wizard, CoreError> {
        let step = usize::try_from(self.current_step)
            .ok()
            .and_then(WizardStep::from_index)
            .ok_or_else(|| {
                CoreError::Internal(format!(
                    "Wizard session {} has invalid step {}",
                    self.id, self.current_step
                ))
            })?;
        let draft: CardDraft = serde_json::from_value(self.draft.clone()).map_err(|e| {
            CoreError::Internal(format!("Wizard session {} has malformed draft: {e}", self.id))
        })?;
        Ok(Wizard::resume(step, draft, self.card_id))
    }
}

/// Persistable snapshot of a [`Wizard`].
#[derive(Debug, Clone)]
pub struct WizardSnapshot {
    pub card_id: Option<DbId>,
    pub current_step: i32,
    pub draft: serde_json::Value,
}

impl WizardSnapshot {
    pub fn of(wizard: &Wizard) -> Result<Self, CoreError> {
        let draft = serde_json::to_value(wizard.draft())
            .map_err(|e| CoreError::Internal(format!("Failed to encode wizard draft: {e}")))?;
        Ok(Self {
            card_id: wizard.card_id(),
            current_step: wizard.step().index() as i32,
            draft,
        })
    }
}
