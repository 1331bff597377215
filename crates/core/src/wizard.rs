//! Card-creation wizard state machine.
//!
//! The wizard owns an explicit `{step, draft}` pair (plus the id of the card
//! once the draft has been saved). Every step view talks to it through the
//! same contract: read the [`Wizard`], send a [`WizardAction`].
//!
//! Transitions either move to an explicitly targeted step or to the adjacent
//! one. Moving forward past a step is refused while that step's minimum input
//! is missing: Theme needs a selected theme, About needs
//! [`MIN_FILLED_FIELDS`](crate::fields::MIN_FILLED_FIELDS) filled fields.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::card::{CardDraft, CardType, ImageSlot};
use crate::error::CoreError;
use crate::fields::{self, FieldKey};
use crate::lead_capture::LeadCaptureConfig;
use crate::platform::{normalize_all, normalize_link, Platform};
use crate::theme::ThemeId;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Theme,
    About,
    Links,
    LeadCapture,
    Email,
}

/// Number of wizard steps.
pub const STEP_COUNT: usize = 5;

impl WizardStep {
    pub const ALL: [WizardStep; STEP_COUNT] = [
        Self::Theme,
        Self::About,
        Self::Links,
        Self::LeadCapture,
        Self::Email,
    ];

    /// Zero-based position of the step.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Theme => "Theme",
            Self::About => "About",
            Self::Links => "Links",
            Self::LeadCapture => "Lead Capture",
            Self::Email => "Email",
        }
    }

    pub fn is_last(self) -> bool {
        self.index() == STEP_COUNT - 1
    }
}

/// Lifecycle of a persisted wizard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStatus {
    InProgress,
    Completed,
    Abandoned,
}

impl WizardStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "abandoned" => Ok(Self::Abandoned),
            _ => Err(CoreError::Validation(format!(
                "Invalid wizard status '{s}'. Must be one of: in_progress, completed, abandoned"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }
}

// ---------------------------------------------------------------------------
// Persistence seam
// ---------------------------------------------------------------------------

/// Writes the wizard needs to make while it runs.
#[async_trait]
pub trait CardWriter: Send + Sync {
    /// Update the theme of an already-saved card in place.
    async fn update_theme(&self, card_id: DbId, theme: ThemeId) -> Result<(), CoreError>;
}

/// Result of the best-effort theme write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum PersistOutcome {
    /// The draft has no card yet; the theme is saved with it later.
    Deferred,
    Persisted,
    Failed(String),
}

/// What [`Wizard::record_theme_selection`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeSelection {
    pub theme: ThemeId,
    pub persist: PersistOutcome,
    pub advanced: bool,
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// In-memory edits and navigation a step view can request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardAction {
    GoToStep { index: usize },
    Advance,
    GoBack,
    SetCardType { card_type: CardType },
    SetImage { slot: ImageSlot, handle: Option<String> },
    SetField { key: FieldKey, value: String },
    ToggleField { key: FieldKey },
    SetFieldEnabled { key: FieldKey, enabled: bool },
    SetSocialHandle { platform: Platform, handle: String },
    /// Replace every link at once; keys are storage fields such as
    /// `instagram_username`.
    SetSocialHandles { handles: BTreeMap<String, String> },
    SetLeadCapture { config: LeadCaptureConfig },
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wizard {
    step: WizardStep,
    draft: CardDraft,
    card_id: Option<DbId>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// A fresh wizard on the Theme step with an empty draft.
    pub fn new() -> Self {
        Self {
            step: WizardStep::Theme,
            draft: CardDraft::default(),
            card_id: None,
        }
    }

    /// Edit an existing card: starts on About with the card's identity, or on
    /// Theme if the draft has no theme to stand on.
    pub fn from_card(card_id: DbId, draft: CardDraft) -> Self {
        let step = if draft.theme.is_some() {
            WizardStep::About
        } else {
            WizardStep::Theme
        };
        Self {
            step,
            draft,
            card_id: Some(card_id),
        }
    }

    /// Rebuild a wizard from persisted parts.
    pub fn resume(step: WizardStep, draft: CardDraft, card_id: Option<DbId>) -> Self {
        Self {
            step,
            draft,
            card_id,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &CardDraft {
        &self.draft
    }

    pub fn card_id(&self) -> Option<DbId> {
        self.card_id
    }

    /// Record the identity assigned on the first successful save.
    pub fn set_card_id(&mut self, card_id: DbId) {
        self.card_id = Some(card_id);
    }

    /// Whether the About save action is enabled.
    pub fn can_save_about(&self) -> bool {
        fields::can_save_about(&self.draft.fields, &self.draft.field_enabled)
    }

    /// Whether the minimum input for `step` is present.
    pub fn step_satisfied(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Theme => self.draft.theme.is_some(),
            WizardStep::About => self.can_save_about(),
            WizardStep::Links | WizardStep::LeadCapture | WizardStep::Email => true,
        }
    }

    /// Move to step `index`. Out-of-range indices and forward jumps past an
    /// unsatisfied step are no-ops. Returns whether the step changed.
    pub fn go_to_step(&mut self, index: usize) -> bool {
        let Some(target) = WizardStep::from_index(index) else {
            return false;
        };
        if target == self.step {
            return false;
        }
        if target > self.step {
            let blocked = WizardStep::ALL[self.step.index()..target.index()]
                .iter()
                .any(|&s| !self.step_satisfied(s));
            if blocked {
                return false;
            }
        }
        self.step = target;
        true
    }

    /// Move to the next step. No-op on the last step.
    pub fn advance(&mut self) -> bool {
        self.go_to_step(self.step.index() + 1)
    }

    /// Move to the previous step. No-op on the first step.
    pub fn go_back(&mut self) -> bool {
        match self.step.index().checked_sub(1) {
            Some(prev) => self.go_to_step(prev),
            None => false,
        }
    }

    /// Apply an in-memory action. Returns whether anything changed.
    pub fn dispatch(&mut self, action: WizardAction) -> Result<bool, CoreError> {
        let changed = match action {
            WizardAction::GoToStep { index } => self.go_to_step(index),
            WizardAction::Advance => self.advance(),
            WizardAction::GoBack => self.go_back(),
            WizardAction::SetCardType { card_type } => {
                let changed = self.draft.card_type != card_type;
                self.draft.card_type = card_type;
                changed
            }
            WizardAction::SetImage { slot, handle } => {
                let before = self.draft.clone();
                self.draft.set_image(slot, handle);
                before != self.draft
            }
            WizardAction::SetField { key, value } => {
                let changed = self.draft.fields.get(key) != value;
                self.draft.fields.set(key, value);
                changed
            }
            WizardAction::ToggleField { key } => {
                self.draft.field_enabled.toggle(key);
                true
            }
            WizardAction::SetFieldEnabled { key, enabled } => {
                let changed = self.draft.field_enabled.get(key) != enabled;
                self.draft.field_enabled.set(key, enabled);
                changed
            }
            WizardAction::SetSocialHandle { platform, handle } => {
                self.set_social_handle(platform, handle)
            }
            WizardAction::SetSocialHandles { handles } => self.set_social_handles(handles)?,
            WizardAction::SetLeadCapture { config } => {
                let config = config.normalized()?;
                let changed = self.draft.lead_capture != config;
                self.draft.lead_capture = config;
                changed
            }
        };
        Ok(changed)
    }

    fn set_social_handle(&mut self, platform: Platform, handle: String) -> bool {
        let before = self.draft.social_links.get(&platform).cloned();
        match normalize_link(platform, &handle) {
            Some(url) => {
                self.draft.social_links.insert(platform, url);
                self.draft.social_handles.insert(platform, handle.trim().to_string());
            }
            None => {
                self.draft.social_links.remove(&platform);
                self.draft.social_handles.remove(&platform);
            }
        }
        before.as_ref() != self.draft.social_links.get(&platform)
    }

    fn set_social_handles(&mut self, handles: BTreeMap<String, String>) -> Result<bool, CoreError> {
        let links = normalize_all(handles.iter().map(|(f, h)| (f.as_str(), h.as_str())))?;
        let raw = handles
            .iter()
            .filter_map(|(field, handle)| {
                let platform = Platform::from_field(field)?;
                let handle = handle.trim();
                (!handle.is_empty()).then(|| (platform, handle.to_string()))
            })
            .collect();
        let changed = self.draft.social_links != links;
        self.draft.social_links = links;
        self.draft.social_handles = raw;
        Ok(changed)
    }

    /// Select a theme, persist it if the card already exists, then advance
    /// to About when the selection was made on the Theme step. Re-selecting
    /// from a later step keeps the current step.
    ///
    /// The write is awaited before the transition. A failed write is logged
    /// and reported in the outcome but does not keep the wizard on Theme.
    pub async fn record_theme_selection(
        &mut self,
        theme: ThemeId,
        writer: &dyn CardWriter,
    ) -> ThemeSelection {
        self.draft.theme = Some(theme);

        let persist = match self.card_id {
            None => PersistOutcome::Deferred,
            Some(card_id) => match writer.update_theme(card_id, theme).await {
                Ok(()) => {
                    tracing::debug!(card_id, theme = theme.as_str(), "Theme persisted");
                    PersistOutcome::Persisted
                }
                Err(e) => {
                    tracing::warn!(card_id, theme = theme.as_str(), error = %e, "Theme update failed");
                    PersistOutcome::Failed(e.to_string())
                }
            },
        };

        let advanced = self.step == WizardStep::Theme && self.advance();

        ThemeSelection {
            theme,
            persist,
            advanced,
        }
    }
}
