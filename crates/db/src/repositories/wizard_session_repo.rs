//! Repository for the `wizard_sessions` table.

use sqlx::PgPool;
use onlycard_core::types::DbId;
use onlycard_core::wizard::WizardStatus;

use crate::models::wizard_session::{WizardSession, WizardSnapshot};

const COLUMNS: &str = "id, user_id, card_id, current_step, draft, status, created_at, updated_at";

pub struct WizardSessionRepo;

impl WizardSessionRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        snapshot: &WizardSnapshot,
    ) -> Result<WizardSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO wizard_sessions (user_id, card_id, current_step, draft)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WizardSession>(&query)
            .bind(user_id)
            .bind(snapshot.card_id)
            .bind(snapshot.current_step)
            .bind(&snapshot.draft)
            .fetch_one(pool)
            .await
    }

    /// Find a session only if `user_id` owns it.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<WizardSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wizard_sessions WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, WizardSession>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite step, draft, and card id. Last write wins.
    pub async fn save_snapshot(
        pool: &PgPool,
        id: DbId,
        snapshot: &WizardSnapshot,
    ) -> Result<Option<WizardSession>, sqlx::Error> {
        let query = format!(
            "UPDATE wizard_sessions SET card_id = $2, current_step = $3, draft = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WizardSession>(&query)
            .bind(id)
            .bind(snapshot.card_id)
            .bind(snapshot.current_step)
            .bind(&snapshot.draft)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: WizardStatus,
    ) -> Result<Option<WizardSession>, sqlx::Error> {
        let query = format!(
            "UPDATE wizard_sessions SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WizardSession>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }
}
