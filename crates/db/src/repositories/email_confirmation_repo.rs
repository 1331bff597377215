//! Repository for the `email_confirmations` table.

use sqlx::PgPool;

use crate::models::email_confirmation::{CreateEmailConfirmation, EmailConfirmation};

const COLUMNS: &str = "id, user_id, code_hash, expires_at, used_at, created_at, updated_at";

pub struct EmailConfirmationRepo;

impl EmailConfirmationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateEmailConfirmation,
    ) -> Result<EmailConfirmation, sqlx::Error> {
        let query = format!(
            "INSERT INTO email_confirmations (user_id, code_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmailConfirmation>(&query)
            .bind(input.user_id)
            .bind(&input.code_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Atomically mark an unused, unexpired code as used.
    ///
    /// Returns `None` when the code is unknown, already used, or expired.
    pub async fn consume(
        pool: &PgPool,
        code_hash: &str,
    ) -> Result<Option<EmailConfirmation>, sqlx::Error> {
        let query = format!(
            "UPDATE email_confirmations SET used_at = NOW()
             WHERE code_hash = $1 AND used_at IS NULL AND expires_at > NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmailConfirmation>(&query)
            .bind(code_hash)
            .fetch_optional(pool)
            .await
    }
}
