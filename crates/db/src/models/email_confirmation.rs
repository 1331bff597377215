//! Email confirmation codes issued at signup.

use sqlx::FromRow;
use onlycard_core::types::{DbId, Timestamp};

/// A row from the `email_confirmations` table. Only the code hash is stored.
#[derive(Debug, Clone, FromRow)]
pub struct EmailConfirmation {
    pub id: DbId,
    pub user_id: DbId,
    pub code_hash: String,
    pub expires_at: Timestamp,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

pub struct CreateEmailConfirmation {
    pub user_id: DbId,
    pub code_hash: String,
    pub expires_at: Timestamp,
}
