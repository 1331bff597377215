//! Repository for the `contacts` table.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use onlycard_core::types::DbId;

use crate::models::contact::{Contact, CreateContact};

const COLUMNS: &str = "id, card_id, first_name, last_name, email, mobile, designation, note, \
                        form_header, disclaimer, created_at, updated_at";

pub struct ContactRepo;

impl ContactRepo {
    pub async fn create(pool: &PgPool, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        let s = &input.submission;
        let query = format!(
            "INSERT INTO contacts (card_id, first_name, last_name, email, mobile, designation,
                                   note, form_header, disclaimer)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(input.card_id)
            .bind(&s.first_name)
            .bind(&s.last_name)
            .bind(&s.email)
            .bind(&s.mobile)
            .bind(&s.designation)
            .bind(&s.note)
            .bind(&input.form_header)
            .bind(&input.disclaimer)
            .fetch_one(pool)
            .await
    }

    /// Contacts captured on any card owned by `user_id`, newest first.
    pub async fn list_for_owner(pool: &PgPool, user_id: DbId) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM contacts c
             JOIN cards k ON k.id = c.card_id
             WHERE k.user_id = $1
             ORDER BY c.created_at DESC, c.id DESC",
            prefixed_columns("c")
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// `(all time, last 7 days)` lead counts across a user's cards.
    pub async fn count_for_owner(pool: &PgPool, user_id: DbId) -> Result<(i64, i64), sqlx::Error> {
        let since = Utc::now() - Duration::days(7);
        sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE c.created_at >= $2)
             FROM contacts c
             JOIN cards k ON k.id = c.card_id
             WHERE k.user_id = $1",
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(pool)
        .await
    }
}

fn prefixed_columns(alias: &str) -> String {
    COLUMNS
        .split(',')
        .map(|c| format!("{alias}.{}", c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}
