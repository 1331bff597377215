//! Repository for the `subscriptions` table.

use sqlx::PgPool;
use onlycard_core::types::DbId;

use crate::models::subscription::{CreateSubscription, Subscription};

const COLUMNS: &str = "id, user_id, plan_name, starts_at, ends_at, created_at, updated_at";

pub struct SubscriptionRepo;

impl SubscriptionRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubscription,
    ) -> Result<Subscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscriptions (user_id, plan_name, starts_at, ends_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(input.user_id)
            .bind(&input.plan_name)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .fetch_one(pool)
            .await
    }

    /// The user's subscription with the latest end date, if any.
    pub async fn find_current(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions
             WHERE user_id = $1
             ORDER BY ends_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
