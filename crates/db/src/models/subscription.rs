//! Subscription model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use onlycard_core::activity::SubscriptionDisplay;
use onlycard_core::types::{DbId, Timestamp};

/// A row from the `subscriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub user_id: DbId,
    pub plan_name: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subscription {
    pub fn display(&self, now: Timestamp) -> SubscriptionDisplay {
        SubscriptionDisplay::new(self.plan_name.clone(), self.starts_at, self.ends_at, now)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubscription {
    pub user_id: DbId,
    pub plan_name: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}
