//! Dashboard analytics: recent activity, subscription progress, profile
//! completion, and insight counts.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::card::CardType;
use crate::types::{DbId, Timestamp};

/// How many cards the recent-activity feed shows.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// One entry of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityItem {
    pub card_id: DbId,
    pub full_name: String,
    pub card_type: CardType,
    pub created_at: Timestamp,
}

/// Keep the newest [`RECENT_ACTIVITY_LIMIT`] items, optionally restricted to
/// one UTC calendar day.
pub fn recent_activity(mut items: Vec<ActivityItem>, day: Option<NaiveDate>) -> Vec<ActivityItem> {
    if let Some(day) = day {
        items.retain(|item| item.created_at.date_naive() == day);
    }
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.card_id.cmp(&a.card_id)));
    items.truncate(RECENT_ACTIVITY_LIMIT);
    items
}

/// `[start, end)` bounds of a UTC calendar day.
pub fn day_bounds(day: NaiveDate) -> (Timestamp, Timestamp) {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    (start, start + chrono::Duration::days(1))
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// Elapsed share of a subscription period as a whole percentage, 0..=100.
pub fn subscription_progress(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> u8 {
    let total = (end - start).num_seconds();
    if total <= 0 {
        return if now >= end { 100 } else { 0 };
    }
    let elapsed = (now - start).num_seconds().clamp(0, total);
    ((elapsed * 100) / total) as u8
}

/// Subscription summary shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionDisplay {
    pub plan_name: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub progress_percent: u8,
    pub expired: bool,
}

impl SubscriptionDisplay {
    pub fn new(plan_name: String, starts_at: Timestamp, ends_at: Timestamp, now: Timestamp) -> Self {
        Self {
            progress_percent: subscription_progress(starts_at, ends_at, now),
            expired: now >= ends_at,
            plan_name,
            starts_at,
            ends_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Profile completion / insights
// ---------------------------------------------------------------------------

/// Percentage of non-blank values among `values`, rounded down.
pub fn profile_completion<'a, I>(values: I) -> u8
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let (filled, total) = values.into_iter().fold((0u32, 0u32), |(filled, total), v| {
        let is_filled = v.is_some_and(|s| !s.trim().is_empty());
        (filled + u32::from(is_filled), total + 1)
    });
    if total == 0 {
        return 0;
    }
    (filled * 100 / total) as u8
}

/// Headline counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Insights {
    pub total_cards: i64,
    pub business_cards: i64,
    pub personal_cards: i64,
    pub total_leads: i64,
    pub leads_last_7_days: i64,
}
