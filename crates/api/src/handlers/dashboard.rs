//! Handlers for the home dashboard.
//!
//! All endpoints require authentication via [`AuthUser`].

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use onlycard_core::activity::{recent_activity as newest, ActivityItem, Insights};
use onlycard_core::card::CardType;
use onlycard_db::repositories::{CardRepo, ContactRepo, SubscriptionRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::DateFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/activity?date=YYYY-MM-DD
///
/// The caller's most recently created cards, optionally for one UTC day.
pub async fn recent_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DateFilterParams>,
) -> AppResult<Json<DataResponse<Vec<ActivityItem>>>> {
    let cards = CardRepo::list_by_user(&state.pool, auth.user_id, params.range()).await?;
    let items = cards
        .into_iter()
        .map(|card| {
            Ok(ActivityItem {
                card_id: card.id,
                card_type: CardType::from_str_db(&card.card_type)?,
                full_name: card.full_name,
                created_at: card.created_at,
            })
        })
        .collect::<Result<Vec<_>, onlycard_core::error::CoreError>>()?;

    Ok(Json(DataResponse {
        data: newest(items, params.date),
    }))
}

/// GET /api/v1/dashboard/insights
pub async fn insights(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Insights>>> {
    let counts = CardRepo::count_by_type(&state.pool, auth.user_id).await?;
    let (total_leads, leads_last_7_days) =
        ContactRepo::count_for_owner(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse {
        data: Insights {
            total_cards: counts.total,
            business_cards: counts.business,
            personal_cards: counts.personal,
            total_leads,
            leads_last_7_days,
        },
    }))
}

/// GET /api/v1/subscription
///
/// The current subscription with its elapsed progress, or 204 if the user
/// has none.
pub async fn subscription(State(state): State<AppState>, auth: AuthUser) -> AppResult<Response> {
    let Some(subscription) = SubscriptionRepo::find_current(&state.pool, auth.user_id).await? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };
    Ok(Json(DataResponse {
        data: subscription.display(Utc::now()),
    })
    .into_response())
}
