//! HTTP-level integration tests for saved cards, contacts, and the dashboard.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, get_auth, put_json_auth};
use onlycard_core::theme::ThemeId;
use onlycard_db::models::subscription::CreateSubscription;
use onlycard_db::repositories::{CardRepo, SubscriptionRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_cards_with_mobile_theme_variant(pool: PgPool) {
    let (user_id, token) = common::create_confirmed_user(&pool, "jane@example.com").await;
    let first = common::create_card(&pool, user_id, "First", ThemeId::StaticCard).await;
    let second = common::create_card(&pool, user_id, "Second", ThemeId::ClassicDark).await;
    CardRepo::update_theme(&pool, first.id, "theme-unknown").await.unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/cards", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let cards = json["data"].as_array().unwrap();
    assert_eq!(cards.len(), 2);

    // Newest first.
    assert_eq!(cards[0]["id"], second.id);
    assert_eq!(cards[0]["theme_variant"], "theme-classic-dark");
    // Unknown stored themes fall back on mobile.
    assert_eq!(cards[1]["theme"], "theme-unknown");
    assert_eq!(cards[1]["theme_variant"], "theme-hanging-glass");
    assert_eq!(
        cards[1]["share_url"],
        format!("http://localhost:3000/card/{}", first.share_id).as_str()
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_cards_filters_by_day(pool: PgPool) {
    let (user_id, token) = common::create_confirmed_user(&pool, "jane@example.com").await;
    common::create_card(&pool, user_id, "Today", ThemeId::HangingGlass).await;

    let today = Utc::now().date_naive();
    let yesterday = today - Duration::days(1);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/cards?date={today}"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/cards?date={yesterday}"), &token).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/cards?date=not-a-date", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cards_are_private(pool: PgPool) {
    let (owner_id, _) = common::create_confirmed_user(&pool, "jane@example.com").await;
    let (_, other_token) = common::create_confirmed_user(&pool, "john@example.com").await;
    let card = common::create_card(&pool, owner_id, "Jane", ThemeId::HangingGlass).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/cards/{}", card.id), &other_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/cards/{}", card.id),
        &other_token,
        json!({ "theme": "theme-classic-dark" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/cards", &other_token).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_card(pool: PgPool) {
    let (user_id, token) = common::create_confirmed_user(&pool, "jane@example.com").await;
    let card = common::create_card(&pool, user_id, "Jane", ThemeId::HangingGlass).await;
    let uri = format!("/api/v1/cards/{}", card.id);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &uri,
        &token,
        json!({
            "card_type": "personal",
            "theme": "theme-cover-social",
            "fields": { "full_name": "Jane Doe", "website": "jane.dev" },
            "social_handles": { "linkedin_username": "janedoe" },
            "lead_capture": { "form_header": "Say hi", "fields": { "mobile": false } }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["card_type"], "personal");
    assert_eq!(data["has_business_card"], false);
    assert_eq!(data["theme_variant"], "theme-cover-social");
    assert_eq!(data["full_name"], "Jane Doe");
    // Fields replaced wholesale: the old company is gone.
    assert_eq!(data["company"], "");
    assert_eq!(data["website"], "jane.dev");
    assert_eq!(data["social_links"]["linkedin"], "https://linkedin.com/in/janedoe");
    assert_eq!(data["lead_capture"]["form_header"], "Say hi");
    assert_eq!(data["lead_capture"]["fields"]["mobile"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_card_validates(pool: PgPool) {
    let (user_id, token) = common::create_confirmed_user(&pool, "jane@example.com").await;
    let card = common::create_card(&pool, user_id, "Jane", ThemeId::HangingGlass).await;
    let uri = format!("/api/v1/cards/{}", card.id);

    // Only one field left filled.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &uri, &token, json!({ "fields": { "full_name": "Jane" } })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &uri, &token, json!({ "theme": "theme-neon" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &uri,
        &token,
        json!({ "social_handles": { "orkut_username": "jane" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was written.
    let stored = CardRepo::find_by_id(&pool, card.id).await.unwrap().unwrap();
    assert_eq!(stored.company, "Acme");
    assert_eq!(stored.theme, "theme-hanging-glass");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_card_with_unrecognized_theme(pool: PgPool) {
    let (user_id, token) = common::create_confirmed_user(&pool, "jane@example.com").await;
    let card = common::create_card(&pool, user_id, "Jane", ThemeId::CoverSocial).await;
    CardRepo::update_theme(&pool, card.id, "theme-unknown").await.unwrap();

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/cards/{}", card.id),
        &token,
        json!({ "card_type": "personal" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The edit keeps the theme the mobile list was already drawing.
    let json = body_json(response).await;
    assert_eq!(json["data"]["card_type"], "personal");
    assert_eq!(json["data"]["theme"], "theme-hanging-glass");
    assert_eq!(json["data"]["theme_variant"], "theme-hanging-glass");
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recent_activity_and_insights(pool: PgPool) {
    let (user_id, token) = common::create_confirmed_user(&pool, "jane@example.com").await;
    for i in 0..12 {
        common::create_card(&pool, user_id, &format!("Card {i}"), ThemeId::HangingGlass).await;
    }

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/activity", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(items[0]["full_name"], "Card 11");
    assert_eq!(items[0]["card_type"], "business");

    let yesterday = Utc::now().date_naive() - Duration::days(1);
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/activity?date={yesterday}"), &token).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/dashboard/insights", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total_cards"], 12);
    assert_eq!(json["data"]["business_cards"], 12);
    assert_eq!(json["data"]["personal_cards"], 0);
    assert_eq!(json["data"]["total_leads"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subscription(pool: PgPool) {
    let (user_id, token) = common::create_confirmed_user(&pool, "jane@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/subscription", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let now = Utc::now();
    SubscriptionRepo::create(
        &pool,
        &CreateSubscription {
            user_id,
            plan_name: "Pro".to_string(),
            starts_at: now - Duration::days(10),
            ends_at: now + Duration::days(10),
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/subscription", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["plan_name"], "Pro");
    assert_eq!(json["data"]["expired"], false);
    let progress = json["data"]["progress_percent"].as_u64().unwrap();
    assert!((49..=50).contains(&progress), "progress was {progress}");
}
