//! Integration tests for the public web preview and the "Share Contact" form.

mod common;

use axum::http::StatusCode;
use common::{body_json, body_text, get, get_auth, post_form};
use onlycard_core::theme::ThemeId;
use onlycard_db::repositories::{CardRepo, ContactRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preview_renders_each_web_theme(pool: PgPool) {
    let (user_id, _) = common::create_confirmed_user(&pool, "jane@example.com").await;

    for (theme, class) in [
        (ThemeId::HangingGlass, r#"class="card glass""#),
        (ThemeId::CoverSocial, r#"class="card cover-social""#),
        (ThemeId::ClassicDark, r#"class="card dark""#),
    ] {
        let card = common::create_card(&pool, user_id, "Jane Doe", theme).await;
        let app = common::build_test_app(pool.clone());
        let response = get(app, &format!("/card/{}", card.share_id)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains(class), "{theme:?} should render {class}");
        assert!(html.contains("Jane Doe"));
        assert!(html.contains("Share Contact"));
        assert!(html.contains(&format!(r#"action="/card/{}/contact""#, card.share_id)));
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preview_marks_undrawable_themes(pool: PgPool) {
    let (user_id, _) = common::create_confirmed_user(&pool, "jane@example.com").await;
    let mobile_only = common::create_card(&pool, user_id, "Static", ThemeId::StaticCard).await;
    let unknown = common::create_card(&pool, user_id, "Unknown", ThemeId::HangingGlass).await;
    CardRepo::update_theme(&pool, unknown.id, "theme-unknown").await.unwrap();

    for card in [mobile_only, unknown] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, &format!("/card/{}", card.share_id)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Unknown theme"));
        assert!(!html.contains(r#"class="card glass""#));
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preview_missing_card(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/card/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Card not found"));

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/card/{}", uuid::Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Card not found"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_share_contact_is_stored_for_owner(pool: PgPool) {
    let (user_id, token) = common::create_confirmed_user(&pool, "jane@example.com").await;
    let card = common::create_card(&pool, user_id, "Jane Doe", ThemeId::CoverSocial).await;

    let app = common::build_test_app(pool.clone());
    let response = post_form(
        app,
        &format!("/card/{}/contact", card.share_id),
        "first_name=John&last_name=Smith&email=+john%40example.com+&mobile=&note=Met+at+the+expo",
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let html = body_text(response).await;
    assert!(html.contains("Your contact has been shared"));
    assert!(!html.contains("<form"));

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/contacts", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let contacts = json["data"].as_array().unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["card_id"], card.id);
    assert_eq!(contacts[0]["email"], "john@example.com");
    assert_eq!(contacts[0]["first_name"], "John");
    assert_eq!(contacts[0]["mobile"], serde_json::Value::Null);
    assert_eq!(contacts[0]["form_header"], "Share Back Your Contact");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_share_contact_rejects_invalid_email(pool: PgPool) {
    let (user_id, _) = common::create_confirmed_user(&pool, "jane@example.com").await;
    let card = common::create_card(&pool, user_id, "Jane Doe", ThemeId::ClassicDark).await;

    let app = common::build_test_app(pool.clone());
    let response = post_form(
        app,
        &format!("/card/{}/contact", card.share_id),
        "first_name=John&email=not-an-email",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains(r#"class="notice error""#));
    assert!(html.contains("<form"));

    let contacts = ContactRepo::list_for_owner(&pool, user_id).await.unwrap();
    assert!(contacts.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_share_contact_for_missing_card(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_form(
        app,
        &format!("/card/{}/contact", uuid::Uuid::new_v4()),
        "email=john%40example.com",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_share_contact_non_form_body_renders_page(pool: PgPool) {
    let (user_id, _) = common::create_confirmed_user(&pool, "jane@example.com").await;
    let card = common::create_card(&pool, user_id, "Jane Doe", ThemeId::ClassicDark).await;

    let app = common::build_test_app(pool.clone());
    let response = common::post_json(
        app,
        &format!("/card/{}/contact", card.share_id),
        serde_json::json!({ "email": "john@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let html = body_text(response).await;
    assert!(html.contains(r#"class="notice error""#));
    assert!(html.contains("Jane Doe"));

    let contacts = ContactRepo::list_for_owner(&pool, user_id).await.unwrap();
    assert!(contacts.is_empty());
}
