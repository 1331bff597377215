//! Integration tests for image uploads and the `/media` file server.

mod common;

use std::io::Cursor;

use axum::http::StatusCode;
use common::{body_bytes, body_json, get, post_file_auth};
use image::{ImageFormat, RgbImage};
use sqlx::PgPool;

fn png_bytes() -> Vec<u8> {
    let mut buf = Vec::new();
    RgbImage::new(3, 2)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_png_is_served_back(pool: PgPool) {
    let (_, token) = common::create_confirmed_user(&pool, "jane@example.com").await;
    let config = common::test_config();
    let png = png_bytes();

    let app = common::build_test_app_with(pool.clone(), config.clone());
    let response = post_file_auth(app, "/api/v1/uploads", &token, "avatar.bin", &png).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["content_type"], "image/png");
    assert_eq!(data["width"], 3);
    assert_eq!(data["height"], 2);
    assert_eq!(data["size_bytes"], png.len());
    let file_name = data["file_name"].as_str().unwrap().to_string();
    assert!(file_name.ends_with(".png"));
    assert_eq!(
        data["url"],
        format!("http://localhost:3000/media/{file_name}").as_str()
    );

    let app = common::build_test_app_with(pool, config.clone());
    let response = get(app, &format!("/media/{file_name}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, png);

    let _ = std::fs::remove_dir_all(&config.upload_dir);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_rejects_non_images(pool: PgPool) {
    let (_, token) = common::create_confirmed_user(&pool, "jane@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response =
        post_file_auth(app, "/api/v1/uploads", &token, "notes.png", b"just some text").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = post_file_auth(app, "/api/v1/uploads", &token, "empty.png", b"").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::post_json(app, "/api/v1/uploads", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
