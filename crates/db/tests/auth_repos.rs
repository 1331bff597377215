//! Integration tests for users, sessions, and email confirmations.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use onlycard_core::account::generate_confirmation_code;
use onlycard_db::models::email_confirmation::CreateEmailConfirmation;
use onlycard_db::models::session::CreateSession;
use onlycard_db::models::user::CreateUser;
use onlycard_db::repositories::{EmailConfirmationRepo, ProfileRepo, SessionRepo, UserRepo};

fn new_user(email: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password_hash: "hash".to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_violates_unique_constraint(pool: PgPool) {
    UserRepo::create(&pool, &new_user("jane@example.com")).await.unwrap();
    let err = UserRepo::create(&pool, &new_user("jane@example.com")).await.unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_users_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_confirmation_code_is_single_use(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("jane@example.com")).await.unwrap();
    assert!(!user.is_confirmed());

    let (_code, hash) = generate_confirmation_code();
    EmailConfirmationRepo::create(
        &pool,
        &CreateEmailConfirmation {
            user_id: user.id,
            code_hash: hash.clone(),
            expires_at: Utc::now() + Duration::hours(1),
        },
    )
    .await
    .unwrap();

    let consumed = EmailConfirmationRepo::consume(&pool, &hash).await.unwrap();
    assert_eq!(consumed.map(|c| c.user_id), Some(user.id));
    assert!(EmailConfirmationRepo::consume(&pool, &hash).await.unwrap().is_none());

    let confirmed = UserRepo::confirm_email(&pool, user.id).await.unwrap().unwrap();
    assert!(confirmed.is_confirmed());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_confirmation_code_is_rejected(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("jane@example.com")).await.unwrap();
    let (_code, hash) = generate_confirmation_code();
    EmailConfirmationRepo::create(
        &pool,
        &CreateEmailConfirmation {
            user_id: user.id,
            code_hash: hash.clone(),
            expires_at: Utc::now() - Duration::minutes(1),
        },
    )
    .await
    .unwrap();

    assert!(EmailConfirmationRepo::consume(&pool, &hash).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_revocation(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("jane@example.com")).await.unwrap();
    let session = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "abc".into(),
            expires_at: Utc::now() + Duration::days(1),
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::find_active_by_hash(&pool, "abc").await.unwrap().is_some());
    assert!(SessionRepo::revoke(&pool, session.id).await.unwrap());
    assert!(!SessionRepo::revoke(&pool, session.id).await.unwrap());
    assert!(SessionRepo::find_active_by_hash(&pool, "abc").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_creation_is_idempotent(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("jane@example.com")).await.unwrap();
    let first = ProfileRepo::create_for_user(&pool, user.id).await.unwrap();
    let second = ProfileRepo::create_for_user(&pool, user.id).await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(first.completion_percent(), 0);
}
