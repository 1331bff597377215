//! Handlers for the `/auth` resource (signup, login, deep-link exchange,
//! refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use onlycard_core::account::{
    deep_link, generate_confirmation_code, hash_confirmation_code, normalize_email,
    normalize_password, parse_deep_link_code, AuthErrorCode,
};
use onlycard_core::error::CoreError;
use onlycard_db::models::email_confirmation::CreateEmailConfirmation;
use onlycard_db::models::session::CreateSession;
use onlycard_db::models::user::{CreateUser, User, UserResponse};
use onlycard_db::repositories::{EmailConfirmationRepo, ProfileRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup` and `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/exchange`.
#[derive(Debug, Deserialize)]
pub struct ExchangeRequest {
    /// The full `onlycard://auth?code=...` link or just the code.
    pub code: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response for a new account. Tokens are only issued once the email is
/// confirmed.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user: UserResponse,
    pub confirmation_required: bool,
    /// Only present when `EXPOSE_CONFIRMATION_LINKS` is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_link: Option<String>,
}

/// Successful authentication response returned by login, exchange, and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create an unconfirmed account with an empty profile and issue a one-time
/// confirmation deep link.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SignupResponse>>)> {
    let email = normalize_email(&input.email)?;
    let password = normalize_password(&input.password)?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(CoreError::Auth(AuthErrorCode::AlreadyRegistered).into());
    }

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(&state.pool, &CreateUser { email, password_hash })
        .await
        .map_err(|e| {
            // Lost a race with a concurrent signup for the same email.
            let duplicate = matches!(
                &e,
                sqlx::Error::Database(db) if db.constraint() == Some("uq_users_email")
            );
            if duplicate {
                AppError::Core(CoreError::Auth(AuthErrorCode::AlreadyRegistered))
            } else {
                AppError::Database(e)
            }
        })?;
    ProfileRepo::create_for_user(&state.pool, user.id).await?;

    let (code, code_hash) = generate_confirmation_code();
    let expires_at = Utc::now() + chrono::Duration::hours(state.config.confirmation_expiry_hours);
    EmailConfirmationRepo::create(
        &state.pool,
        &CreateEmailConfirmation {
            user_id: user.id,
            code_hash,
            expires_at,
        },
    )
    .await?;

    let link = deep_link(&code);
    tracing::info!(user_id = user.id, "Account created, confirmation pending");
    tracing::debug!(user_id = user.id, link = %link, "Confirmation link issued");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SignupResponse {
                user: UserResponse::from(&user),
                confirmation_required: true,
                confirmation_link: state.config.expose_confirmation_links.then_some(link),
            },
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. The email is matched trimmed and
/// lowercased.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let invalid = || AppError::Core(CoreError::Auth(AuthErrorCode::InvalidCredentials));

    let email = normalize_email(&input.email).map_err(|_| invalid())?;
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(input.password.trim(), &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    if !user.is_confirmed() {
        return Err(CoreError::Auth(AuthErrorCode::EmailNotConfirmed).into());
    }

    let response = create_auth_response(&state, &user).await?;
    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/exchange
///
/// Exchange a confirmation deep-link code for a session. Confirms the email
/// on first use; every code works once.
pub async fn exchange(
    State(state): State<AppState>,
    Json(input): Json<ExchangeRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let invalid = || AppError::Core(CoreError::Auth(AuthErrorCode::InvalidConfirmationCode));

    let code = parse_deep_link_code(&input.code).ok_or_else(invalid)?;
    let confirmation = EmailConfirmationRepo::consume(&state.pool, &hash_confirmation_code(&code))
        .await?
        .ok_or_else(invalid)?;

    let user = UserRepo::confirm_email(&state.pool, confirmation.user_id)
        .await?
        .ok_or_else(invalid)?;

    let response = create_auth_response(&state, &user).await?;
    tracing::info!(user_id = user.id, "Email confirmed via deep link");
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    };

    let token_hash = hash_refresh_token(&input.refresh_token);
    let session = SessionRepo::find_active_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(invalid)?;

    // Token rotation: a concurrent refresh of the same token loses here.
    if !SessionRepo::revoke(&state.pool, session.id).await? {
        return Err(invalid());
    }

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(user),
    })
}
