//! Handlers for the signed-in user's profile.

use axum::extract::State;
use axum::Json;
use onlycard_core::error::CoreError;
use onlycard_db::models::profile::{Profile, UpdateProfile};
use onlycard_db::repositories::ProfileRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A profile plus its completion percentage.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: Profile,
    pub completion_percent: u8,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            completion_percent: profile.completion_percent(),
            profile,
        }
    }
}

/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    // Profiles are created at signup; recreate one if it has gone missing.
    let profile = match ProfileRepo::find_by_user(&state.pool, auth.user_id).await? {
        Some(profile) => profile,
        None => ProfileRepo::create_for_user(&state.pool, auth.user_id).await?,
    };
    Ok(Json(DataResponse {
        data: profile.into(),
    }))
}

/// PUT /api/v1/profile
///
/// Only fields present in the body are changed.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    ProfileRepo::create_for_user(&state.pool, auth.user_id).await?;
    let profile = ProfileRepo::update(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth.user_id,
        }))?;

    tracing::info!(user_id = auth.user_id, "Profile updated");
    Ok(Json(DataResponse {
        data: profile.into(),
    }))
}
