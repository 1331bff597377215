//! Repository for the `profiles` table.

use sqlx::PgPool;
use onlycard_core::types::DbId;

use crate::models::profile::{Profile, UpdateProfile};

const COLUMNS: &str = "id, user_id, full_name, designation, company, avatar_url, bio, \
                        mobile, website, address, created_at, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    /// Create the empty profile for a new user. Idempotent.
    pub async fn create_for_user(pool: &PgPool, user_id: DbId) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (user_id) VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_profiles_user_id
             DO UPDATE SET user_id = EXCLUDED.user_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                full_name = COALESCE($2, full_name),
                designation = COALESCE($3, designation),
                company = COALESCE($4, company),
                avatar_url = COALESCE($5, avatar_url),
                bio = COALESCE($6, bio),
                mobile = COALESCE($7, mobile),
                website = COALESCE($8, website),
                address = COALESCE($9, address)
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&input.full_name)
            .bind(&input.designation)
            .bind(&input.company)
            .bind(&input.avatar_url)
            .bind(&input.bio)
            .bind(&input.mobile)
            .bind(&input.website)
            .bind(&input.address)
            .fetch_optional(pool)
            .await
    }
}
