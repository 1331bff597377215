//! Repository for the `cards` table, plus the `CardWriter` the wizard uses.

use async_trait::async_trait;
use sqlx::PgPool;
use onlycard_core::error::CoreError;
use onlycard_core::theme::ThemeId;
use onlycard_core::types::{DbId, ShareId, Timestamp};
use onlycard_core::wizard::CardWriter;

use crate::models::card::{Card, CardContent, CardCounts};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, share_id, user_id, card_type, has_business_card, theme, \
                        profile_image, cover_image, logo_image, \
                        full_name, designation, company, address, mobile, email, website, bio, \
                        social_links, lead_capture, created_at, updated_at";

/// Provides CRUD operations for cards.
pub struct CardRepo;

impl CardRepo {
    /// Insert a new card owned by `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        share_id: ShareId,
        content: &CardContent,
    ) -> Result<Card, sqlx::Error> {
        let f = &content.fields;
        let query = format!(
            "INSERT INTO cards (share_id, user_id, card_type, theme,
                                profile_image, cover_image, logo_image,
                                full_name, designation, company, address, mobile, email, website, bio,
                                social_links, lead_capture)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(share_id)
            .bind(user_id)
            .bind(&content.card_type)
            .bind(&content.theme)
            .bind(&content.profile_image)
            .bind(&content.cover_image)
            .bind(&content.logo_image)
            .bind(&f.full_name)
            .bind(&f.designation)
            .bind(&f.company)
            .bind(&f.address)
            .bind(&f.mobile)
            .bind(&f.email)
            .bind(&f.website)
            .bind(&f.bio)
            .bind(&content.social_links)
            .bind(&content.lead_capture)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards WHERE id = $1");
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a card only if `user_id` owns it.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Public lookup for the web preview.
    pub async fn find_by_share_id(
        pool: &PgPool,
        share_id: ShareId,
    ) -> Result<Option<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards WHERE share_id = $1");
        sqlx::query_as::<_, Card>(&query)
            .bind(share_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's cards, newest first, optionally within `[from, to)`.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        range: Option<(Timestamp, Timestamp)>,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let (from, to) = range.unzip();
        let query = format!(
            "SELECT {COLUMNS} FROM cards
             WHERE user_id = $1
               AND ($2::timestamptz IS NULL OR created_at >= $2)
               AND ($3::timestamptz IS NULL OR created_at < $3)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(user_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_type(pool: &PgPool, user_id: DbId) -> Result<CardCounts, sqlx::Error> {
        sqlx::query_as::<_, CardCounts>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE card_type = 'business') AS business,
                    COUNT(*) FILTER (WHERE card_type = 'personal') AS personal
             FROM cards WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Replace every mutable column. Returns `None` if the card is missing.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        content: &CardContent,
    ) -> Result<Option<Card>, sqlx::Error> {
        let f = &content.fields;
        let query = format!(
            "UPDATE cards SET
                card_type = $2, theme = $3,
                profile_image = $4, cover_image = $5, logo_image = $6,
                full_name = $7, designation = $8, company = $9, address = $10,
                mobile = $11, email = $12, website = $13, bio = $14,
                social_links = $15, lead_capture = $16
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .bind(&content.card_type)
            .bind(&content.theme)
            .bind(&content.profile_image)
            .bind(&content.cover_image)
            .bind(&content.logo_image)
            .bind(&f.full_name)
            .bind(&f.designation)
            .bind(&f.company)
            .bind(&f.address)
            .bind(&f.mobile)
            .bind(&f.email)
            .bind(&f.website)
            .bind(&f.bio)
            .bind(&content.social_links)
            .bind(&content.lead_capture)
            .fetch_optional(pool)
            .await
    }

    /// Update only the theme. Returns `true` if the row was updated.
    pub async fn update_theme(pool: &PgPool, id: DbId, theme: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE cards SET theme = $2 WHERE id = $1")
            .bind(id)
            .bind(theme)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn update_social_links(
        pool: &PgPool,
        id: DbId,
        social_links: &serde_json::Value,
    ) -> Result<Option<Card>, sqlx::Error> {
        let query = format!(
            "UPDATE cards SET social_links = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .bind(social_links)
            .fetch_optional(pool)
            .await
    }

    pub async fn update_lead_capture(
        pool: &PgPool,
        id: DbId,
        lead_capture: &serde_json::Value,
    ) -> Result<Option<Card>, sqlx::Error> {
        let query = format!(
            "UPDATE cards SET lead_capture = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .bind(lead_capture)
            .fetch_optional(pool)
            .await
    }
}

/// [`CardWriter`] backed by the `cards` table.
pub struct PgCardWriter<'a> {
    pool: &'a PgPool,
}

impl<'a> PgCardWriter<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CardWriter for PgCardWriter<'_> {
    async fn update_theme(&self, card_id: DbId, theme: ThemeId) -> Result<(), CoreError> {
        let updated = CardRepo::update_theme(self.pool, card_id, theme.as_str())
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to update card theme: {e}")))?;
        if !updated {
            return Err(CoreError::NotFound {
                entity: "Card",
                id: card_id,
            });
        }
        Ok(())
    }
}
