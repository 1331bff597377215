/// Database primary keys (PostgreSQL BIGSERIAL).
pub type DbId = i64;

/// Timestamps are always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Public, non-guessable card identifier used in share links.
pub type ShareId = uuid::Uuid;
