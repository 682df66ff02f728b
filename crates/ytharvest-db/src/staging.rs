//! The staging store: one immutable JSONB document per ingestion run.
//!
//! A staged document is the serialized [`IngestionResult`] —
//! `{"channels": […], "videos": […], "comments": […]}`. Documents are
//! insert-only: re-ingesting a channel stages a second independent document
//! rather than merging into the first. Reads are per-field projections that
//! flatten the chosen array across every staged document, in staging order.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use ytharvest_core::{ChannelRecord, CommentRecord, IngestionResult, VideoRecord};

use crate::DbError;

/// A row from the `staged_ingestions` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StagedIngestionRow {
    pub id: i64,
    pub public_id: Uuid,
    pub document: serde_json::Value,
    pub staged_at: DateTime<Utc>,
}

/// Creates the staging table if it does not exist yet.
///
/// Called once at startup. The warehouse tables are deliberately NOT created
/// here — the load step owns them (drop-and-recreate).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the DDL fails.
pub async fn ensure_staging_schema(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS staged_ingestions ( \
             id        BIGSERIAL PRIMARY KEY, \
             public_id UUID NOT NULL, \
             document  JSONB NOT NULL, \
             staged_at TIMESTAMPTZ NOT NULL DEFAULT NOW())",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Stages one ingestion result as a new immutable document.
///
/// Always inserts — never merges or replaces an earlier document for the
/// same channel. Returns the newly staged row.
///
/// # Errors
///
/// Returns [`DbError::Json`] if the result cannot be serialized, or
/// [`DbError::Sqlx`] if the insert fails.
pub async fn stage_ingestion(
    pool: &PgPool,
    result: &IngestionResult,
) -> Result<StagedIngestionRow, DbError> {
    let document = serde_json::to_value(result)?;
    let public_id = Uuid::new_v4();

    let row = sqlx::query_as::<_, StagedIngestionRow>(
        "INSERT INTO staged_ingestions (public_id, document) \
         VALUES ($1, $2) RETURNING id, public_id, document, staged_at",
    )
    .bind(public_id)
    .bind(document)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Returns whether any staged document already covers `channel_id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn has_staged_channel(pool: &PgPool, channel_id: &str) -> Result<bool, DbError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS ( \
             SELECT 1 FROM staged_ingestions \
             WHERE document -> 'channels' -> 0 ->> 'channel_id' = $1)",
    )
    .bind(channel_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Returns the `channels` projection of every staged document, flattened.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails or [`DbError::Json`] if a
/// staged document does not deserialize.
pub async fn staged_channels(pool: &PgPool) -> Result<Vec<ChannelRecord>, DbError> {
    let projections = fetch_projection(pool, "channels").await?;
    flatten_projection(projections)
}

/// Returns the `videos` projection of every staged document, flattened.
///
/// # Errors
///
/// Same as [`staged_channels`].
pub async fn staged_videos(pool: &PgPool) -> Result<Vec<VideoRecord>, DbError> {
    let projections = fetch_projection(pool, "videos").await?;
    flatten_projection(projections)
}

/// Returns the `comments` projection of every staged document, flattened.
///
/// # Errors
///
/// Same as [`staged_channels`].
pub async fn staged_comments(pool: &PgPool) -> Result<Vec<CommentRecord>, DbError> {
    let projections = fetch_projection(pool, "comments").await?;
    flatten_projection(projections)
}

/// Fetches every staged document whole, oldest first. One statement, so the
/// result is a single consistent snapshot of the staging table.
pub(crate) async fn fetch_documents<'e, E>(executor: E) -> Result<Vec<serde_json::Value>, DbError>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    let documents = sqlx::query_scalar::<_, serde_json::Value>(
        "SELECT document FROM staged_ingestions ORDER BY id",
    )
    .fetch_all(executor)
    .await?;

    Ok(documents)
}

/// Fetches one field of every staged document, oldest first.
async fn fetch_projection(pool: &PgPool, field: &str) -> Result<Vec<serde_json::Value>, DbError> {
    let values = sqlx::query_scalar::<_, serde_json::Value>(
        "SELECT document -> $1 FROM staged_ingestions ORDER BY id",
    )
    .bind(field)
    .fetch_all(pool)
    .await?;

    Ok(values)
}

/// Flattens per-document JSON arrays into one record list, preserving
/// staging order. A missing field (JSON null) contributes nothing.
fn flatten_projection<T>(projections: Vec<serde_json::Value>) -> Result<Vec<T>, DbError>
where
    T: serde::de::DeserializeOwned,
{
    let mut records = Vec::new();
    for value in projections {
        if value.is_null() {
            continue;
        }
        let batch: Vec<T> = serde_json::from_value(value)?;
        records.extend(batch);
    }
    Ok(records)
}
