//! The warehouse loader: flattens staged documents into three relational
//! tables.
//!
//! Each load drops and recreates `channel_details`, `video_details`, and
//! `comment_data`, then bulk-inserts the flattened projections of whatever
//! is currently staged. The entire load runs in one transaction (Postgres
//! DDL is transactional), so readers either see the previous complete state
//! or the new complete state — never a half-loaded mix, and a failed load
//! leaves the old tables untouched.

use sqlx::{PgPool, Postgres, Transaction};

use ytharvest_core::{ChannelRecord, CommentRecord, IngestionResult, VideoRecord};

use crate::{staging, DbError};

/// Row counts written by one warehouse load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarehouseCounts {
    pub channels: usize,
    pub videos: usize,
    pub comments: usize,
}

/// Rebuilds the three warehouse tables from the staging store.
///
/// Re-running after a fresh ingest reflects only the current staged
/// documents' flattening — prior warehouse rows are discarded, not
/// accumulated.
///
/// # Errors
///
/// Returns [`DbError`] if reading the staged documents or any statement in
/// the load transaction fails. On error nothing is committed.
pub async fn load_warehouse(pool: &PgPool) -> Result<WarehouseCounts, DbError> {
    let mut tx = pool.begin().await?;

    // All documents come from one SELECT inside the transaction, so an
    // ingest committing mid-load cannot tear a document's arrays apart.
    let documents = staging::fetch_documents(&mut *tx).await?;
    let (channels, videos, comments) = split_documents(documents)?;

    load_channel_details(&mut tx, &channels).await?;
    load_video_details(&mut tx, &videos).await?;
    load_comment_data(&mut tx, &comments).await?;

    tx.commit().await?;

    Ok(WarehouseCounts {
        channels: channels.len(),
        videos: videos.len(),
        comments: comments.len(),
    })
}

async fn load_channel_details(
    tx: &mut Transaction<'_, Postgres>,
    channels: &[ChannelRecord],
) -> Result<(), DbError> {
    sqlx::query("DROP TABLE IF EXISTS channel_details")
        .execute(&mut **tx)
        .await?;

    sqlx::query(
        "CREATE TABLE channel_details ( \
             channel_id          VARCHAR(100) PRIMARY KEY, \
             channel_name        TEXT NOT NULL, \
             channel_description TEXT NOT NULL, \
             subscribers         BIGINT NOT NULL, \
             channel_views       BIGINT NOT NULL, \
             video_count         BIGINT NOT NULL, \
             playlist_id         VARCHAR(100) NOT NULL)",
    )
    .execute(&mut **tx)
    .await?;

    for channel in channels {
        // The same channel may appear in several staged documents; the last
        // staged version wins, matching a rebuild from the newest data.
        sqlx::query(
            "INSERT INTO channel_details \
                 (channel_id, channel_name, channel_description, subscribers, \
                  channel_views, video_count, playlist_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (channel_id) DO UPDATE SET \
                 channel_name        = EXCLUDED.channel_name, \
                 channel_description = EXCLUDED.channel_description, \
                 subscribers         = EXCLUDED.subscribers, \
                 channel_views       = EXCLUDED.channel_views, \
                 video_count         = EXCLUDED.video_count, \
                 playlist_id         = EXCLUDED.playlist_id",
        )
        .bind(&channel.channel_id)
        .bind(&channel.channel_name)
        .bind(&channel.description)
        .bind(to_bigint(channel.subscriber_count))
        .bind(to_bigint(channel.view_count))
        .bind(to_bigint(channel.video_count))
        .bind(&channel.uploads_playlist_id)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

async fn load_video_details(
    tx: &mut Transaction<'_, Postgres>,
    videos: &[VideoRecord],
) -> Result<(), DbError> {
    sqlx::query("DROP TABLE IF EXISTS video_details")
        .execute(&mut **tx)
        .await?;

    sqlx::query(
        "CREATE TABLE video_details ( \
             video_id          VARCHAR(100) PRIMARY KEY, \
             channel_id        VARCHAR(100) NOT NULL, \
             channel_name      TEXT NOT NULL, \
             video_title       TEXT NOT NULL, \
             publish_date      TIMESTAMPTZ NOT NULL, \
             video_description TEXT NOT NULL, \
             view_count        BIGINT NOT NULL, \
             like_count        BIGINT NOT NULL, \
             favorite_count    BIGINT NOT NULL, \
             comment_count     BIGINT, \
             duration          VARCHAR(32) NOT NULL, \
             duration_seconds  BIGINT, \
             thumbnail         TEXT NOT NULL, \
             caption_status    BOOLEAN NOT NULL)",
    )
    .execute(&mut **tx)
    .await?;

    for video in videos {
        sqlx::query(
            "INSERT INTO video_details \
                 (video_id, channel_id, channel_name, video_title, publish_date, \
                  video_description, view_count, like_count, favorite_count, \
                  comment_count, duration, duration_seconds, thumbnail, caption_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             ON CONFLICT (video_id) DO UPDATE SET \
                 channel_id        = EXCLUDED.channel_id, \
                 channel_name      = EXCLUDED.channel_name, \
                 video_title       = EXCLUDED.video_title, \
                 publish_date      = EXCLUDED.publish_date, \
                 video_description = EXCLUDED.video_description, \
                 view_count        = EXCLUDED.view_count, \
                 like_count        = EXCLUDED.like_count, \
                 favorite_count    = EXCLUDED.favorite_count, \
                 comment_count     = EXCLUDED.comment_count, \
                 duration          = EXCLUDED.duration, \
                 duration_seconds  = EXCLUDED.duration_seconds, \
                 thumbnail         = EXCLUDED.thumbnail, \
                 caption_status    = EXCLUDED.caption_status",
        )
        .bind(&video.video_id)
        .bind(&video.channel_id)
        .bind(&video.channel_name)
        .bind(&video.title)
        .bind(video.published_at)
        .bind(&video.description)
        .bind(to_bigint(video.view_count))
        .bind(to_bigint(video.like_count))
        .bind(to_bigint(video.favorite_count))
        .bind(video.comment_count.map(to_bigint))
        .bind(&video.duration)
        .bind(video.duration_seconds.map(to_bigint))
        .bind(&video.thumbnail_url)
        .bind(video.captioned)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

async fn load_comment_data(
    tx: &mut Transaction<'_, Postgres>,
    comments: &[CommentRecord],
) -> Result<(), DbError> {
    sqlx::query("DROP TABLE IF EXISTS comment_data")
        .execute(&mut **tx)
        .await?;

    // No primary key: a comment may legitimately be staged more than once
    // (two ingests of the same channel) and the table mirrors the staged
    // flattening verbatim.
    sqlx::query(
        "CREATE TABLE comment_data ( \
             comment_id             VARCHAR(100) NOT NULL, \
             channel_id             VARCHAR(100) NOT NULL, \
             video_id               VARCHAR(100) NOT NULL, \
             comment_author         TEXT NOT NULL, \
             comment_text           TEXT NOT NULL, \
             comment_published_date TIMESTAMPTZ NOT NULL)",
    )
    .execute(&mut **tx)
    .await?;

    for comment in comments {
        sqlx::query(
            "INSERT INTO comment_data \
                 (comment_id, channel_id, video_id, comment_author, comment_text, \
                  comment_published_date) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&comment.comment_id)
        .bind(&comment.channel_id)
        .bind(&comment.video_id)
        .bind(&comment.author)
        .bind(&comment.text)
        .bind(comment.published_at)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

/// Splits staged documents into their three record lists, preserving
/// staging order.
fn split_documents(
    documents: Vec<serde_json::Value>,
) -> Result<(Vec<ChannelRecord>, Vec<VideoRecord>, Vec<CommentRecord>), DbError> {
    let mut channels = Vec::new();
    let mut videos = Vec::new();
    let mut comments = Vec::new();

    for document in documents {
        let result: IngestionResult = serde_json::from_value(document)?;
        channels.extend(result.channels);
        videos.extend(result.videos);
        comments.extend(result.comments);
    }

    Ok((channels, videos, comments))
}

/// Postgres has no unsigned integer columns. Platform counters stay far
/// below `i64::MAX`; clamp instead of failing the whole load on a
/// theoretical overflow.
fn to_bigint(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn document(channel_id: &str, comment_ids: &[&str]) -> serde_json::Value {
        json!({
            "channels": [{
                "channel_id": channel_id,
                "channel_name": "Test Channel",
                "description": "about",
                "subscriber_count": 1200,
                "view_count": 99000,
                "video_count": 1,
                "uploads_playlist_id": format!("UU{channel_id}")
            }],
            "videos": [],
            "comments": comment_ids
                .iter()
                .map(|id| json!({
                    "comment_id": id,
                    "channel_id": channel_id,
                    "video_id": "vid-1",
                    "author": "viewer",
                    "text": "one",
                    "published_at": "2023-05-18T08:30:00Z"
                }))
                .collect::<Vec<_>>()
        })
    }

    #[test]
    fn split_documents_concatenates_in_staging_order() {
        let documents = vec![document("UC1", &["a", "b"]), document("UC2", &["c"])];

        let (channels, videos, comments) = split_documents(documents).unwrap();
        let channel_ids: Vec<&str> = channels.iter().map(|c| c.channel_id.as_str()).collect();
        let comment_ids: Vec<&str> = comments.iter().map(|c| c.comment_id.as_str()).collect();

        assert_eq!(channel_ids, vec!["UC1", "UC2"]);
        assert!(videos.is_empty());
        assert_eq!(comment_ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn split_documents_rejects_malformed_document() {
        let documents = vec![json!({ "channels": [{ "not": "a channel" }] })];
        let result = split_documents(documents);
        assert!(matches!(result, Err(DbError::Json(_))));
    }

    #[test]
    fn to_bigint_passes_ordinary_counts_through() {
        assert_eq!(to_bigint(0), 0);
        assert_eq!(to_bigint(1_234_567), 1_234_567);
    }

    #[test]
    fn to_bigint_clamps_overflow() {
        assert_eq!(to_bigint(u64::MAX), i64::MAX);
    }
}
