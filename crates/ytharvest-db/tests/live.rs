//! Live integration tests for the staging store and warehouse loader using
//! `#[sqlx::test]`.
//!
//! Each test gets a fresh Postgres database spun up by the sqlx test
//! harness, so `DATABASE_URL` must point at a running server. Ignored by
//! default to keep the offline suite independent of one; run with
//! `cargo test -- --ignored` against a disposable instance.

use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use ytharvest_core::{ChannelRecord, CommentRecord, IngestionResult, VideoRecord};
use ytharvest_db::{
    ensure_staging_schema, has_staged_channel, load_warehouse, stage_ingestion, staged_channels,
    WarehouseCounts,
};

/// One channel, one video, one comment — the smallest complete document.
fn sample_result(channel_id: &str, video_id: &str) -> IngestionResult {
    let published = Utc.with_ymd_and_hms(2023, 5, 17, 12, 0, 0).unwrap();
    IngestionResult {
        channels: vec![ChannelRecord {
            channel_id: channel_id.to_string(),
            channel_name: format!("Channel {channel_id}"),
            description: "about".to_string(),
            subscriber_count: 1200,
            view_count: 99_000,
            video_count: 1,
            uploads_playlist_id: format!("UU{channel_id}"),
        }],
        videos: vec![VideoRecord {
            video_id: video_id.to_string(),
            channel_id: channel_id.to_string(),
            channel_name: format!("Channel {channel_id}"),
            title: format!("Video {video_id}"),
            description: String::new(),
            published_at: published,
            view_count: 10,
            like_count: 2,
            favorite_count: 0,
            comment_count: Some(1),
            duration: "PT4M13S".to_string(),
            duration_seconds: Some(253),
            thumbnail_url: format!("https://i.ytimg.com/vi/{video_id}/default.jpg"),
            captioned: false,
        }],
        comments: vec![CommentRecord {
            comment_id: format!("cmt-{video_id}"),
            channel_id: channel_id.to_string(),
            video_id: video_id.to_string(),
            author: "viewer".to_string(),
            text: "great video".to_string(),
            published_at: Utc.with_ymd_and_hms(2023, 5, 18, 8, 30, 0).unwrap(),
        }],
    }
}

async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("counting {table} failed: {e}"))
}

#[sqlx::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn reingest_stages_a_second_independent_document(pool: PgPool) {
    ensure_staging_schema(&pool).await.unwrap();

    let first = stage_ingestion(&pool, &sample_result("UC1", "vid-1"))
        .await
        .unwrap();
    let second = stage_ingestion(&pool, &sample_result("UC1", "vid-2"))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_ne!(first.public_id, second.public_id);
    assert!(has_staged_channel(&pool, "UC1").await.unwrap());

    // Both documents survive intact; nothing merged or replaced.
    let channels = staged_channels(&pool).await.unwrap();
    assert_eq!(channels.len(), 2);
    assert!(channels.iter().all(|c| c.channel_id == "UC1"));
}

#[sqlx::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn load_reflects_only_current_staging(pool: PgPool) {
    ensure_staging_schema(&pool).await.unwrap();

    stage_ingestion(&pool, &sample_result("UC1", "vid-1"))
        .await
        .unwrap();
    let counts = load_warehouse(&pool).await.unwrap();
    assert_eq!(
        counts,
        WarehouseCounts {
            channels: 1,
            videos: 1,
            comments: 1
        }
    );

    stage_ingestion(&pool, &sample_result("UC2", "vid-2"))
        .await
        .unwrap();
    let counts = load_warehouse(&pool).await.unwrap();
    assert_eq!(counts.channels, 2);
    assert_eq!(count_rows(&pool, "channel_details").await, 2);
    assert_eq!(count_rows(&pool, "video_details").await, 2);

    // Re-running the load rebuilds rather than accumulates.
    load_warehouse(&pool).await.unwrap();
    assert_eq!(count_rows(&pool, "channel_details").await, 2);
    assert_eq!(count_rows(&pool, "comment_data").await, 2);
}

#[sqlx::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn failed_load_leaves_previous_warehouse_intact(pool: PgPool) {
    ensure_staging_schema(&pool).await.unwrap();

    stage_ingestion(&pool, &sample_result("UC1", "vid-1"))
        .await
        .unwrap();
    load_warehouse(&pool).await.unwrap();
    assert_eq!(count_rows(&pool, "video_details").await, 1);

    // A staged document that does not deserialize fails the next load before
    // anything commits.
    sqlx::query("INSERT INTO staged_ingestions (public_id, document) VALUES ($1, $2)")
        .bind(Uuid::new_v4())
        .bind(serde_json::json!({
            "channels": [{ "not": "a channel" }],
            "videos": [],
            "comments": []
        }))
        .execute(&pool)
        .await
        .unwrap();

    let result = load_warehouse(&pool).await;
    assert!(result.is_err());

    // The previous complete state is still fully readable.
    assert_eq!(count_rows(&pool, "channel_details").await, 1);
    assert_eq!(count_rows(&pool, "video_details").await, 1);
    assert_eq!(count_rows(&pool, "comment_data").await, 1);
}
