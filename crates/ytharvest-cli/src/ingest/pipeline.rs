//! Per-channel ingestion coordination.
//!
//! `collect_channel` sequences the four fetch stages — resolve channel,
//! enumerate the uploads playlist, fetch video details, collect comments —
//! and assembles one `IngestionResult`. Nothing touches the database until
//! every stage has succeeded; a failure anywhere discards the whole run.

use ytharvest_core::{AppConfig, IngestionResult};
use ytharvest_youtube::{normalize, CommentOutcome, YoutubeClient, YoutubeError};

#[derive(Debug, thiserror::Error)]
pub(crate) enum IngestError {
    #[error("channel not found: {channel_id}")]
    ChannelNotFound { channel_id: String },
    #[error(transparent)]
    Api(#[from] YoutubeError),
}

/// Fetches everything the staging store needs for one channel.
///
/// Videos with disabled comments contribute zero comments and the run
/// continues. Any other per-video comment failure aborts the run — partial
/// results are never returned.
///
/// # Errors
///
/// - [`IngestError::ChannelNotFound`] when the channel lookup matches
///   nothing.
/// - [`IngestError::Api`] for any API, network, or normalization failure in
///   any stage.
pub(crate) async fn collect_channel(
    client: &YoutubeClient,
    config: &AppConfig,
    channel_id: &str,
) -> Result<IngestionResult, IngestError> {
    let items = client.list_channels(channel_id).await?;
    let item = items
        .into_iter()
        .next()
        .ok_or_else(|| IngestError::ChannelNotFound {
            channel_id: channel_id.to_owned(),
        })?;
    let channel = normalize::channel_record(item)?;

    let video_ids = client
        .collect_video_ids(&channel.uploads_playlist_id, config.inter_request_delay_ms)
        .await?;
    tracing::info!(
        channel_id,
        videos = video_ids.len(),
        "enumerated uploads playlist"
    );

    let videos = client
        .fetch_video_details(&video_ids, config.inter_request_delay_ms)
        .await?;

    let mut comments = Vec::new();
    for video in &videos {
        match client
            .collect_video_comments(&video.video_id, config.inter_request_delay_ms)
            .await
        {
            CommentOutcome::Collected(batch) => comments.extend(batch),
            CommentOutcome::Disabled => {}
            CommentOutcome::Failed(e) => return Err(IngestError::Api(e)),
        }
    }

    Ok(IngestionResult {
        channels: vec![channel],
        videos,
        comments,
    })
}

/// Runs the full ingest for `channel_id` and stages the result as one
/// immutable document.
///
/// Re-ingesting a channel that is already staged is allowed — it produces a
/// second independent document — but is worth a warning, since the next
/// `load` will see both.
///
/// # Errors
///
/// Returns an error if the client cannot be built, any fetch stage fails,
/// or staging the completed result fails.
pub(crate) async fn run_ingest(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    channel_id: &str,
) -> anyhow::Result<()> {
    let client = YoutubeClient::with_base_url(
        &config.youtube_api_key,
        config.request_timeout_secs,
        &config.youtube_api_base_url,
    )?;

    if ytharvest_db::has_staged_channel(pool, channel_id).await? {
        tracing::warn!(
            channel_id,
            "channel already staged; this run will add a second document"
        );
    }

    let result = collect_channel(&client, config, channel_id).await?;
    let staged = ytharvest_db::stage_ingestion(pool, &result).await?;

    println!(
        "staged document {} ({}) for channel {}: {} videos, {} comments",
        staged.id,
        staged.public_id,
        result.channel_id().unwrap_or(channel_id),
        result.videos.len(),
        result.comments.len()
    );

    Ok(())
}
