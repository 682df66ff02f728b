//! Canned analytical queries over the warehouse tables.
//!
//! These back the CLI's `report` subcommand. Each function is one fixed,
//! parameterized query returning typed rows; nothing here writes.

use sqlx::PgPool;

use crate::DbError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VideoChannelRow {
    pub channel_name: String,
    pub video_title: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChannelVideoCountRow {
    pub channel_name: String,
    pub video_count: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopViewedRow {
    pub channel_name: String,
    pub video_title: String,
    pub view_count: i64,
}

/// Comment totals per video. `video_title` is optional because a comment's
/// video may be absent from `video_details` (left join).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentCountRow {
    pub video_id: String,
    pub video_title: Option<String>,
    pub comment_count: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopLikedRow {
    pub channel_name: String,
    pub video_title: String,
    pub like_count: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VideoLikesRow {
    pub video_title: String,
    pub like_count: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChannelViewsRow {
    pub channel_name: String,
    pub channel_views: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChannelNameRow {
    pub channel_name: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AvgDurationRow {
    pub channel_name: String,
    /// `None` when no video of the channel had a parseable duration.
    pub avg_duration_seconds: Option<f64>,
}

/// Every video title with its channel, ordered by channel then title.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn videos_with_channels(pool: &PgPool) -> Result<Vec<VideoChannelRow>, DbError> {
    let rows = sqlx::query_as::<_, VideoChannelRow>(
        "SELECT channel_name, video_title \
         FROM video_details \
         ORDER BY channel_name, video_title",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Channels ranked by how many videos the warehouse holds for them.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn channels_by_video_count(pool: &PgPool) -> Result<Vec<ChannelVideoCountRow>, DbError> {
    let rows = sqlx::query_as::<_, ChannelVideoCountRow>(
        "SELECT channel_name, COUNT(video_id) AS video_count \
         FROM video_details \
         GROUP BY channel_name \
         ORDER BY video_count DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// The ten most-viewed videos of each channel.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn top_viewed_videos(pool: &PgPool) -> Result<Vec<TopViewedRow>, DbError> {
    let rows = sqlx::query_as::<_, TopViewedRow>(
        "SELECT channel_name, video_title, view_count FROM ( \
             SELECT channel_name, video_title, view_count, \
                    RANK() OVER (PARTITION BY channel_name ORDER BY view_count DESC) AS video_rank \
             FROM video_details) AS ranked \
         WHERE video_rank <= 10 \
         ORDER BY channel_name, view_count DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Collected comment totals per video, most commented first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn comment_counts_per_video(pool: &PgPool) -> Result<Vec<CommentCountRow>, DbError> {
    let rows = sqlx::query_as::<_, CommentCountRow>(
        "SELECT c.video_id, v.video_title, COUNT(c.comment_id) AS comment_count \
         FROM comment_data AS c \
         LEFT JOIN video_details AS v ON c.video_id = v.video_id \
         GROUP BY c.video_id, v.video_title \
         ORDER BY comment_count DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// The most-liked video of each channel.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn top_liked_per_channel(pool: &PgPool) -> Result<Vec<TopLikedRow>, DbError> {
    let rows = sqlx::query_as::<_, TopLikedRow>(
        "SELECT channel_name, video_title, like_count FROM ( \
             SELECT channel_name, video_title, like_count, \
                    RANK() OVER (PARTITION BY channel_name ORDER BY like_count DESC) AS like_rank \
             FROM video_details) AS ranked \
         WHERE like_rank = 1 \
         ORDER BY like_count DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Like totals for every video, most liked first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn video_likes(pool: &PgPool) -> Result<Vec<VideoLikesRow>, DbError> {
    let rows = sqlx::query_as::<_, VideoLikesRow>(
        "SELECT video_title, like_count \
         FROM video_details \
         ORDER BY like_count DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Total view counts per channel.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn channel_view_totals(pool: &PgPool) -> Result<Vec<ChannelViewsRow>, DbError> {
    let rows = sqlx::query_as::<_, ChannelViewsRow>(
        "SELECT channel_name, channel_views \
         FROM channel_details \
         ORDER BY channel_views DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Channels that published at least one video in `year`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn channels_published_in_year(
    pool: &PgPool,
    year: i32,
) -> Result<Vec<ChannelNameRow>, DbError> {
    let rows = sqlx::query_as::<_, ChannelNameRow>(
        "SELECT DISTINCT channel_name \
         FROM video_details \
         WHERE EXTRACT(YEAR FROM publish_date)::INT = $1 \
         ORDER BY channel_name",
    )
    .bind(year)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Average video duration per channel, in seconds.
///
/// Averages over `duration_seconds`, skipping videos whose encoded duration
/// did not parse.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn avg_duration_per_channel(pool: &PgPool) -> Result<Vec<AvgDurationRow>, DbError> {
    let rows = sqlx::query_as::<_, AvgDurationRow>(
        "SELECT c.channel_name, \
                AVG(v.duration_seconds)::DOUBLE PRECISION AS avg_duration_seconds \
         FROM video_details AS v \
         JOIN channel_details AS c ON v.channel_id = c.channel_id \
         GROUP BY c.channel_name \
         ORDER BY c.channel_name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Videos with the most collected comments, with their channels.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn most_commented_videos(pool: &PgPool) -> Result<Vec<CommentCountRow>, DbError> {
    let rows = sqlx::query_as::<_, CommentCountRow>(
        "SELECT c.video_id, v.video_title, COUNT(c.comment_text) AS comment_count \
         FROM comment_data AS c \
         LEFT JOIN video_details AS v ON c.video_id = v.video_id \
         GROUP BY c.video_id, v.video_title \
         ORDER BY comment_count DESC \
         LIMIT 10",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
