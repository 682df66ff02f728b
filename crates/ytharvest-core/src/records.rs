//! Domain records produced by a channel ingestion run.
//!
//! These are the flat, immutable records that make up one staged document:
//! nothing here is mutated after construction; re-ingesting a channel builds
//! a fresh set instead of merging into an old one. All types round-trip
//! through JSON because the staging store keeps them as one JSONB document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for one YouTube channel.
///
/// `channel_id` is the platform-assigned globally unique identifier;
/// `uploads_playlist_id` is the single uploads playlist every channel has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub channel_id: String,
    pub channel_name: String,
    pub description: String,
    pub subscriber_count: u64,
    pub view_count: u64,
    pub video_count: u64,
    pub uploads_playlist_id: String,
}

/// Metadata for one video, denormalized with its owning channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub channel_id: String,
    pub channel_name: String,
    pub title: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    pub view_count: u64,
    pub like_count: u64,
    pub favorite_count: u64,
    /// The API omits `commentCount` for some videos (e.g. comments turned
    /// off). Absent stays `None`; it is never defaulted to zero.
    pub comment_count: Option<u64>,
    /// ISO-8601 duration exactly as the API returned it (e.g. `PT4M13S`).
    pub duration: String,
    /// Duration parsed to whole seconds, `None` if the encoded form could
    /// not be parsed.
    pub duration_seconds: Option<u64>,
    pub thumbnail_url: String,
    pub captioned: bool,
}

/// One top-level comment on a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub comment_id: String,
    pub channel_id: String,
    pub video_id: String,
    pub author: String,
    pub text: String,
    pub published_at: DateTime<Utc>,
}

/// The assembled output of one ingestion run for one channel.
///
/// `channels` holds exactly one element today; it is a sequence for forward
/// compatibility with multi-channel batches. Serialized as
/// `{"channels": [...], "videos": [...], "comments": [...]}` — the shape of
/// a staged document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionResult {
    pub channels: Vec<ChannelRecord>,
    pub videos: Vec<VideoRecord>,
    pub comments: Vec<CommentRecord>,
}

impl IngestionResult {
    /// Channel id of the ingested channel, when present.
    #[must_use]
    pub fn channel_id(&self) -> Option<&str> {
        self.channels.first().map(|c| c.channel_id.as_str())
    }
}
