//! Normalization from raw API resources to the domain records in
//! [`ytharvest_core::records`].
//!
//! The API returns every counter as a JSON string; this module parses them
//! and fails loudly on anything malformed. A counter that is absent where
//! the platform may legitimately omit it (`commentCount`, and the hidden
//! `subscriberCount`) maps to an explicit state rather than a silent zero.

use ytharvest_core::{parse_iso8601_duration, ChannelRecord, CommentRecord, VideoRecord};

use crate::error::YoutubeError;
use crate::types::{ChannelItem, CommentThreadItem, VideoItem};

/// Normalizes a raw [`ChannelItem`] into a [`ChannelRecord`].
///
/// A hidden subscriber count normalizes to zero — the record keeps a plain
/// counter and the platform reports nothing better for such channels.
///
/// # Errors
///
/// Returns [`YoutubeError::Normalization`] if a required counter is missing
/// or fails to parse.
pub fn channel_record(item: ChannelItem) -> Result<ChannelRecord, YoutubeError> {
    let context = format!("channel {}", item.id);

    let subscriber_count = match item.statistics.subscriber_count {
        Some(raw) => parse_count(&context, "subscriberCount", &raw)?,
        None => 0,
    };
    let view_count = require_count(&context, "viewCount", item.statistics.view_count)?;
    let video_count = require_count(&context, "videoCount", item.statistics.video_count)?;

    Ok(ChannelRecord {
        channel_id: item.id,
        channel_name: item.snippet.title,
        description: item.snippet.description,
        subscriber_count,
        view_count,
        video_count,
        uploads_playlist_id: item.content_details.related_playlists.uploads,
    })
}

/// Normalizes a raw [`VideoItem`] into a [`VideoRecord`].
///
/// `commentCount` is optional on the wire and stays optional in the record;
/// all other counters are required. The ISO-8601 duration is kept verbatim
/// and additionally parsed to seconds (best-effort — an unparseable duration
/// is not an error, the seconds field just stays empty).
///
/// # Errors
///
/// Returns [`YoutubeError::Normalization`] if a required field is missing or
/// a present counter fails to parse.
pub fn video_record(item: VideoItem) -> Result<VideoRecord, YoutubeError> {
    let context = format!("video {}", item.id);

    let view_count = require_count(&context, "viewCount", item.statistics.view_count)?;
    let like_count = require_count(&context, "likeCount", item.statistics.like_count)?;
    let favorite_count = require_count(&context, "favoriteCount", item.statistics.favorite_count)?;
    let comment_count = match item.statistics.comment_count {
        Some(raw) => Some(parse_count(&context, "commentCount", &raw)?),
        None => None,
    };

    let thumbnail_url = item
        .snippet
        .thumbnails
        .default
        .map(|t| t.url)
        .ok_or_else(|| YoutubeError::Normalization {
            context: context.clone(),
            reason: "no default thumbnail".to_owned(),
        })?;

    let duration = item.content_details.duration;
    let duration_seconds = parse_iso8601_duration(&duration);
    if duration_seconds.is_none() {
        tracing::warn!(video_id = %item.id, duration = %duration, "unparseable video duration");
    }

    Ok(VideoRecord {
        video_id: item.id,
        channel_id: item.snippet.channel_id,
        channel_name: item.snippet.channel_title,
        title: item.snippet.title,
        description: item.snippet.description,
        published_at: item.snippet.published_at,
        view_count,
        like_count,
        favorite_count,
        comment_count,
        duration,
        duration_seconds,
        thumbnail_url,
        captioned: item.content_details.caption == "true",
    })
}

/// Normalizes a raw [`CommentThreadItem`] into a [`CommentRecord`] for its
/// top-level comment. Replies are not collected.
pub fn comment_record(item: CommentThreadItem) -> CommentRecord {
    let comment = item.snippet.top_level_comment;
    CommentRecord {
        comment_id: comment.id,
        channel_id: item.snippet.channel_id,
        video_id: comment.snippet.video_id,
        author: comment.snippet.author_display_name,
        text: comment.snippet.text_original,
        published_at: comment.snippet.published_at,
    }
}

fn require_count(
    context: &str,
    field: &str,
    value: Option<String>,
) -> Result<u64, YoutubeError> {
    let raw = value.ok_or_else(|| YoutubeError::Normalization {
        context: context.to_owned(),
        reason: format!("missing statistics field '{field}'"),
    })?;
    parse_count(context, field, &raw)
}

fn parse_count(context: &str, field: &str, raw: &str) -> Result<u64, YoutubeError> {
    raw.parse::<u64>().map_err(|_| YoutubeError::Normalization {
        context: context.to_owned(),
        reason: format!("statistics field '{field}' is not a number: '{raw}'"),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::types::{
        ChannelContentDetails, ChannelSnippet, ChannelStatistics, CommentSnippet,
        CommentThreadSnippet, RelatedPlaylists, Thumbnail, Thumbnails, TopLevelComment,
        VideoContentDetails, VideoSnippet, VideoStatistics,
    };

    use super::*;

    fn channel_item(subscriber_count: Option<&str>) -> ChannelItem {
        ChannelItem {
            id: "UC_test0000000000000001".into(),
            snippet: ChannelSnippet {
                title: "Test Channel".into(),
                description: "about".into(),
            },
            statistics: ChannelStatistics {
                subscriber_count: subscriber_count.map(str::to_owned),
                view_count: Some("99000".into()),
                video_count: Some("3".into()),
            },
            content_details: ChannelContentDetails {
                related_playlists: RelatedPlaylists {
                    uploads: "UU_test0000000000000001".into(),
                },
            },
        }
    }

    fn video_item(comment_count: Option<&str>) -> VideoItem {
        VideoItem {
            id: "vid-1".into(),
            snippet: VideoSnippet {
                channel_id: "UC_test0000000000000001".into(),
                channel_title: "Test Channel".into(),
                title: "First".into(),
                description: String::new(),
                published_at: Utc.with_ymd_and_hms(2023, 5, 17, 12, 0, 0).unwrap(),
                thumbnails: Thumbnails {
                    default: Some(Thumbnail {
                        url: "https://i.ytimg.com/vi/vid-1/default.jpg".into(),
                    }),
                },
            },
            statistics: VideoStatistics {
                view_count: Some("10".into()),
                like_count: Some("2".into()),
                favorite_count: Some("0".into()),
                comment_count: comment_count.map(str::to_owned),
            },
            content_details: VideoContentDetails {
                duration: "PT4M13S".into(),
                caption: "false".into(),
            },
        }
    }

    #[test]
    fn channel_record_parses_counters() {
        let record = channel_record(channel_item(Some("1200"))).unwrap();
        assert_eq!(record.subscriber_count, 1200);
        assert_eq!(record.view_count, 99_000);
        assert_eq!(record.video_count, 3);
        assert_eq!(record.uploads_playlist_id, "UU_test0000000000000001");
    }

    #[test]
    fn channel_record_hidden_subscriber_count_is_zero() {
        let record = channel_record(channel_item(None)).unwrap();
        assert_eq!(record.subscriber_count, 0);
    }

    #[test]
    fn channel_record_rejects_malformed_counter() {
        let mut item = channel_item(Some("1200"));
        item.statistics.view_count = Some("a lot".into());
        let err = channel_record(item).unwrap_err();
        assert!(matches!(err, YoutubeError::Normalization { .. }), "{err:?}");
    }

    #[test]
    fn video_record_keeps_absent_comment_count_absent() {
        let record = video_record(video_item(None)).unwrap();
        assert_eq!(record.comment_count, None);
    }

    #[test]
    fn video_record_parses_present_comment_count() {
        let record = video_record(video_item(Some("7"))).unwrap();
        assert_eq!(record.comment_count, Some(7));
    }

    #[test]
    fn video_record_parses_duration_both_ways() {
        let record = video_record(video_item(None)).unwrap();
        assert_eq!(record.duration, "PT4M13S");
        assert_eq!(record.duration_seconds, Some(253));
    }

    #[test]
    fn video_record_unparseable_duration_keeps_verbatim_string() {
        let mut item = video_item(None);
        item.content_details.duration = "four minutes".into();
        let record = video_record(item).unwrap();
        assert_eq!(record.duration, "four minutes");
        assert_eq!(record.duration_seconds, None);
    }

    #[test]
    fn video_record_requires_like_count() {
        let mut item = video_item(None);
        item.statistics.like_count = None;
        let err = video_record(item).unwrap_err();
        assert!(matches!(err, YoutubeError::Normalization { .. }), "{err:?}");
    }

    #[test]
    fn video_record_requires_default_thumbnail() {
        let mut item = video_item(None);
        item.snippet.thumbnails = Thumbnails { default: None };
        let err = video_record(item).unwrap_err();
        assert!(matches!(err, YoutubeError::Normalization { .. }), "{err:?}");
    }

    #[test]
    fn comment_record_flattens_top_level_comment() {
        let item = CommentThreadItem {
            snippet: CommentThreadSnippet {
                channel_id: "UC_test0000000000000001".into(),
                top_level_comment: TopLevelComment {
                    id: "cmt-1".into(),
                    snippet: CommentSnippet {
                        video_id: "vid-1".into(),
                        text_original: "great video".into(),
                        author_display_name: "viewer".into(),
                        published_at: Utc.with_ymd_and_hms(2023, 5, 18, 8, 30, 0).unwrap(),
                    },
                },
            },
        };

        let record = comment_record(item);
        assert_eq!(record.comment_id, "cmt-1");
        assert_eq!(record.channel_id, "UC_test0000000000000001");
        assert_eq!(record.video_id, "vid-1");
        assert_eq!(record.author, "viewer");
        assert_eq!(record.text, "great video");
    }
}
