//! Multi-page and multi-batch fetch loops for [`YoutubeClient`].
//!
//! Each loop is strictly sequential: one request in flight at a time,
//! with an optional inter-request delay between calls. Cursors are opaque
//! `nextPageToken` values and are never persisted — a loop always restarts
//! from the first page.

use std::time::Duration;

use ytharvest_core::{CommentRecord, VideoRecord};

use crate::client::{YoutubeClient, VIDEO_BATCH_SIZE};
use crate::error::YoutubeError;
use crate::normalize;

/// Outcome of collecting the comments of one video.
///
/// Disabled comments are a normal terminal state, not an error; only
/// `Failed` should abort anything.
#[derive(Debug)]
pub enum CommentOutcome {
    Collected(Vec<CommentRecord>),
    Disabled,
    Failed(YoutubeError),
}

impl YoutubeClient {
    /// Collects the complete ordered list of video ids in a playlist.
    ///
    /// Pages through `playlistItems.list` (50 per page) following the
    /// continuation cursor until the platform stops returning one. Item
    /// order is preserved exactly as returned; no duplicate filtering and no
    /// assumed upper bound on playlist size.
    ///
    /// **All-or-nothing semantics**: a failure on any page discards ids
    /// already collected from earlier pages and returns the error.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::list_playlist_items`].
    pub async fn collect_video_ids(
        &self,
        playlist_id: &str,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<String>, YoutubeError> {
        let mut video_ids: Vec<String> = Vec::new();
        let mut page_token: Option<String> = None;
        let mut is_first_page = true;

        loop {
            if !is_first_page && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }
            is_first_page = false;

            let page = self
                .list_playlist_items(playlist_id, page_token.as_deref())
                .await?;

            video_ids.extend(page.items.into_iter().map(|i| i.content_details.video_id));

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        tracing::debug!(playlist_id, count = video_ids.len(), "collected video ids");
        Ok(video_ids)
    }

    /// Fetches full metadata for every id in `video_ids`, normalized to
    /// [`VideoRecord`]s.
    ///
    /// Ids are partitioned into batches of at most 50 (the `videos.list`
    /// limit), one request per batch — ⌈N/50⌉ requests for N ids. Output
    /// preserves per-batch order only; the platform does not promise to
    /// answer in request order, so treat the result as a set keyed by
    /// `video_id`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::list_videos`] or from
    /// normalization.
    pub async fn fetch_video_details(
        &self,
        video_ids: &[String],
        inter_request_delay_ms: u64,
    ) -> Result<Vec<VideoRecord>, YoutubeError> {
        let mut records: Vec<VideoRecord> = Vec::with_capacity(video_ids.len());
        let mut is_first_batch = true;

        for batch in video_ids.chunks(VIDEO_BATCH_SIZE) {
            if !is_first_batch && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }
            is_first_batch = false;

            let items = self.list_videos(batch).await?;
            for item in items {
                records.push(normalize::video_record(item)?);
            }
        }

        Ok(records)
    }

    /// Collects every top-level comment thread of one video.
    ///
    /// Pages through `commentThreads.list` (100 per page) with the same
    /// cursor protocol as the playlist loop. The per-video state machine is
    /// encoded in the return value: all pages consumed →
    /// [`CommentOutcome::Collected`]; the platform signals comments disabled
    /// (even mid-pagination) → [`CommentOutcome::Disabled`]; anything else →
    /// [`CommentOutcome::Failed`].
    ///
    /// Never panics and never returns `Result` — the caller decides what
    /// each terminal state means for the wider run.
    pub async fn collect_video_comments(
        &self,
        video_id: &str,
        inter_request_delay_ms: u64,
    ) -> CommentOutcome {
        let mut comments: Vec<CommentRecord> = Vec::new();
        let mut page_token: Option<String> = None;
        let mut is_first_page = true;

        loop {
            if !is_first_page && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }
            is_first_page = false;

            let page = match self
                .list_comment_threads(video_id, page_token.as_deref())
                .await
            {
                Ok(page) => page,
                Err(YoutubeError::CommentsDisabled { .. }) => {
                    tracing::info!(video_id, "comments are disabled; recording zero comments");
                    return CommentOutcome::Disabled;
                }
                Err(e) => return CommentOutcome::Failed(e),
            };

            comments.extend(page.items.into_iter().map(normalize::comment_record));

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        tracing::debug!(video_id, count = comments.len(), "collected comments");
        CommentOutcome::Collected(comments)
    }
}
