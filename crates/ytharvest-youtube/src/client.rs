//! HTTP client for the YouTube Data API v3.
//!
//! Wraps `reqwest` with API-key management, typed response deserialization,
//! and YouTube-specific error handling. Non-2xx responses carry a JSON error
//! envelope whose `reason` distinguishes the one recoverable condition
//! (comments disabled on a video) from everything else; see
//! [`YoutubeError`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::YoutubeError;
use crate::types::{ChannelItem, CommentThreadItem, PageResponse, PlaylistItem, VideoItem};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Page size for `playlistItems.list` — the API maximum.
pub const PLAYLIST_PAGE_SIZE: u32 = 50;
/// Batch size for `videos.list` id lookups — the API maximum.
pub const VIDEO_BATCH_SIZE: usize = 50;
/// Page size for `commentThreads.list` — the API maximum.
pub const COMMENT_PAGE_SIZE: u32 = 100;

/// Client for the YouTube Data API v3.
///
/// Manages the HTTP client, API key, and base URL. Use [`YoutubeClient::new`]
/// for production or [`YoutubeClient::with_base_url`] to point at a mock
/// server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("ytharvest/0.1 (channel-warehousing)")
            .build()?;

        // Keep exactly one trailing slash so Url::join treats the last
        // segment ("v3/") as a directory rather than replacing it.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YoutubeError::Api {
            status: 0,
            reason: None,
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches channel metadata for one channel id.
    ///
    /// Calls `channels.list` with `part=snippet,contentDetails,statistics`.
    /// An unknown id yields an empty vector, not an error — the caller
    /// decides whether that means "not found."
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Api`] on an API-level error response.
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn list_channels(&self, channel_id: &str) -> Result<Vec<ChannelItem>, YoutubeError> {
        let url = self.build_url(
            "channels",
            &[
                ("part", "snippet,contentDetails,statistics"),
                ("id", channel_id),
            ],
        );
        let context = format!("channels.list(id={channel_id})");
        let page: PageResponse<ChannelItem> = self.request_json(&url, &context).await?;
        Ok(page.items)
    }

    /// Fetches one page of playlist items (video ids) for a playlist.
    ///
    /// Calls `playlistItems.list` with `part=contentDetails` and the maximum
    /// page size of 50. Pass the previous page's `next_page_token` to
    /// continue; `None` starts from the beginning.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::list_channels`].
    pub async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PageResponse<PlaylistItem>, YoutubeError> {
        let max_results = PLAYLIST_PAGE_SIZE.to_string();
        let mut params = vec![
            ("part", "contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", &max_results),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let url = self.build_url("playlistItems", &params);
        let context = format!("playlistItems.list(playlistId={playlist_id})");
        self.request_json(&url, &context).await
    }

    /// Fetches full metadata for a batch of at most 50 video ids.
    ///
    /// Calls `videos.list` with `part=snippet,contentDetails,statistics`.
    /// The API does not guarantee that items come back in request order, and
    /// neither does this method — every item carries its own id.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Api`] if `ids` exceeds the 50-id batch limit,
    /// otherwise the same taxonomy as [`Self::list_channels`].
    pub async fn list_videos(&self, ids: &[String]) -> Result<Vec<VideoItem>, YoutubeError> {
        if ids.len() > VIDEO_BATCH_SIZE {
            return Err(YoutubeError::Api {
                status: 0,
                reason: None,
                message: format!(
                    "videos.list called with {} ids; the batch limit is {VIDEO_BATCH_SIZE}",
                    ids.len()
                ),
            });
        }

        let joined = ids.join(",");
        let url = self.build_url(
            "videos",
            &[
                ("part", "snippet,contentDetails,statistics"),
                ("id", &joined),
            ],
        );
        let context = format!("videos.list({} ids)", ids.len());
        let page: PageResponse<VideoItem> = self.request_json(&url, &context).await?;
        Ok(page.items)
    }

    /// Fetches one page of top-level comment threads for a video.
    ///
    /// Calls `commentThreads.list` with `part=snippet` and the maximum page
    /// size of 100. Cursor protocol is identical to
    /// [`Self::list_playlist_items`].
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::CommentsDisabled`] when the API answers HTTP 403
    ///   with reason `commentsDisabled`.
    /// - Otherwise the same taxonomy as [`Self::list_channels`].
    pub async fn list_comment_threads(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<PageResponse<CommentThreadItem>, YoutubeError> {
        let max_results = COMMENT_PAGE_SIZE.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("maxResults", &max_results),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let url = self.build_url("commentThreads", &params);
        let context = format!("commentThreads.list(videoId={video_id})");
        match self.request_json(&url, &context).await {
            Err(YoutubeError::Api { status: 403, reason, .. })
                if reason.as_deref() == Some("commentsDisabled") =>
            {
                Err(YoutubeError::CommentsDisabled {
                    video_id: video_id.to_owned(),
                })
            }
            other => other,
        }
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters.
    ///
    /// Joins the resource path onto the stored base URL and appends `key`
    /// plus any additional parameters via [`Url::query_pairs_mut`].
    fn build_url(&self, resource: &str, params: &[(&str, &str)]) -> Url {
        // The base URL is validated at construction; joining a bare resource
        // name onto it cannot fail.
        let mut url = self
            .base_url
            .join(resource)
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request and parses the response body into `T`.
    ///
    /// Non-2xx responses are mapped through the API's JSON error envelope.
    /// `context` names the operation in errors; it deliberately never
    /// includes the full URL, which carries the API key.
    async fn request_json<T>(&self, url: &Url, context: &str) -> Result<T, YoutubeError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Maps a non-2xx response body to [`YoutubeError::Api`].
    ///
    /// The API wraps errors as
    /// `{"error": {"code": …, "message": …, "errors": [{"reason": …}]}}`.
    /// A body that is not valid JSON still produces an `Api` error with the
    /// raw body as the message.
    fn api_error(status: u16, body: &str) -> YoutubeError {
        let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
        let error = parsed.as_ref().and_then(|v| v.get("error"));

        let message = error
            .and_then(|e| e.get("message"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or(body)
            .to_owned();
        let reason = error
            .and_then(|e| e.get("errors"))
            .and_then(|errors| errors.get(0))
            .and_then(|first| first.get("reason"))
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);

        YoutubeError::Api {
            status,
            reason,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> YoutubeClient {
        YoutubeClient::with_base_url("test-key", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_joins_resource_onto_base() {
        let client = test_client("https://www.googleapis.com/youtube/v3");
        let url = client.build_url("channels", &[("id", "UC123")]);
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/channels?key=test-key&id=UC123"
        );
    }

    #[test]
    fn build_url_tolerates_trailing_slash_on_base() {
        let client = test_client("https://www.googleapis.com/youtube/v3/");
        let url = client.build_url("videos", &[("id", "a,b")]);
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/videos?key=test-key&id=a%2Cb"
        );
    }

    #[test]
    fn api_error_extracts_reason_and_message() {
        let body = r#"{"error":{"code":403,"message":"The request is missing a valid API key.","errors":[{"reason":"forbidden"}]}}"#;
        let err = YoutubeClient::api_error(403, body);
        match err {
            YoutubeError::Api {
                status,
                reason,
                message,
            } => {
                assert_eq!(status, 403);
                assert_eq!(reason.as_deref(), Some("forbidden"));
                assert!(message.contains("missing a valid API key"));
            }
            other => panic!("expected Api error, got: {other:?}"),
        }
    }

    #[test]
    fn api_error_with_unparseable_body_keeps_raw_text() {
        let err = YoutubeClient::api_error(500, "upstream exploded");
        match err {
            YoutubeError::Api {
                status,
                reason,
                message,
            } => {
                assert_eq!(status, 500);
                assert!(reason.is_none());
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("expected Api error, got: {other:?}"),
        }
    }
}
