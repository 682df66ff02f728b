use thiserror::Error;

/// Errors returned by the YouTube Data API client.
#[derive(Debug, Error)]
pub enum YoutubeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status that is not the
    /// disabled-comments case.
    #[error("YouTube API error (HTTP {status}, reason {}): {message}", reason.as_deref().unwrap_or("unknown"))]
    Api {
        status: u16,
        reason: Option<String>,
        message: String,
    },

    /// Comments are turned off for the video. This is the one recoverable
    /// API condition: callers record zero comments and carry on.
    #[error("comments are disabled for video {video_id}")]
    CommentsDisabled { video_id: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A response item could not be converted into a domain record.
    #[error("normalization error for {context}: {reason}")]
    Normalization { context: String, reason: String },
}
