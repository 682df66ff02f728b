pub mod client;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod types;

pub use client::YoutubeClient;
pub use error::YoutubeError;
pub use fetch::CommentOutcome;
pub use types::{ChannelItem, CommentThreadItem, PageResponse, PlaylistItem, VideoItem};
