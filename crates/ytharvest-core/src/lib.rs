use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod duration;
pub mod records;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use duration::parse_iso8601_duration;
pub use records::{ChannelRecord, CommentRecord, IngestionResult, VideoRecord};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
