//! Shared domain model, configuration, and retry plumbing for the
//! socialsync ingestion pipeline.

pub mod account;
pub mod app_config;
pub mod config;
pub mod envelope;
pub mod media;
pub mod page;
pub mod platform;
pub mod post;
pub mod retry;
pub mod target;
pub mod telemetry;

pub use account::{
    AccountExtension, BioLink, BusinessAddress, CommerceSettings, FacebookAccount,
    InstagramAccount, LinkedinAccount, PrivacySettings, SocialAccount, TiktokAccount,
    TwitterAccount, YoutubeAccount,
};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use envelope::ScrapeResult;
pub use media::{MediaAsset, MediaKind, MediaRef};
pub use page::{Cursor, Page};
pub use platform::{Platform, ResourceKind};
pub use post::{
    Engagement, InstagramPostDetails, MusicInfo, PostExtension, PostMediaType, SocialPost,
    TiktokPostDetails,
};
pub use retry::{execute_with_policy, RetryError, RetryPolicy};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
