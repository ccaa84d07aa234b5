use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::media::MediaRef;
use crate::platform::Platform;

/// Shape of a post's primary content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostMediaType {
    Image,
    Video,
    Carousel,
}

/// Engagement counters. Vendors omit zero-valued counters, so every field
/// defaults to `0` rather than `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

/// A normalized post from any platform with a post-list normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub platform_post_id: String,
    /// URL-safe short code (Instagram `code`); `None` where the platform has none.
    pub short_code: Option<String>,
    pub url: Option<String>,
    pub caption: Option<String>,
    pub media_type: PostMediaType,
    /// Playable assets. Empty only when the vendor returned none.
    pub media: Vec<MediaRef>,
    pub thumbnail: Option<MediaRef>,
    pub engagement: Engagement,
    pub published_at: Option<DateTime<Utc>>,
    pub video_duration_secs: Option<f64>,
    pub extension: PostExtension,
}

impl SocialPost {
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.extension.platform()
    }

    /// Media items followed by the thumbnail.
    pub fn all_media(&self) -> impl Iterator<Item = &MediaRef> {
        self.media.iter().chain(self.thumbnail.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum PostExtension {
    Instagram(InstagramPostDetails),
    Tiktok(TiktokPostDetails),
}

impl PostExtension {
    #[must_use]
    pub fn platform(&self) -> Platform {
        match self {
            PostExtension::Instagram(_) => Platform::Instagram,
            PostExtension::Tiktok(_) => Platform::Tiktok,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstagramPostDetails {
    /// Vendor surface type: `feed`, `clips`, `carousel_container`, `igtv`.
    pub product_type: Option<String>,
    pub carousel_media_count: Option<u32>,
    pub location_name: Option<String>,
    pub is_paid_partnership: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TiktokPostDetails {
    pub region: Option<String>,
    pub language: Option<String>,
    pub hashtags: Vec<String>,
    pub music: Option<MusicInfo>,
    pub save_count: u64,
    pub is_ad: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicInfo {
    pub title: Option<String>,
    pub author: Option<String>,
}
