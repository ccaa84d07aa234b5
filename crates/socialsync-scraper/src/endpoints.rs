//! Vendor endpoint paths and their query parameter names.

use socialsync_core::{Platform, ResourceKind};

use crate::error::ScraperError;

pub const INSTAGRAM_PROFILE: &str = "/v1/instagram/profile";
pub const INSTAGRAM_POSTS: &str = "/v2/instagram/user/posts";
pub const TIKTOK_PROFILE: &str = "/v1/tiktok/profile";
pub const TIKTOK_VIDEOS: &str = "/v3/tiktok/profile/videos";
pub const TWITTER_PROFILE: &str = "/v1/twitter/profile";
pub const YOUTUBE_CHANNEL: &str = "/v1/youtube/channel";
pub const FACEBOOK_PROFILE: &str = "/v1/facebook/profile";
pub const LINKEDIN_COMPANY: &str = "/v1/linkedin/company";
pub const WEBSITE_CONTENT: &str = "/v1/website/content";

/// Profile endpoint for `platform`.
#[must_use]
pub fn profile_endpoint(platform: Platform) -> &'static str {
    match platform {
        Platform::Instagram => INSTAGRAM_PROFILE,
        Platform::Tiktok => TIKTOK_PROFILE,
        Platform::Twitter => TWITTER_PROFILE,
        Platform::Youtube => YOUTUBE_CHANNEL,
        Platform::Facebook => FACEBOOK_PROFILE,
        Platform::Linkedin => LINKEDIN_COMPANY,
    }
}

/// Post-list endpoint and the name of its cursor parameter.
///
/// # Errors
///
/// Returns [`ScraperError::UnsupportedResource`] for platforms without a
/// post-list normalizer.
pub fn posts_endpoint(platform: Platform) -> Result<(&'static str, &'static str), ScraperError> {
    match platform {
        Platform::Instagram => Ok((INSTAGRAM_POSTS, "next_max_id")),
        Platform::Tiktok => Ok((TIKTOK_VIDEOS, "max_cursor")),
        Platform::Twitter | Platform::Youtube | Platform::Facebook | Platform::Linkedin => {
            Err(ScraperError::UnsupportedResource {
                platform,
                resource: ResourceKind::Posts,
            })
        }
    }
}

/// The identity parameter for a profile lookup.
///
/// Facebook and LinkedIn endpoints take a full page URL; YouTube takes a
/// `channelId` when the handle is a raw `UC…` channel id; the rest take the
/// bare handle.
#[must_use]
pub fn identity_param(platform: Platform, handle: &str) -> (&'static str, String) {
    match platform {
        Platform::Facebook => ("url", format!("https://www.facebook.com/{handle}")),
        Platform::Linkedin => ("url", format!("https://www.linkedin.com/company/{handle}")),
        Platform::Youtube if is_channel_id(handle) => ("channelId", handle.to_owned()),
        Platform::Instagram | Platform::Tiktok | Platform::Twitter | Platform::Youtube => {
            ("handle", handle.to_owned())
        }
    }
}

fn is_channel_id(handle: &str) -> bool {
    handle.len() == 24 && handle.starts_with("UC")
}
