use socialsync_core::{AccountExtension, SocialAccount, YoutubeAccount};

use crate::endpoints::YOUTUBE_CHANNEL;
use crate::error::ScraperError;
use crate::types::{MediaCandidate, YoutubeChannelResponse};

use super::{
    ensure_success, handle_or, image_ref, require, select_closest_width, TARGET_IMAGE_WIDTH,
};

/// Normalizes a YouTube channel payload. The channel id doubles as the
/// platform user id; subscribers are reported as followers.
///
/// # Errors
///
/// - [`ScraperError::VendorFailure`] when the payload carries `success: false`.
/// - [`ScraperError::MissingField`] when `channelId` is absent.
pub fn normalize_youtube_channel(
    response: YoutubeChannelResponse,
    requested_handle: &str,
) -> Result<SocialAccount, ScraperError> {
    ensure_success(response.success, YOUTUBE_CHANNEL)?;
    let platform_user_id = require(response.channel_id, YOUTUBE_CHANNEL, "channelId")?;

    let sources = response
        .avatar
        .and_then(|a| a.image)
        .map(|i| i.sources)
        .unwrap_or_default();
    let avatar = select_closest_width(&sources, TARGET_IMAGE_WIDTH);
    let widest = widest(&sources);
    let avatar_hd = match (avatar, widest) {
        (Some(a), Some(w)) if a.url != w.url => image_ref(w),
        _ => None,
    };

    Ok(SocialAccount {
        platform_user_id: platform_user_id.clone(),
        handle: handle_or(response.handle, requested_handle),
        display_name: response.name,
        bio: response.description,
        avatar: avatar.and_then(image_ref),
        avatar_hd,
        external_url: response.links.first().cloned(),
        follower_count: response.subscriber_count,
        following_count: None,
        is_verified: response.is_verified.unwrap_or(false),
        is_business: false,
        extension: AccountExtension::Youtube(YoutubeAccount {
            channel_id: Some(platform_user_id),
            subscriber_count_text: response.subscriber_count_text,
            video_count: response.video_count,
            view_count: response.view_count,
            country: response.country,
            joined_date_text: response.joined_date_text,
            links: response.links,
        }),
    })
}

fn widest(sources: &[MediaCandidate]) -> Option<&MediaCandidate> {
    sources
        .iter()
        .filter(|c| c.url.is_some())
        .fold(None, |best: Option<&MediaCandidate>, c| match best {
            Some(b) if b.width.unwrap_or(0) >= c.width.unwrap_or(0) => Some(b),
            _ => Some(c),
        })
}
