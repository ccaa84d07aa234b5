use socialsync_core::{AccountExtension, FacebookAccount, MediaRef, Platform, SocialAccount};

use crate::endpoints::FACEBOOK_PROFILE;
use crate::error::ScraperError;
use crate::handle;
use crate::types::FacebookProfileResponse;

use super::{ensure_success, require};

/// Normalizes a Facebook page payload. The handle is recovered from the
/// page URL the vendor echoes back, falling back to the requested handle.
///
/// # Errors
///
/// - [`ScraperError::VendorFailure`] when the payload carries `success: false`.
/// - [`ScraperError::MissingField`] when the page id is absent.
pub fn normalize_facebook_profile(
    response: FacebookProfileResponse,
    requested_handle: &str,
) -> Result<SocialAccount, ScraperError> {
    ensure_success(response.success, FACEBOOK_PROFILE)?;
    let platform_user_id = require(response.id, FACEBOOK_PROFILE, "id")?;

    let handle = response
        .url
        .as_deref()
        .and_then(|url| handle::from_profile_url(Platform::Facebook, url))
        .unwrap_or_else(|| requested_handle.to_owned());

    Ok(SocialAccount {
        platform_user_id,
        handle,
        display_name: response.name,
        bio: response.intro,
        avatar: response.profile_pic_medium.map(MediaRef::image),
        avatar_hd: response.profile_pic_large.map(MediaRef::image),
        external_url: response.website.clone(),
        follower_count: response.follower_count,
        following_count: response.following_count,
        is_verified: response.is_verified.unwrap_or(false),
        is_business: response.is_business_page_active.unwrap_or(false),
        extension: AccountExtension::Facebook(FacebookAccount {
            category: response.category,
            like_count: response.like_count,
            address: response.address,
            phone: response.phone,
            email: response.email,
            website: response.website,
            rating_text: response.rating,
        }),
    })
}
