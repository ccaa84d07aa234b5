use serde_json::Value;
use socialsync_core::{
    AccountExtension, BioLink, BusinessAddress, Engagement, InstagramAccount,
    InstagramPostDetails, MediaRef, Page, PostExtension, PostMediaType, SocialAccount, SocialPost,
};

use crate::endpoints::{INSTAGRAM_POSTS, INSTAGRAM_PROFILE};
use crate::error::ScraperError;
use crate::pagination;
use crate::types::instagram::{
    ImageVersions, InstagramBusinessAddress, InstagramCarouselItem, InstagramPost,
};
use crate::types::{InstagramPostsResponse, InstagramProfileResponse, MediaCandidate};

use super::{
    ensure_success, from_unix_seconds, handle_or, image_ref, media_type_from_code, require,
    select_closest_width, select_highest, video_ref, TARGET_IMAGE_WIDTH,
};

/// Normalizes an Instagram profile payload.
///
/// # Errors
///
/// - [`ScraperError::VendorFailure`] when the payload carries `success: false`.
/// - [`ScraperError::MissingField`] when `data.user` or its `id` is absent.
pub fn normalize_instagram_profile(
    response: InstagramProfileResponse,
    requested_handle: &str,
) -> Result<SocialAccount, ScraperError> {
    ensure_success(response.success, INSTAGRAM_PROFILE)?;
    let user = response
        .data
        .and_then(|data| data.user)
        .ok_or_else(|| ScraperError::MissingField {
            context: INSTAGRAM_PROFILE.to_owned(),
            field: "data.user",
        })?;
    let platform_user_id = require(user.id, INSTAGRAM_PROFILE, "id")?;

    let avatar_hd = select_closest_width(&user.hd_profile_pic_versions, TARGET_IMAGE_WIDTH)
        .and_then(image_ref)
        .or_else(|| user.profile_pic_url_hd.map(MediaRef::image));

    let bio_links = user
        .bio_links
        .into_iter()
        .filter_map(|link| {
            Some(BioLink {
                title: link.title,
                url: link.url?,
            })
        })
        .collect();

    Ok(SocialAccount {
        platform_user_id,
        handle: handle_or(user.username, requested_handle),
        display_name: user.full_name,
        bio: user.biography,
        avatar: user.profile_pic_url.map(MediaRef::image),
        avatar_hd,
        external_url: user.external_url,
        follower_count: user.edge_followed_by.and_then(|e| e.count),
        following_count: user.edge_follow.and_then(|e| e.count),
        is_verified: user.is_verified.unwrap_or(false),
        is_business: user.is_business_account.unwrap_or(false),
        extension: AccountExtension::Instagram(InstagramAccount {
            category: user.category_name.or(user.business_category_name),
            business_email: user.business_email,
            business_phone: user.business_phone_number,
            business_address: parse_business_address(user.business_address_json),
            bio_links,
            post_count: user.edge_owner_to_timeline_media.and_then(|e| e.count),
            is_private: user.is_private.unwrap_or(false),
        }),
    })
}

/// Decodes `business_address_json`, which arrives as a JSON string, an
/// object, or nothing. Malformed or all-empty addresses become `None`.
fn parse_business_address(raw: Option<Value>) -> Option<BusinessAddress> {
    let decoded: InstagramBusinessAddress = match raw? {
        Value::String(s) => serde_json::from_str(&s).ok()?,
        obj @ Value::Object(_) => serde_json::from_value(obj).ok()?,
        _ => return None,
    };

    let address = BusinessAddress {
        street: decoded.street_address,
        city: decoded.city_name,
        zip: decoded.zip_code,
        region: decoded.region_name,
        country_code: decoded.country_code,
        latitude: decoded.latitude,
        longitude: decoded.longitude,
    };
    (address != BusinessAddress::default()).then_some(address)
}

/// Normalizes one page of Instagram posts. Items without an id are skipped.
///
/// # Errors
///
/// Returns [`ScraperError::VendorFailure`] when the payload carries
/// `success: false`.
pub fn normalize_instagram_posts(
    response: InstagramPostsResponse,
) -> Result<Page<SocialPost>, ScraperError> {
    ensure_success(response.success, INSTAGRAM_POSTS)?;
    let continuation = pagination::from_token(response.more_available, response.next_max_id);

    let posts = response
        .items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let post = normalize_post(item);
            if post.is_none() {
                tracing::warn!(index, "skipping instagram post without an id");
            }
            post
        })
        .collect();

    Ok(continuation.into_page(posts))
}

fn normalize_post(post: InstagramPost) -> Option<SocialPost> {
    let platform_post_id = post.id.or(post.pk)?;
    let media_type = media_type_from_code(post.media_type);
    let thumbnail = best_image(post.image_versions2.as_ref());

    let media = match media_type {
        PostMediaType::Image => thumbnail.clone().into_iter().collect(),
        PostMediaType::Video => best_video(&post.video_versions)
            .into_iter()
            .chain(thumbnail.clone())
            .collect(),
        PostMediaType::Carousel => post
            .carousel_media
            .iter()
            .filter_map(carousel_item_media)
            .collect(),
    };

    let url = post
        .code
        .as_deref()
        .map(|code| format!("https://www.instagram.com/p/{code}/"));

    Some(SocialPost {
        platform_post_id,
        short_code: post.code,
        url,
        caption: post.caption.and_then(|c| c.text),
        media_type,
        media,
        thumbnail,
        engagement: Engagement {
            views: post.play_count.or(post.view_count).unwrap_or(0),
            likes: post.like_count.unwrap_or(0),
            comments: post.comment_count.unwrap_or(0),
            shares: post.reshare_count.unwrap_or(0),
        },
        published_at: from_unix_seconds(post.taken_at),
        video_duration_secs: post.video_duration,
        extension: PostExtension::Instagram(InstagramPostDetails {
            product_type: post.product_type,
            carousel_media_count: post.carousel_media_count,
            location_name: post.location.and_then(|l| l.name),
            is_paid_partnership: post.is_paid_partnership.unwrap_or(false),
        }),
    })
}

fn carousel_item_media(item: &InstagramCarouselItem) -> Option<MediaRef> {
    match media_type_from_code(item.media_type) {
        PostMediaType::Video => {
            best_video(&item.video_versions).or_else(|| best_image(item.image_versions2.as_ref()))
        }
        PostMediaType::Image | PostMediaType::Carousel => best_image(item.image_versions2.as_ref()),
    }
}

fn best_image(versions: Option<&ImageVersions>) -> Option<MediaRef> {
    select_closest_width(&versions?.candidates, TARGET_IMAGE_WIDTH).and_then(image_ref)
}

fn best_video(variants: &[MediaCandidate]) -> Option<MediaRef> {
    select_highest(variants).and_then(video_ref)
}

#[cfg(test)]
#[path = "instagram_test.rs"]
mod tests;
