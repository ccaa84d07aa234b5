use socialsync_core::{
    AccountExtension, CommerceSettings, Engagement, MediaRef, MusicInfo, Page, PostExtension,
    PostMediaType, PrivacySettings, SocialAccount, SocialPost, TiktokAccount, TiktokPostDetails,
};

use crate::endpoints::{TIKTOK_PROFILE, TIKTOK_VIDEOS};
use crate::error::ScraperError;
use crate::pagination;
use crate::types::tiktok::{TiktokUrlSet, TiktokVideo};
use crate::types::{MediaCandidate, TiktokProfileResponse, TiktokVideosResponse};

use super::{
    ensure_success, from_unix_seconds, handle_or, image_ref, millis_to_secs, require,
    select_highest, video_ref,
};

/// Normalizes a TikTok profile payload.
///
/// # Errors
///
/// - [`ScraperError::VendorFailure`] when the payload carries `success: false`.
/// - [`ScraperError::MissingField`] when `user` or `user.id` is absent.
pub fn normalize_tiktok_profile(
    response: TiktokProfileResponse,
    requested_handle: &str,
) -> Result<SocialAccount, ScraperError> {
    ensure_success(response.success, TIKTOK_PROFILE)?;
    let user = response.user.ok_or_else(|| ScraperError::MissingField {
        context: TIKTOK_PROFILE.to_owned(),
        field: "user",
    })?;
    let platform_user_id = require(user.id, TIKTOK_PROFILE, "user.id")?;
    let stats = response.stats.unwrap_or_default();

    let commerce = user.commerce_user_info.map(|info| CommerceSettings {
        is_commerce_user: info.commerce_user.unwrap_or(false),
        category: info.category,
        is_seller: info.tt_seller.unwrap_or(false),
    });
    let is_business = commerce.as_ref().is_some_and(|c| c.is_commerce_user);
    let bio_link = user.bio_link.and_then(|b| b.link);

    Ok(SocialAccount {
        platform_user_id,
        handle: handle_or(user.unique_id, requested_handle),
        display_name: user.nickname,
        bio: user.signature,
        avatar: user.avatar_medium.or(user.avatar_thumb).map(MediaRef::image),
        avatar_hd: user.avatar_larger.map(MediaRef::image),
        external_url: bio_link.clone(),
        follower_count: stats.follower_count,
        following_count: stats.following_count,
        is_verified: user.verified.unwrap_or(false),
        is_business,
        extension: AccountExtension::Tiktok(TiktokAccount {
            sec_uid: user.sec_uid,
            heart_count: stats.heart_count,
            video_count: stats.video_count,
            bio_link,
            commerce,
            privacy: PrivacySettings {
                is_private: user.private_account.unwrap_or(false),
                comment_setting: setting(user.comment_setting),
                duet_setting: setting(user.duet_setting),
                stitch_setting: setting(user.stitch_setting),
                download_setting: setting(user.download_setting),
            },
        }),
    })
}

fn setting(raw: Option<u32>) -> Option<u8> {
    raw.and_then(|v| u8::try_from(v).ok())
}

/// Normalizes one page of TikTok videos. Items without an id are skipped.
///
/// `requested_handle` is used to build a canonical video URL when the vendor
/// omits `share_url` and the author block.
///
/// # Errors
///
/// Returns [`ScraperError::VendorFailure`] when the payload carries
/// `success: false`.
pub fn normalize_tiktok_videos(
    response: TiktokVideosResponse,
    requested_handle: &str,
) -> Result<Page<SocialPost>, ScraperError> {
    ensure_success(response.success, TIKTOK_VIDEOS)?;
    let continuation = match response.has_more {
        Some(flag) => pagination::from_flagged_number(flag, response.max_cursor),
        None => pagination::from_number(response.max_cursor),
    };

    let posts = response
        .aweme_list
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let post = normalize_video(item, requested_handle);
            if post.is_none() {
                tracing::warn!(index, "skipping tiktok video without an aweme_id");
            }
            post
        })
        .collect();

    Ok(continuation.into_page(posts))
}

fn normalize_video(item: TiktokVideo, requested_handle: &str) -> Option<SocialPost> {
    let platform_post_id = item.aweme_id?;
    let video_info = item.video.unwrap_or_default();

    let thumbnail = video_info
        .cover
        .as_ref()
        .and_then(first_url)
        .and_then(|c| image_ref(&c));

    let variants: Vec<MediaCandidate> = video_info
        .play_addr
        .iter()
        .chain(video_info.bit_rate.iter().filter_map(|b| b.play_addr.as_ref()))
        .filter_map(first_url)
        .collect();
    let video = select_highest(&variants).and_then(video_ref);

    let media = match &video {
        Some(v) => std::iter::once(v.clone()).chain(thumbnail.clone()).collect(),
        None => Vec::new(),
    };

    let author = item
        .author
        .and_then(|a| a.unique_id)
        .unwrap_or_else(|| requested_handle.to_owned());
    let url = item
        .share_url
        .or_else(|| Some(format!("https://www.tiktok.com/@{author}/video/{platform_post_id}")));

    let stats = item.statistics.unwrap_or_default();
    let mut hashtags: Vec<String> = Vec::new();
    for tag in item.text_extra.into_iter().filter_map(|t| t.hashtag_name) {
        if !hashtags.contains(&tag) {
            hashtags.push(tag);
        }
    }

    Some(SocialPost {
        platform_post_id,
        short_code: None,
        url,
        caption: item.desc,
        media_type: PostMediaType::Video,
        media,
        thumbnail,
        engagement: Engagement {
            views: stats.play_count.unwrap_or(0),
            likes: stats.digg_count.unwrap_or(0),
            comments: stats.comment_count.unwrap_or(0),
            shares: stats.share_count.unwrap_or(0),
        },
        published_at: from_unix_seconds(item.create_time),
        video_duration_secs: video_info.duration.map(millis_to_secs),
        extension: PostExtension::Tiktok(TiktokPostDetails {
            region: item.region,
            language: item.desc_language,
            hashtags,
            music: item
                .music
                .map(|m| MusicInfo {
                    title: m.title,
                    author: m.author,
                })
                .filter(|m| m.title.is_some() || m.author.is_some()),
            save_count: stats.collect_count.unwrap_or(0),
            is_ad: item.is_ads.unwrap_or(false),
        }),
    })
}

/// The primary mirror of a TikTok URL set as a media candidate.
fn first_url(set: &TiktokUrlSet) -> Option<MediaCandidate> {
    let url = set.url_list.iter().find(|u| !u.trim().is_empty())?;
    Some(MediaCandidate {
        url: Some(url.clone()),
        width: set.width,
        height: set.height,
    })
}
