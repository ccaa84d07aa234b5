//! Normalization from vendor payloads to the platform-agnostic records in
//! [`socialsync_core`].
//!
//! Rules shared by every platform module:
//!
//! - Optional fields are only set when the vendor supplied them; blank
//!   strings count as absent.
//! - Images: pick the candidate whose width is closest to
//!   [`TARGET_IMAGE_WIDTH`]. Videos: pick the tallest variant. Ties go to the
//!   earlier candidate in vendor order.
//! - Unix-second timestamps become `DateTime<Utc>`; millisecond durations are
//!   divided by 1000.
//! - A `success: false` flag or a missing platform user id is an error; a
//!   malformed optional sub-structure is not.

mod facebook;
mod instagram;
mod linkedin;
mod tiktok;
mod twitter;
mod youtube;

use chrono::{DateTime, Utc};
use socialsync_core::{MediaRef, PostMediaType};

use crate::error::ScraperError;
use crate::types::MediaCandidate;

pub use facebook::normalize_facebook_profile;
pub use instagram::{normalize_instagram_posts, normalize_instagram_profile};
pub use linkedin::normalize_linkedin_company;
pub use tiktok::{normalize_tiktok_profile, normalize_tiktok_videos};
pub use twitter::normalize_twitter_profile;
pub use youtube::normalize_youtube_channel;

/// Preferred width for profile and post images.
pub const TARGET_IMAGE_WIDTH: u32 = 1080;

/// Maps Instagram's numeric media type. Unknown codes fall back to
/// [`PostMediaType::Image`] rather than failing the post.
#[must_use]
pub fn media_type_from_code(code: Option<i64>) -> PostMediaType {
    match code {
        Some(2) => PostMediaType::Video,
        Some(8) => PostMediaType::Carousel,
        _ => PostMediaType::Image,
    }
}

/// Candidate whose width is numerically closest to `target`. Candidates
/// without a URL are ignored; candidates without a width rank last.
#[must_use]
pub fn select_closest_width(candidates: &[MediaCandidate], target: u32) -> Option<&MediaCandidate> {
    let mut best: Option<(&MediaCandidate, u32)> = None;
    for candidate in candidates.iter().filter(|c| c.url.is_some()) {
        let distance = candidate.width.map_or(u32::MAX, |w| w.abs_diff(target));
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((candidate, distance));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Tallest candidate with a URL; the first one wins on ties.
#[must_use]
pub fn select_highest(candidates: &[MediaCandidate]) -> Option<&MediaCandidate> {
    let mut best: Option<(&MediaCandidate, u32)> = None;
    for candidate in candidates.iter().filter(|c| c.url.is_some()) {
        let height = candidate.height.unwrap_or(0);
        if best.is_none_or(|(_, best_height)| height > best_height) {
            best = Some((candidate, height));
        }
    }
    best.map(|(candidate, _)| candidate)
}

pub(crate) fn image_ref(candidate: &MediaCandidate) -> Option<MediaRef> {
    let url = candidate.url.as_deref()?;
    Some(MediaRef::image(url).with_dimensions(candidate.width, candidate.height))
}

pub(crate) fn video_ref(candidate: &MediaCandidate) -> Option<MediaRef> {
    let url = candidate.url.as_deref()?;
    Some(MediaRef::video(url).with_dimensions(candidate.width, candidate.height))
}

#[must_use]
pub fn from_unix_seconds(ts: Option<i64>) -> Option<DateTime<Utc>> {
    ts.filter(|&t| t > 0)
        .and_then(|t| DateTime::from_timestamp(t, 0))
}

#[must_use]
pub fn millis_to_secs(ms: f64) -> f64 {
    ms / 1000.0
}

pub(crate) fn ensure_success(success: Option<bool>, context: &str) -> Result<(), ScraperError> {
    if success == Some(false) {
        return Err(ScraperError::VendorFailure {
            endpoint: context.to_owned(),
            message: "vendor returned success: false".to_owned(),
        });
    }
    Ok(())
}

pub(crate) fn require(
    value: Option<String>,
    context: &str,
    field: &'static str,
) -> Result<String, ScraperError> {
    value.ok_or_else(|| ScraperError::MissingField {
        context: context.to_owned(),
        field,
    })
}

/// Vendor handle when supplied (without a leading `@`), otherwise the handle
/// the caller asked for.
pub(crate) fn handle_or(vendor: Option<String>, requested: &str) -> String {
    vendor
        .map(|h| h.trim_start_matches('@').to_owned())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| requested.to_owned())
}
