use chrono::{DateTime, Utc};
use socialsync_core::{AccountExtension, MediaRef, SocialAccount, TwitterAccount};

use crate::endpoints::TWITTER_PROFILE;
use crate::error::ScraperError;
use crate::types::TwitterProfileResponse;

use super::{ensure_success, handle_or, require};

const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Normalizes a Twitter / X profile payload.
///
/// # Errors
///
/// - [`ScraperError::VendorFailure`] when the payload carries `success: false`.
/// - [`ScraperError::MissingField`] when `rest_id` is absent.
pub fn normalize_twitter_profile(
    response: TwitterProfileResponse,
    requested_handle: &str,
) -> Result<SocialAccount, ScraperError> {
    ensure_success(response.success, TWITTER_PROFILE)?;
    let platform_user_id = require(response.rest_id, TWITTER_PROFILE, "rest_id")?;
    let legacy = response.legacy.unwrap_or_default();

    let external_url = legacy
        .entities
        .and_then(|e| e.url)
        .and_then(|u| u.urls.into_iter().find_map(|x| x.expanded_url));
    let is_blue_verified = response.is_blue_verified.unwrap_or(false);
    let is_business = legacy.verified_type.as_deref() == Some("Business");

    Ok(SocialAccount {
        platform_user_id,
        handle: handle_or(legacy.screen_name, requested_handle),
        display_name: legacy.name,
        bio: legacy.description,
        avatar: legacy.profile_image_url_https.map(MediaRef::image),
        avatar_hd: None,
        external_url,
        follower_count: legacy.followers_count,
        following_count: legacy.friends_count,
        is_verified: legacy.verified.unwrap_or(false) || is_blue_verified,
        is_business,
        extension: AccountExtension::Twitter(TwitterAccount {
            tweet_count: legacy.statuses_count,
            media_count: legacy.media_count,
            location: legacy.location,
            created_at: legacy.created_at.as_deref().and_then(parse_created_at),
            is_blue_verified,
            banner_url: legacy.profile_banner_url,
        }),
    })
}

fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_str(raw, CREATED_AT_FORMAT) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(error) => {
            tracing::debug!(raw, %error, "unparseable twitter created_at");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(value: serde_json::Value) -> TwitterProfileResponse {
        serde_json::from_value(value).expect("twitter fixture should deserialize")
    }

    #[test]
    fn profile_maps_legacy_block() {
        let account = normalize_twitter_profile(
            response(json!({
                "rest_id": "44196397",
                "is_blue_verified": true,
                "legacy": {
                    "screen_name": "AcmeDrinks",
                    "name": "Acme",
                    "description": "Crisp drinks.",
                    "profile_image_url_https": "https://pbs.example.com/normal.jpg",
                    "profile_banner_url": "https://pbs.example.com/banner",
                    "location": "Charleston, SC",
                    "created_at": "Wed Oct 10 20:19:24 +0000 2018",
                    "followers_count": 1200,
                    "friends_count": 80,
                    "statuses_count": 5400,
                    "media_count": 310,
                    "verified": false,
                    "verified_type": "Business",
                    "entities": {"url": {"urls": [{"expanded_url": "https://acme.example.com"}]}}
                }
            })),
            "acmedrinks",
        )
        .unwrap();

        assert_eq!(account.platform_user_id, "44196397");
        assert_eq!(account.handle, "AcmeDrinks");
        assert_eq!(account.external_url.as_deref(), Some("https://acme.example.com"));
        assert_eq!(account.follower_count, Some(1200));
        assert_eq!(account.following_count, Some(80));
        assert!(account.is_verified);
        assert!(account.is_business);
        assert!(account.avatar_hd.is_none());

        let AccountExtension::Twitter(ext) = account.extension else {
            panic!("expected twitter extension");
        };
        assert_eq!(ext.tweet_count, Some(5400));
        assert_eq!(ext.media_count, Some(310));
        assert!(ext.is_blue_verified);
        assert_eq!(
            ext.created_at.map(|t| t.to_rfc3339()).as_deref(),
            Some("2018-10-10T20:19:24+00:00")
        );
    }

    #[test]
    fn odd_created_at_is_dropped() {
        let account = normalize_twitter_profile(
            response(json!({"rest_id": "1", "legacy": {"created_at": "yesterday"}})),
            "acme",
        )
        .unwrap();
        let AccountExtension::Twitter(ext) = account.extension else {
            panic!("expected twitter extension");
        };
        assert_eq!(ext.created_at, None);
        assert_eq!(account.handle, "acme");
        assert!(!account.is_verified);
        assert!(!account.is_business);
    }

    #[test]
    fn missing_rest_id_is_an_error() {
        let err = normalize_twitter_profile(
            response(json!({"legacy": {"screen_name": "acme"}})),
            "acme",
        )
        .unwrap_err();
        assert!(matches!(err, ScraperError::MissingField { field: "rest_id", .. }));
    }
}
