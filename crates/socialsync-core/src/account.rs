//! Platform-agnostic account record produced by every profile normalizer.
//!
//! Platform-specific data lives in [`AccountExtension`], a union tagged by
//! `platform`. The account's platform is read from that tag, so a record can
//! never claim one platform while carrying another platform's payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::media::MediaRef;
use crate::platform::Platform;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialAccount {
    /// Platform-native numeric or opaque user id. Always present.
    pub platform_user_id: String,
    pub handle: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<MediaRef>,
    /// High-resolution avatar, when the vendor exposes one.
    pub avatar_hd: Option<MediaRef>,
    pub external_url: Option<String>,
    pub follower_count: Option<u64>,
    pub following_count: Option<u64>,
    pub is_verified: bool,
    pub is_business: bool,
    pub extension: AccountExtension,
}

impl SocialAccount {
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.extension.platform()
    }

    /// All media references on the record, standard avatar first.
    pub fn media(&self) -> impl Iterator<Item = &MediaRef> {
        self.avatar.iter().chain(self.avatar_hd.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum AccountExtension {
    Instagram(InstagramAccount),
    Facebook(FacebookAccount),
    Tiktok(TiktokAccount),
    Twitter(TwitterAccount),
    Linkedin(LinkedinAccount),
    Youtube(YoutubeAccount),
}

impl AccountExtension {
    #[must_use]
    pub fn platform(&self) -> Platform {
        match self {
            AccountExtension::Instagram(_) => Platform::Instagram,
            AccountExtension::Facebook(_) => Platform::Facebook,
            AccountExtension::Tiktok(_) => Platform::Tiktok,
            AccountExtension::Twitter(_) => Platform::Twitter,
            AccountExtension::Linkedin(_) => Platform::Linkedin,
            AccountExtension::Youtube(_) => Platform::Youtube,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstagramAccount {
    pub category: Option<String>,
    pub business_email: Option<String>,
    pub business_phone: Option<String>,
    pub business_address: Option<BusinessAddress>,
    pub bio_links: Vec<BioLink>,
    pub post_count: Option<u64>,
    pub is_private: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub region: Option<String>,
    pub country_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BioLink {
    pub title: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TiktokAccount {
    pub sec_uid: Option<String>,
    /// Total likes received across all videos.
    pub heart_count: Option<u64>,
    pub video_count: Option<u64>,
    pub bio_link: Option<String>,
    pub commerce: Option<CommerceSettings>,
    pub privacy: PrivacySettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommerceSettings {
    pub is_commerce_user: bool,
    pub category: Option<String>,
    pub is_seller: bool,
}

/// TikTok interaction settings. The numeric settings are passed through as
/// the vendor reports them (0 = everyone, 1 = friends, 3 = off).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacySettings {
    pub is_private: bool,
    pub comment_setting: Option<u8>,
    pub duet_setting: Option<u8>,
    pub stitch_setting: Option<u8>,
    pub download_setting: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwitterAccount {
    pub tweet_count: Option<u64>,
    pub media_count: Option<u64>,
    pub location: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub is_blue_verified: bool,
    pub banner_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YoutubeAccount {
    pub channel_id: Option<String>,
    /// Rounded subscriber label as displayed, e.g. `"1.2M subscribers"`.
    pub subscriber_count_text: Option<String>,
    pub video_count: Option<u64>,
    pub view_count: Option<u64>,
    pub country: Option<String>,
    pub joined_date_text: Option<String>,
    pub links: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacebookAccount {
    pub category: Option<String>,
    pub like_count: Option<u64>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub rating_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkedinAccount {
    pub industry: Option<String>,
    pub headquarters: Option<String>,
    pub employee_count: Option<u64>,
    pub company_size: Option<String>,
    pub founded_year: Option<i32>,
    pub website: Option<String>,
    pub specialties: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(extension: AccountExtension) -> SocialAccount {
        SocialAccount {
            platform_user_id: "42".to_owned(),
            handle: "brand".to_owned(),
            display_name: None,
            bio: None,
            avatar: Some(MediaRef::image("https://cdn.example.com/a.jpg")),
            avatar_hd: Some(MediaRef::image("https://cdn.example.com/a_hd.jpg")),
            external_url: None,
            follower_count: None,
            following_count: None,
            is_verified: false,
            is_business: false,
            extension,
        }
    }

    #[test]
    fn platform_is_derived_from_extension() {
        let acct = account(AccountExtension::Tiktok(TiktokAccount::default()));
        assert_eq!(acct.platform(), Platform::Tiktok);
    }

    #[test]
    fn extension_serializes_with_platform_tag() {
        let acct = account(AccountExtension::Instagram(InstagramAccount::default()));
        let json = serde_json::to_value(&acct).unwrap();
        assert_eq!(json["extension"]["platform"], "instagram");
    }

    #[test]
    fn media_yields_both_avatars() {
        let acct = account(AccountExtension::Youtube(YoutubeAccount::default()));
        assert_eq!(acct.media().count(), 2);
    }
}
