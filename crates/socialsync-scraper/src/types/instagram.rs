//! Instagram response types.
//!
//! ## Observed quirks
//!
//! - The profile payload nests the user under `data.user`.
//! - `business_address_json` is a JSON document *encoded as a string*; some
//!   responses carry it as a real object, most as `null` or `""`.
//! - `media_type` is numeric: `1` image, `2` video, `8` carousel.
//! - `taken_at` is unix seconds; `video_duration` is already seconds.
//! - Post pages continue with `more_available` + an opaque `next_max_id`.

use serde::Deserialize;
use serde_json::Value;

use super::{lenient, MediaCandidate};

#[derive(Debug, Deserialize)]
pub struct InstagramProfileResponse {
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub data: Option<InstagramProfileData>,
}

#[derive(Debug, Deserialize)]
pub struct InstagramProfileData {
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub user: Option<InstagramUser>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InstagramUser {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub biography: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub profile_pic_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub profile_pic_url_hd: Option<String>,
    #[serde(default, deserialize_with = "lenient::vec_skip_invalid")]
    pub hd_profile_pic_versions: Vec<MediaCandidate>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub external_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub edge_followed_by: Option<EdgeCount>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub edge_follow: Option<EdgeCount>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub edge_owner_to_timeline_media: Option<EdgeCount>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_verified: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_business_account: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_private: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub category_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub business_category_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub business_email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub business_phone_number: Option<String>,
    /// String-encoded JSON or an object; see module docs.
    #[serde(default)]
    pub business_address_json: Option<Value>,
    #[serde(default, deserialize_with = "lenient::vec_skip_invalid")]
    pub bio_links: Vec<InstagramBioLink>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EdgeCount {
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct InstagramBioLink {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub url: Option<String>,
}

/// Decoded form of `business_address_json`.
#[derive(Debug, Default, Deserialize)]
pub struct InstagramBusinessAddress {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub street_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub zip_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub city_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub region_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub country_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct InstagramPostsResponse {
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient::vec_skip_invalid")]
    pub items: Vec<InstagramPost>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub more_available: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub next_max_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InstagramPost {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub pk: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub caption: Option<InstagramCaption>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub media_type: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub taken_at: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub like_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub comment_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub play_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub view_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub reshare_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub video_duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub image_versions2: Option<ImageVersions>,
    #[serde(default, deserialize_with = "lenient::vec_skip_invalid")]
    pub video_versions: Vec<MediaCandidate>,
    #[serde(default, deserialize_with = "lenient::vec_skip_invalid")]
    pub carousel_media: Vec<InstagramCarouselItem>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub carousel_media_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub product_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub location: Option<InstagramLocation>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_paid_partnership: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InstagramCaption {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImageVersions {
    #[serde(default, deserialize_with = "lenient::vec_skip_invalid")]
    pub candidates: Vec<MediaCandidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InstagramCarouselItem {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub media_type: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub image_versions2: Option<ImageVersions>,
    #[serde(default, deserialize_with = "lenient::vec_skip_invalid")]
    pub video_versions: Vec<MediaCandidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InstagramLocation {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
}
