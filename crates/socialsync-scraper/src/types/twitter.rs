//! Twitter / X profile response.
//!
//! Mirrors the GraphQL user object: a `rest_id` plus a `legacy` block.
//! `created_at` uses the classic `Wed Oct 10 20:19:24 +0000 2018` format.

use serde::Deserialize;

use super::lenient;

#[derive(Debug, Deserialize)]
pub struct TwitterProfileResponse {
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub rest_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_blue_verified: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub legacy: Option<TwitterLegacy>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TwitterLegacy {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub screen_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub profile_image_url_https: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub profile_banner_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub followers_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub friends_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub statuses_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub media_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub verified: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub verified_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub entities: Option<TwitterEntities>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TwitterEntities {
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub url: Option<TwitterUrlEntity>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TwitterUrlEntity {
    #[serde(default, deserialize_with = "lenient::vec_skip_invalid")]
    pub urls: Vec<TwitterExpandedUrl>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TwitterExpandedUrl {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub expanded_url: Option<String>,
}
