use serde::Deserialize;

use super::lenient;

/// Facebook page profile. Looked up by page URL rather than handle.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacebookProfileResponse {
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub success: Option<bool>,
    #[serde(default, alias = "pageId", deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub intro: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub website: Option<String>,
    #[serde(default, alias = "ratingText", deserialize_with = "lenient::opt_string")]
    pub rating: Option<String>,
    #[serde(default, alias = "likes", deserialize_with = "lenient::opt_u64")]
    pub like_count: Option<u64>,
    #[serde(default, alias = "followers", deserialize_with = "lenient::opt_u64")]
    pub follower_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub following_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub profile_pic_medium: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub profile_pic_large: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_verified: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_business_page_active: Option<bool>,
}
