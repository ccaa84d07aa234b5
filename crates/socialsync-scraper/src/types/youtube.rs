use serde::Deserialize;

use super::{lenient, MediaCandidate};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeChannelResponse {
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub channel_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub handle: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub avatar: Option<YoutubeAvatar>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub subscriber_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub subscriber_count_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub video_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub view_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub joined_date_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::vec_skip_invalid")]
    pub links: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_verified: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct YoutubeAvatar {
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub image: Option<YoutubeImage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct YoutubeImage {
    #[serde(default, deserialize_with = "lenient::vec_skip_invalid")]
    pub sources: Vec<MediaCandidate>,
}
