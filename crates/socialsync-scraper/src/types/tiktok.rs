//! TikTok response types.
//!
//! Profile fields are camelCase; the video list (`aweme_list`) is
//! snake_case. Video `duration` is milliseconds, `create_time` unix seconds.
//! `has_more` arrives as `0`/`1` or a bool, and is sometimes missing
//! entirely, leaving only `max_cursor` as the continuation signal.

use serde::Deserialize;

use super::lenient;

#[derive(Debug, Deserialize)]
pub struct TiktokProfileResponse {
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub user: Option<TiktokUser>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub stats: Option<TiktokStats>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TiktokUser {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub unique_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub nickname: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub signature: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub avatar_thumb: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub avatar_medium: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub avatar_larger: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub verified: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub sec_uid: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub private_account: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub bio_link: Option<TiktokBioLink>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub commerce_user_info: Option<TiktokCommerceInfo>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub comment_setting: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub duet_setting: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub stitch_setting: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub download_setting: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TiktokBioLink {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TiktokCommerceInfo {
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub commerce_user: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub category: Option<String>,
    #[serde(default, alias = "isSeller", deserialize_with = "lenient::opt_bool")]
    pub tt_seller: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TiktokStats {
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub follower_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub following_count: Option<u64>,
    #[serde(default, alias = "heart", deserialize_with = "lenient::opt_u64")]
    pub heart_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub video_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct TiktokVideosResponse {
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient::vec_skip_invalid")]
    pub aweme_list: Vec<TiktokVideo>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub max_cursor: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub has_more: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TiktokVideo {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub aweme_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub create_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub desc_language: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub share_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub author: Option<TiktokAuthor>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub statistics: Option<TiktokStatistics>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub video: Option<TiktokVideoInfo>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub music: Option<TiktokMusic>,
    #[serde(default, deserialize_with = "lenient::vec_skip_invalid")]
    pub text_extra: Vec<TiktokTextExtra>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_ads: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TiktokAuthor {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub unique_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TiktokStatistics {
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub play_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub digg_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub comment_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub share_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub collect_count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TiktokVideoInfo {
    /// Milliseconds.
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub cover: Option<TiktokUrlSet>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub play_addr: Option<TiktokUrlSet>,
    #[serde(default, deserialize_with = "lenient::vec_skip_invalid")]
    pub bit_rate: Vec<TiktokBitRate>,
}

/// A CDN address with mirrors; `url_list[0]` is the primary.
#[derive(Debug, Default, Deserialize)]
pub struct TiktokUrlSet {
    #[serde(default, deserialize_with = "lenient::vec_skip_invalid")]
    pub url_list: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub height: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TiktokBitRate {
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub play_addr: Option<TiktokUrlSet>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TiktokMusic {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub author: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TiktokTextExtra {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub hashtag_name: Option<String>,
}
