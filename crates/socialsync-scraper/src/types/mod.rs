//! Vendor response shapes, one module per platform.
//!
//! Every field is optional and decoded leniently: the normalizers decide
//! what is mandatory, so a single odd field never fails a whole payload.

pub mod facebook;
pub mod instagram;
pub(crate) mod lenient;
pub mod linkedin;
pub mod tiktok;
pub mod twitter;
pub mod youtube;

use serde::Deserialize;

pub use facebook::FacebookProfileResponse;
pub use instagram::{InstagramPostsResponse, InstagramProfileResponse};
pub use linkedin::LinkedinCompanyResponse;
pub use tiktok::{TiktokProfileResponse, TiktokVideosResponse};
pub use twitter::TwitterProfileResponse;
pub use youtube::YoutubeChannelResponse;

/// One rendition of an image or video: URL plus optional pixel size.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaCandidate {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub height: Option<u32>,
}
