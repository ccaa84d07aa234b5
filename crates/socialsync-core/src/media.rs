use serde::{Deserialize, Serialize};

/// Whether a media reference points at a still image or a playable video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// A reference to a remote media asset discovered while scraping.
///
/// `source_url` is the vendor/CDN address, which usually expires. `stored_url`
/// is filled in once the asset has been copied into durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    pub kind: MediaKind,
    pub source_url: String,
    pub stored_url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl MediaRef {
    #[must_use]
    pub fn image(source_url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Image,
            source_url: source_url.into(),
            stored_url: None,
            width: None,
            height: None,
        }
    }

    #[must_use]
    pub fn video(source_url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            source_url: source_url.into(),
            stored_url: None,
            width: None,
            height: None,
        }
    }

    #[must_use]
    pub fn with_dimensions(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// The durable URL when the asset has been stored, otherwise the source URL.
    #[must_use]
    pub fn best_url(&self) -> &str {
        self.stored_url.as_deref().unwrap_or(&self.source_url)
    }
}

/// Result of copying one remote asset into durable object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    pub source_url: String,
    /// Content type declared by the origin server.
    pub detected_content_type: String,
    /// `{folder}/{filename}` inside the bucket.
    pub destination_path: String,
    /// Content type of the bytes actually written, after any transcode.
    pub final_content_type: String,
    pub public_url: String,
}

impl MediaAsset {
    #[must_use]
    pub fn was_transcoded(&self) -> bool {
        self.detected_content_type != self.final_content_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_url_prefers_stored_copy() {
        let mut media = MediaRef::image("https://cdn.example.com/a.jpg");
        assert_eq!(media.best_url(), "https://cdn.example.com/a.jpg");
        media.stored_url = Some("https://storage.googleapis.com/b/a.jpg".to_owned());
        assert_eq!(media.best_url(), "https://storage.googleapis.com/b/a.jpg");
    }

    #[test]
    fn was_transcoded_compares_content_types() {
        let asset = MediaAsset {
            source_url: "https://cdn.example.com/a.heic".to_owned(),
            detected_content_type: "image/heic".to_owned(),
            destination_path: "instagram/posts/a.jpg".to_owned(),
            final_content_type: "image/jpeg".to_owned(),
            public_url: "https://storage.googleapis.com/b/instagram/posts/a.jpg".to_owned(),
        };
        assert!(asset.was_transcoded());
    }
}
