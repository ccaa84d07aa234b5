use std::sync::Arc;

use chrono::Utc;
use socialsync_core::{AppConfig, MediaAsset, Platform, ResourceKind};

use crate::content_type::{extension_for, needs_transcode};
use crate::error::MediaError;
use crate::fetch::MediaFetcher;
use crate::filename::{derive_filename, force_extension};
use crate::storage::{HttpObjectStore, ObjectStore};
use crate::transcode::{transcode_or_original, Encoded, ImageTranscoder, Transcoder};

/// Storage folder for a platform and resource kind: `{platform}/{kind}`.
#[must_use]
pub fn destination_folder(platform: Platform, kind: ResourceKind) -> String {
    format!("{}/{}", platform.as_str(), kind.as_str())
}

/// Fetches remote media, transcodes formats browsers cannot display, and
/// writes the result to durable storage under a deterministic public URL.
pub struct MediaService<S, T = ImageTranscoder> {
    fetcher: MediaFetcher,
    store: S,
    transcoder: Arc<T>,
    bucket: String,
    public_host: String,
}

impl<S, T> std::fmt::Debug for MediaService<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaService")
            .field("bucket", &self.bucket)
            .field("public_host", &self.public_host)
            .finish_non_exhaustive()
    }
}

impl MediaService<HttpObjectStore, ImageTranscoder> {
    /// Production wiring: HTTP uploads and the `image`-crate transcoder.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Http`] if an HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, MediaError> {
        let fetcher = MediaFetcher::new(
            &config.user_agent,
            config.media_timeout_secs,
            config.media_retry_policy(),
        )?
        .with_max_bytes(config.media_max_bytes);
        let store = HttpObjectStore::new(
            &config.storage_upload_url,
            &config.storage_bucket,
            config.storage_token.clone(),
            config.media_timeout_secs,
        )?;
        Ok(Self::new(
            fetcher,
            store,
            ImageTranscoder::new(config.transcode_quality),
            &config.storage_bucket,
            &config.storage_host,
        ))
    }
}

impl<S: ObjectStore, T: Transcoder> MediaService<S, T> {
    #[must_use]
    pub fn new(
        fetcher: MediaFetcher,
        store: S,
        transcoder: T,
        bucket: &str,
        public_host: &str,
    ) -> Self {
        Self {
            fetcher,
            store,
            transcoder: Arc::new(transcoder),
            bucket: bucket.to_owned(),
            public_host: public_host.trim_end_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// `https://{public_host}/{bucket}/{destination_path}`. No signing, so
    /// the same path always yields the same URL.
    #[must_use]
    pub fn public_url(&self, destination_path: &str) -> String {
        format!("https://{}/{}/{}", self.public_host, self.bucket, destination_path)
    }

    /// Stores the asset at `source_url` and returns its public URL.
    ///
    /// # Errors
    ///
    /// See [`MediaService::store_asset`].
    pub async fn store_from_url(
        &self,
        source_url: &str,
        destination_folder: &str,
        filename: Option<&str>,
    ) -> Result<String, MediaError> {
        self.store_asset(source_url, destination_folder, filename)
            .await
            .map(|asset| asset.public_url)
    }

    /// Fetches, transcodes when needed, and uploads one asset.
    ///
    /// A failed transcode is not an error: the original bytes are stored
    /// under their original content type.
    ///
    /// # Errors
    ///
    /// - Any fetch error from [`MediaFetcher::fetch`].
    /// - [`MediaError::UploadFailed`] / [`MediaError::Http`] from the store.
    pub async fn store_asset(
        &self,
        source_url: &str,
        destination_folder: &str,
        filename: Option<&str>,
    ) -> Result<MediaAsset, MediaError> {
        let fetched = self.fetcher.fetch(source_url).await?;
        let detected = fetched.content_type;
        let mut name = derive_filename(filename, &detected, source_url, Utc::now());

        let encoded = if needs_transcode(&detected) {
            let transcoder = Arc::clone(&self.transcoder);
            transcode_or_original(transcoder, fetched.bytes, detected.clone()).await
        } else {
            Encoded {
                bytes: fetched.bytes,
                content_type: detected.clone(),
            }
        };

        if encoded.content_type != detected {
            if let Some(ext) = extension_for(&encoded.content_type) {
                name = force_extension(&name, ext);
            }
        }

        let folder = destination_folder.trim_matches('/');
        let destination_path = if folder.is_empty() {
            name
        } else {
            format!("{folder}/{name}")
        };

        self.store
            .put(&destination_path, encoded.bytes, &encoded.content_type)
            .await?;

        tracing::info!(
            source_url,
            destination_path = %destination_path,
            detected = %detected,
            stored_as = %encoded.content_type,
            "stored media asset"
        );

        Ok(MediaAsset {
            source_url: source_url.to_owned(),
            detected_content_type: detected,
            public_url: self.public_url(&destination_path),
            destination_path,
            final_content_type: encoded.content_type,
        })
    }
}
