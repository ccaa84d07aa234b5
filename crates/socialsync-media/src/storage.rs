//! Durable object storage.
//!
//! Writes overwrite by path: there is no content-hash dedup and no
//! concurrency control, so concurrent writers to one path race and the last
//! write wins.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Client;

use crate::error::MediaError;

/// Characters escaped inside one path segment of an object name.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub trait ObjectStore: Send + Sync {
    /// Writes `bytes` at `path` inside the bucket, replacing any existing
    /// object.
    fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = Result<(), MediaError>> + Send;
}

/// Uploads with `PUT {upload_base}/{bucket}/{path}` (the GCS XML API shape),
/// authenticating with a bearer token when one is configured.
#[derive(Clone)]
pub struct HttpObjectStore {
    client: Client,
    upload_base: String,
    bucket: String,
    token: Option<String>,
}

impl std::fmt::Debug for HttpObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpObjectStore")
            .field("upload_base", &self.upload_base)
            .field("bucket", &self.bucket)
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .finish_non_exhaustive()
    }
}

impl HttpObjectStore {
    /// # Errors
    ///
    /// Returns [`MediaError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        upload_base: &str,
        bucket: &str,
        token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, MediaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            upload_base: upload_base.trim_end_matches('/').to_owned(),
            bucket: bucket.to_owned(),
            token,
        })
    }

    fn object_url(&self, path: &str) -> String {
        let encoded: Vec<String> = path
            .split('/')
            .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
            .collect();
        format!("{}/{}/{}", self.upload_base, self.bucket, encoded.join("/"))
    }
}

impl ObjectStore for HttpObjectStore {
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), MediaError> {
        let size = bytes.len();
        let mut request = self
            .client
            .put(self.object_url(path))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MediaError::UploadFailed {
                status: status.as_u16(),
                path: path.to_owned(),
            });
        }

        tracing::debug!(path, size, content_type, "uploaded object");
        Ok(())
    }
}

/// A stored object as kept by [`MemoryObjectStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// In-process store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl MemoryObjectStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectStore for MemoryObjectStore {
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), MediaError> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                path.to_owned(),
                StoredObject {
                    bytes,
                    content_type: content_type.to_owned(),
                },
            );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_url_escapes_segments_but_keeps_slashes() {
        let base = "https://storage.googleapis.com/";
        let store = HttpObjectStore::new(base, "brand-media", None, 5).unwrap();
        assert_eq!(
            store.object_url("instagram/posts/my photo#1.jpg"),
            "https://storage.googleapis.com/brand-media/instagram/posts/my%20photo%231.jpg"
        );
    }

    #[test]
    fn debug_redacts_token() {
        let store = HttpObjectStore::new("https://up", "b", Some("secret".to_owned()), 5).unwrap();
        let debug = format!("{store:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[redacted]"));
    }

    #[tokio::test]
    async fn memory_store_overwrites_by_path() {
        let store = MemoryObjectStore::new();
        store.put("a/b.jpg", vec![1], "image/jpeg").await.unwrap();
        store.put("a/b.jpg", vec![2], "image/png").await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("a/b.jpg"),
            Some(StoredObject {
                bytes: vec![2],
                content_type: "image/png".to_owned()
            })
        );
    }
}
