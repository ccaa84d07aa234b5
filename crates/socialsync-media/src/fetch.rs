//! Retried download of remote media.

use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::{Client, Url};
use socialsync_core::target::check_scheme_and_host;
use socialsync_core::{execute_with_policy, RetryPolicy};

use crate::content_type::detect_content_type;
use crate::error::MediaError;
use crate::filename::url_extension;

/// Largest body accepted unless overridden with [`MediaFetcher::with_max_bytes`].
pub const DEFAULT_MAX_MEDIA_BYTES: u64 = 100 * 1024 * 1024;

const MAX_REDIRECTS: usize = 10;

/// Downloaded bytes plus the content type the origin declared (or that was
/// sniffed from the URL when the header was generic).
#[derive(Debug, Clone)]
pub struct FetchedMedia {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// HTTP fetcher for CDN assets.
///
/// Each attempt is bounded by `attempt_timeout`. Timeouts, network errors
/// and 5xx are retried per the [`RetryPolicy`]; 4xx fails immediately.
/// Source URLs and redirect hops that resolve lexically to internal targets
/// are refused, and bodies larger than `max_bytes` are abandoned mid-stream.
#[derive(Debug, Clone)]
pub struct MediaFetcher {
    client: Client,
    retry: RetryPolicy,
    attempt_timeout: Duration,
    max_bytes: u64,
    guard_targets: bool,
}

impl MediaFetcher {
    /// # Errors
    ///
    /// Returns [`MediaError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        user_agent: &str,
        timeout_secs: u64,
        retry: RetryPolicy,
    ) -> Result<Self, MediaError> {
        Self::build(user_agent, timeout_secs, retry, true)
    }

    /// A fetcher that skips the internal-target checks, for local object
    /// stores and test servers bound to loopback.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Http`] if the `reqwest::Client` cannot be built.
    pub fn allowing_private_targets(
        user_agent: &str,
        timeout_secs: u64,
        retry: RetryPolicy,
    ) -> Result<Self, MediaError> {
        Self::build(user_agent, timeout_secs, retry, false)
    }

    fn build(
        user_agent: &str,
        timeout_secs: u64,
        retry: RetryPolicy,
        guard_targets: bool,
    ) -> Result<Self, MediaError> {
        let redirect = if guard_targets {
            Policy::custom(|attempt| {
                if attempt.previous().len() >= MAX_REDIRECTS {
                    return attempt.error("too many redirects");
                }
                let hop = attempt.url();
                match check_scheme_and_host(hop.scheme(), hop.host_str()) {
                    Ok(()) => attempt.follow(),
                    Err(blocked) => attempt.error(blocked),
                }
            })
        } else {
            Policy::limited(MAX_REDIRECTS)
        };

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .redirect(redirect)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            retry,
            attempt_timeout: Duration::from_secs(timeout_secs),
            max_bytes: DEFAULT_MAX_MEDIA_BYTES,
            guard_targets,
        })
    }

    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Downloads `url`.
    ///
    /// # Errors
    ///
    /// - [`MediaError::InvalidUrl`] when `url` does not parse.
    /// - [`MediaError::UnsafeUrl`] for an internal target, before any request.
    /// - [`MediaError::UnexpectedStatus`] for a 4xx, after one attempt.
    /// - [`MediaError::TooLarge`] when the body exceeds the byte cap.
    /// - [`MediaError::FetchFailed`] once retryable failures exhaust the
    ///   policy, naming the last cause.
    pub async fn fetch(&self, url: &str) -> Result<FetchedMedia, MediaError> {
        let parsed = Url::parse(url).map_err(|e| MediaError::InvalidUrl {
            input: url.to_owned(),
            reason: e.to_string(),
        })?;
        if self.guard_targets {
            check_scheme_and_host(parsed.scheme(), parsed.host_str()).map_err(|blocked| {
                MediaError::UnsafeUrl {
                    url: url.to_owned(),
                    reason: blocked.0,
                }
            })?;
        }

        let retryable = MediaError::is_retryable;
        let fetched = execute_with_policy(&self.retry, "media fetch", retryable, |_attempt| {
            self.fetch_once(&parsed)
        })
        .await?;
        Ok(fetched)
    }

    async fn fetch_once(&self, url: &Url) -> Result<FetchedMedia, MediaError> {
        let attempt = async {
            let mut response = self.client.get(url.clone()).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(MediaError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let too_large = || MediaError::TooLarge {
                limit: self.max_bytes,
                url: url.to_string(),
            };
            let declared = response.content_length();
            if declared.is_some_and(|len| len > self.max_bytes) {
                return Err(too_large());
            }

            let header = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);

            let capacity = declared.unwrap_or(0).min(self.max_bytes);
            let mut bytes = Vec::with_capacity(usize::try_from(capacity).unwrap_or(0));
            while let Some(chunk) = response.chunk().await? {
                if (bytes.len() + chunk.len()) as u64 > self.max_bytes {
                    return Err(too_large());
                }
                bytes.extend_from_slice(&chunk);
            }

            let extension = url_extension(url.as_str());
            let content_type = detect_content_type(header.as_deref(), extension.as_deref());
            Ok::<_, MediaError>(FetchedMedia {
                bytes,
                content_type,
            })
        };

        tokio::time::timeout(self.attempt_timeout, attempt)
            .await
            .map_err(|_| MediaError::Timeout {
                secs: self.attempt_timeout.as_secs(),
                url: url.to_string(),
            })?
    }
}
