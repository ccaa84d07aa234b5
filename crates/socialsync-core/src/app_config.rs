use std::time::Duration;

use crate::retry::RetryPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub user_agent: String,
    pub vendor_api_key: String,
    pub vendor_base_url: String,
    pub vendor_timeout_secs: u64,
    pub vendor_max_attempts: u32,
    pub vendor_backoff_base_ms: u64,
    pub vendor_backoff_cap_ms: u64,
    pub storage_bucket: String,
    pub storage_host: String,
    pub storage_upload_url: String,
    pub storage_token: Option<String>,
    pub media_timeout_secs: u64,
    pub media_max_attempts: u32,
    pub media_backoff_base_ms: u64,
    pub media_max_bytes: u64,
    pub transcode_quality: u8,
}

impl AppConfig {
    /// Retry policy for the scraping vendor: rate-limit retries with jitter.
    #[must_use]
    pub fn vendor_retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.vendor_max_attempts,
            base_delay: Duration::from_millis(self.vendor_backoff_base_ms),
            max_delay: Duration::from_millis(self.vendor_backoff_cap_ms),
            ..RetryPolicy::vendor_default()
        }
    }

    /// Retry policy for media fetches: plain doubling, no jitter.
    #[must_use]
    pub fn media_retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.media_max_attempts,
            base_delay: Duration::from_millis(self.media_backoff_base_ms),
            ..RetryPolicy::media_default()
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("user_agent", &self.user_agent)
            .field("vendor_api_key", &"[redacted]")
            .field("vendor_base_url", &self.vendor_base_url)
            .field("vendor_timeout_secs", &self.vendor_timeout_secs)
            .field("vendor_max_attempts", &self.vendor_max_attempts)
            .field("vendor_backoff_base_ms", &self.vendor_backoff_base_ms)
            .field("vendor_backoff_cap_ms", &self.vendor_backoff_cap_ms)
            .field("storage_bucket", &self.storage_bucket)
            .field("storage_host", &self.storage_host)
            .field("storage_upload_url", &self.storage_upload_url)
            .field(
                "storage_token",
                &self.storage_token.as_ref().map(|_| "[redacted]"),
            )
            .field("media_timeout_secs", &self.media_timeout_secs)
            .field("media_max_attempts", &self.media_max_attempts)
            .field("media_backoff_base_ms", &self.media_backoff_base_ms)
            .field("media_max_bytes", &self.media_max_bytes)
            .field("transcode_quality", &self.transcode_quality)
            .finish()
    }
}
