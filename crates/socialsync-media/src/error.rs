use socialsync_core::RetryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} fetching {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("timed out after {secs}s fetching {url}")]
    Timeout { secs: u64, url: String },

    #[error("failed to fetch media after {attempts} attempts: {cause}")]
    FetchFailed { attempts: u32, cause: String },

    #[error("refusing to fetch {url}: {reason}")]
    UnsafeUrl { url: String, reason: String },

    #[error("media at {url} exceeds the {limit}-byte limit")]
    TooLarge { limit: u64, url: String },

    #[error("invalid media URL \"{input}\": {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("transcode from {from} failed: {reason}")]
    Transcode { from: String, reason: String },

    #[error("upload to {path} failed with HTTP {status}")]
    UploadFailed { status: u16, path: String },
}

impl MediaError {
    /// Transient failures worth another fetch attempt: timeouts, network
    /// errors, and 5xx. A 4xx or a refused redirect never gets better by
    /// asking again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            MediaError::Timeout { .. } => true,
            MediaError::Http(e) => !e.is_redirect() && !e.is_builder(),
            MediaError::UnexpectedStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<RetryError<MediaError>> for MediaError {
    fn from(err: RetryError<MediaError>) -> Self {
        match err {
            RetryError::Permanent(err) => err,
            RetryError::Exhausted { attempts, last } => MediaError::FetchFailed {
                attempts,
                cause: last.to_string(),
            },
        }
    }
}
