use socialsync_core::{Platform, ResourceKind, RetryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by vendor on {endpoint}")]
    RateLimited { endpoint: String },

    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    #[error("vendor reported failure for {endpoint}: {message}")]
    VendorFailure { endpoint: String, message: String },

    #[error("gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<ScraperError>,
    },

    #[error("vendor response for {context} is missing {field}")]
    MissingField {
        context: String,
        field: &'static str,
    },

    #[error("could not extract a {platform} handle from \"{input}\"")]
    InvalidHandle { platform: Platform, input: String },

    #[error("invalid URL \"{input}\": {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("refusing to fetch {url}: {reason}")]
    UnsafeUrl { url: String, reason: String },

    #[error("No content retrieved")]
    EmptyContent,

    #[error("pagination limit of {max_pages} pages exceeded for {platform} account {handle}")]
    PaginationLimit {
        platform: Platform,
        handle: String,
        max_pages: usize,
    },

    #[error("{resource} scraping is not supported for {platform}")]
    UnsupportedResource {
        platform: Platform,
        resource: ResourceKind,
    },
}

impl From<RetryError<ScraperError>> for ScraperError {
    fn from(err: RetryError<ScraperError>) -> Self {
        match err {
            RetryError::Permanent(err) => err,
            RetryError::Exhausted { attempts, last } => ScraperError::RetriesExhausted {
                attempts,
                last: Box::new(last),
            },
        }
    }
}
