//! Result Envelope returned by every top-level ingestion operation.
//!
//! Ingestion entry points never return `Err`: they convert failures into an
//! envelope with `success: false` so batch orchestration can keep going past
//! one bad account. The envelope is immutable once built: fields are private
//! and the only constructors enforce the success/data/error invariant.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    scraped_at: DateTime<Utc>,
}

impl<T> ScrapeResult<T> {
    /// Successful envelope stamped with `scraped_at`.
    pub fn ok(data: T, scraped_at: DateTime<Utc>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            scraped_at,
        }
    }

    /// Failed envelope. An empty message is replaced with `"unknown error"`
    /// so `error` is never blank on failure.
    pub fn failure(error: impl Into<String>, scraped_at: DateTime<Utc>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            "unknown error".to_owned()
        } else {
            error
        };
        Self {
            success: false,
            data: None,
            error: Some(error),
            scraped_at,
        }
    }

    /// Converts a fallible result, rendering the error with its `Display` impl.
    pub fn from_result<E: Display>(result: Result<T, E>, scraped_at: DateTime<Utc>) -> Self {
        match result {
            Ok(data) => Self::ok(data, scraped_at),
            Err(err) => Self::failure(err.to_string(), scraped_at),
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn scraped_at(&self) -> DateTime<Utc> {
        self.scraped_at
    }

    /// Maps the payload while keeping the outcome and timestamp.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ScrapeResult<U> {
        ScrapeResult {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
            scraped_at: self.scraped_at,
        }
    }

    /// Unwraps into a plain `Result` for callers that prefer `?`.
    ///
    /// # Errors
    ///
    /// Returns the envelope's error message when `success` is `false`.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.error.unwrap_or_else(|| "unknown error".to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn ok_envelope_has_data_and_no_error() {
        let env = ScrapeResult::ok(5, now());
        assert!(env.success());
        assert_eq!(env.data(), Some(&5));
        assert!(env.error().is_none());
        assert_eq!(env.scraped_at(), now());
    }

    #[test]
    fn failure_envelope_has_error_and_no_data() {
        let env: ScrapeResult<u32> = ScrapeResult::failure("vendor said no", now());
        assert!(!env.success());
        assert!(env.data().is_none());
        assert_eq!(env.error(), Some("vendor said no"));
    }

    #[test]
    fn blank_failure_message_is_replaced() {
        let env: ScrapeResult<u32> = ScrapeResult::failure("   ", now());
        assert_eq!(env.error(), Some("unknown error"));
    }

    #[test]
    fn from_result_renders_error_display() {
        let result: Result<u32, std::fmt::Error> = Err(std::fmt::Error);
        let env = ScrapeResult::from_result(result, now());
        assert!(!env.success());
        assert!(!env.error().unwrap().is_empty());
    }

    #[test]
    fn serializes_camel_case_and_omits_absent_fields() {
        let env = ScrapeResult::ok("page text", now());
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "page text");
        assert!(json.get("error").is_none());
        assert!(json.get("scrapedAt").is_some());
    }

    #[test]
    fn map_preserves_failure() {
        let env: ScrapeResult<u32> = ScrapeResult::failure("boom", now());
        let mapped = env.map(|n| n * 2);
        assert_eq!(mapped.into_result(), Err("boom".to_owned()));
    }
}
