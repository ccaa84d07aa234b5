//! HTTP client for the scraping vendor's REST API.

mod envelope;

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use socialsync_core::{execute_with_policy, AppConfig, RetryPolicy};

use crate::error::ScraperError;

use envelope::vendor_failure_message;

pub const DEFAULT_BASE_URL: &str = "https://api.scrapecreators.com";

const API_KEY_HEADER: &str = "x-api-key";

/// Client for the scraping vendor.
///
/// Built once at startup with the shared API key and handed to whatever
/// needs it; cloning is cheap because `reqwest::Client` is reference-counted.
///
/// Only HTTP 429 is retried, using the configured [`RetryPolicy`]. Every
/// other failure (non-429 status, network error, timeout, a `success: false`
/// body) is returned after a single attempt so the caller decides what to do.
#[derive(Clone)]
pub struct VendorClient {
    client: Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl std::fmt::Debug for VendorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VendorClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[redacted]")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl VendorClient {
    /// Creates a client pointed at the production vendor host.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        retry: RetryPolicy,
    ) -> Result<Self, ScraperError> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, timeout_secs, user_agent, retry)
    }

    /// Creates a client against an arbitrary base URL. Tests point this at a
    /// `wiremock` server.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        retry: RetryPolicy,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            retry,
        })
    }

    /// Creates a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::with_base_url(
            &config.vendor_base_url,
            &config.vendor_api_key,
            config.vendor_timeout_secs,
            &config.user_agent,
            config.vendor_retry_policy(),
        )
    }

    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Issues `GET {base_url}{endpoint}` and returns the parsed JSON body.
    ///
    /// Params with empty values are skipped.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RetriesExhausted`]: HTTP 429 on every attempt.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ScraperError::VendorFailure`]: body parsed but carries `success: false`.
    /// - [`ScraperError::Http`]: network failure or timeout.
    /// - [`ScraperError::Deserialize`]: body is not JSON.
    pub async fn request(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, ScraperError> {
        let url = self.build_url(endpoint, params)?;

        let body = execute_with_policy(
            &self.retry,
            endpoint,
            |err: &ScraperError| matches!(err, ScraperError::RateLimited { .. }),
            |_attempt| self.send_once(&url, endpoint),
        )
        .await?;

        if let Some(message) = vendor_failure_message(&body) {
            return Err(ScraperError::VendorFailure {
                endpoint: endpoint.to_owned(),
                message,
            });
        }

        Ok(body)
    }

    /// Like [`VendorClient::request`], deserializing the body into `T`.
    ///
    /// # Errors
    ///
    /// Everything [`VendorClient::request`] returns, plus
    /// [`ScraperError::Deserialize`] when the body does not fit `T`.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ScraperError> {
        let body = self.request(endpoint, params).await?;
        serde_json::from_value(body).map_err(|e| ScraperError::Deserialize {
            context: endpoint.to_owned(),
            source: e,
        })
    }

    async fn send_once(&self, url: &Url, endpoint: &str) -> Result<Value, ScraperError> {
        let response = self
            .client
            .get(url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ScraperError::RateLimited {
                endpoint: endpoint.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: endpoint.to_owned(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str::<Value>(&text).map_err(|e| ScraperError::Deserialize {
            context: endpoint.to_owned(),
            source: e,
        })
    }

    /// Builds `{base_url}{endpoint}?k=v...`, percent-encoding every value.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the base URL and endpoint do
    /// not form a valid URL.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, ScraperError> {
        let raw = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| ScraperError::InvalidUrl {
            input: raw.clone(),
            reason: e.to_string(),
        })?;

        let mut present = params.iter().filter(|(_, v)| !v.is_empty()).peekable();
        if present.peek().is_some() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in present {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
