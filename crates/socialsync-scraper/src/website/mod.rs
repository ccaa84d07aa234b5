//! Safe fetching of arbitrary user-supplied websites as text.

mod guard;
mod url;

use serde_json::Value;

use crate::client::VendorClient;
use crate::endpoints::WEBSITE_CONTENT;
use crate::error::ScraperError;

pub use guard::check_target;
pub use url::normalize_website_url;

/// Normalizes `url_or_handle`, runs the SSRF guard, then asks the vendor for
/// the page rendered as text.
///
/// # Errors
///
/// - [`ScraperError::InvalidUrl`] / [`ScraperError::UnsafeUrl`] before any
///   request is made.
/// - [`ScraperError::EmptyContent`] when the vendor returns blank content.
/// - Anything [`VendorClient::request`] returns.
pub async fn fetch_page_content(
    client: &VendorClient,
    url_or_handle: &str,
) -> Result<String, ScraperError> {
    let url = normalize_website_url(url_or_handle)?;
    check_target(&url)?;

    tracing::debug!(url = %url, "fetching page content");
    let body = client
        .request(WEBSITE_CONTENT, &[("url", url.as_str()), ("format", "text")])
        .await?;

    extract_content(&body).ok_or(ScraperError::EmptyContent)
}

/// Finds the page text in a vendor body: `content`, `text`, or `markdown`,
/// at the top level or nested under `data`. Blank strings do not count.
fn extract_content(body: &Value) -> Option<String> {
    const KEYS: [&str; 3] = ["content", "text", "markdown"];

    let scopes = [Some(body), body.get("data")];
    scopes
        .into_iter()
        .flatten()
        .flat_map(|scope| KEYS.into_iter().filter_map(move |key| scope.get(key)))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_owned)
}
