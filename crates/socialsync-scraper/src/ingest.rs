//! Top-level ingestion entry points.
//!
//! The `scrape_*` methods are what an orchestrator calls: they never return
//! `Err`, converting every failure into a [`ScrapeResult`] stamped with the
//! instant the call started. The `fetch_*` methods are the same operations
//! as plain `Result`s for callers that want to compose them.

use chrono::{DateTime, Utc};
use socialsync_core::{
    Cursor, Page, Platform, ResourceKind, ScrapeResult, SocialAccount, SocialPost,
};

use crate::client::VendorClient;
use crate::endpoints::{identity_param, posts_endpoint, profile_endpoint};
use crate::error::ScraperError;
use crate::handle::extract_handle;
use crate::normalize::{
    normalize_facebook_profile, normalize_instagram_posts, normalize_instagram_profile,
    normalize_linkedin_company, normalize_tiktok_profile, normalize_tiktok_videos,
    normalize_twitter_profile, normalize_youtube_channel,
};
use crate::website;

/// Upper bound on pages followed by [`Ingestor::fetch_all_posts`]. Guards
/// against a vendor that keeps handing back a cursor.
pub const MAX_PAGES: usize = 50;

/// Ingestion facade over an injected [`VendorClient`].
#[derive(Debug, Clone)]
pub struct Ingestor {
    client: VendorClient,
}

impl Ingestor {
    #[must_use]
    pub fn new(client: VendorClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &VendorClient {
        &self.client
    }

    /// Scrapes and normalizes one profile.
    pub async fn scrape_profile(
        &self,
        platform: Platform,
        input: &str,
    ) -> ScrapeResult<SocialAccount> {
        let scraped_at = Utc::now();
        let result = self.fetch_profile(platform, input).await;
        envelope(result, scraped_at, platform, "profile")
    }

    /// Scrapes one page of posts. Pass the previous page's `next_cursor` to
    /// continue.
    pub async fn scrape_posts(
        &self,
        platform: Platform,
        input: &str,
        cursor: Option<&Cursor>,
    ) -> ScrapeResult<Page<SocialPost>> {
        let scraped_at = Utc::now();
        let result = self.fetch_posts_page(platform, input, cursor).await;
        envelope(result, scraped_at, platform, "posts page")
    }

    /// Scrapes every page of posts, one request at a time.
    pub async fn scrape_all_posts(
        &self,
        platform: Platform,
        input: &str,
    ) -> ScrapeResult<Vec<SocialPost>> {
        let scraped_at = Utc::now();
        let result = self.fetch_all_posts(platform, input).await;
        envelope(result, scraped_at, platform, "all posts")
    }

    /// Fetches an arbitrary website as text through the SSRF guard.
    pub async fn fetch_page_content(&self, url_or_handle: &str) -> ScrapeResult<String> {
        let scraped_at = Utc::now();
        let result = website::fetch_page_content(&self.client, url_or_handle).await;
        if let Err(ref err) = result {
            tracing::warn!(input = url_or_handle, error = %err, "page content fetch failed");
        }
        ScrapeResult::from_result(result, scraped_at)
    }

    /// Resolves `input` to a handle, fetches the profile, and normalizes it.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidHandle`] before any request when no handle
    ///   can be extracted.
    /// - Anything [`VendorClient::request_as`] or the platform normalizer
    ///   returns.
    pub async fn fetch_profile(
        &self,
        platform: Platform,
        input: &str,
    ) -> Result<SocialAccount, ScraperError> {
        let handle = extract_handle(platform, input)?;
        let endpoint = profile_endpoint(platform);
        let (key, value) = identity_param(platform, &handle);
        let params = [(key, value.as_str())];

        tracing::debug!(%platform, handle = %handle, endpoint, "fetching profile");

        let client = &self.client;
        match platform {
            Platform::Instagram => {
                normalize_instagram_profile(client.request_as(endpoint, &params).await?, &handle)
            }
            Platform::Tiktok => {
                normalize_tiktok_profile(client.request_as(endpoint, &params).await?, &handle)
            }
            Platform::Twitter => {
                normalize_twitter_profile(client.request_as(endpoint, &params).await?, &handle)
            }
            Platform::Youtube => {
                normalize_youtube_channel(client.request_as(endpoint, &params).await?, &handle)
            }
            Platform::Facebook => {
                normalize_facebook_profile(client.request_as(endpoint, &params).await?, &handle)
            }
            Platform::Linkedin => {
                normalize_linkedin_company(client.request_as(endpoint, &params).await?, &handle)
            }
        }
    }

    /// Fetches one page of posts.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidHandle`] when no handle can be extracted.
    /// - [`ScraperError::UnsupportedResource`] for platforms without a post
    ///   list.
    /// - Anything [`VendorClient::request_as`] or the normalizer returns.
    pub async fn fetch_posts_page(
        &self,
        platform: Platform,
        input: &str,
        cursor: Option<&Cursor>,
    ) -> Result<Page<SocialPost>, ScraperError> {
        let handle = extract_handle(platform, input)?;
        self.posts_page(platform, &handle, cursor).await
    }

    /// Follows `next_cursor` until the vendor reports no more pages.
    ///
    /// # Errors
    ///
    /// Everything [`Ingestor::fetch_posts_page`] returns, plus
    /// [`ScraperError::PaginationLimit`] after [`MAX_PAGES`] pages.
    pub async fn fetch_all_posts(
        &self,
        platform: Platform,
        input: &str,
    ) -> Result<Vec<SocialPost>, ScraperError> {
        let handle = extract_handle(platform, input)?;
        let mut posts: Vec<SocialPost> = Vec::new();
        let mut cursor: Option<Cursor> = None;

        for page_number in 1..=MAX_PAGES {
            let page = self.posts_page(platform, &handle, cursor.as_ref()).await?;
            tracing::debug!(
                %platform,
                handle = %handle,
                page_number,
                items = page.items.len(),
                has_more = page.has_more,
                "fetched posts page"
            );
            posts.extend(page.items);

            match page.next_cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => return Ok(posts),
            }
        }

        Err(ScraperError::PaginationLimit {
            platform,
            handle,
            max_pages: MAX_PAGES,
        })
    }

    async fn posts_page(
        &self,
        platform: Platform,
        handle: &str,
        cursor: Option<&Cursor>,
    ) -> Result<Page<SocialPost>, ScraperError> {
        let (endpoint, cursor_param) = posts_endpoint(platform)?;
        let cursor_value = cursor.map(Cursor::to_param).unwrap_or_default();
        let params = [("handle", handle), (cursor_param, cursor_value.as_str())];

        let client = &self.client;
        match platform {
            Platform::Instagram => {
                normalize_instagram_posts(client.request_as(endpoint, &params).await?)
            }
            Platform::Tiktok => {
                normalize_tiktok_videos(client.request_as(endpoint, &params).await?, handle)
            }
            Platform::Twitter | Platform::Youtube | Platform::Facebook | Platform::Linkedin => {
                Err(ScraperError::UnsupportedResource {
                    platform,
                    resource: ResourceKind::Posts,
                })
            }
        }
    }
}

fn envelope<T>(
    result: Result<T, ScraperError>,
    scraped_at: DateTime<Utc>,
    platform: Platform,
    operation: &'static str,
) -> ScrapeResult<T> {
    if let Err(ref err) = result {
        tracing::warn!(%platform, operation, error = %err, "scrape failed");
    }
    ScrapeResult::from_result(result, scraped_at)
}
