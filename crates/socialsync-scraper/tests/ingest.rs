//! End-to-end tests for `Ingestor` against a `wiremock` vendor.
//!
//! Covers the envelope contract (top-level calls never fail), cursor replay
//! across pages, and the website fetcher's pre-flight guard.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use socialsync_core::{Cursor, Platform, RetryPolicy};
use socialsync_scraper::{Ingestor, VendorClient, MAX_PAGES};

fn test_ingestor(server: &MockServer) -> Ingestor {
    let client = VendorClient::with_base_url(
        &server.uri(),
        "test-key",
        5,
        "socialsync-test/0.1",
        RetryPolicy::immediate(5),
    )
    .expect("failed to build test VendorClient");
    Ingestor::new(client)
}

fn instagram_post(id: &str) -> serde_json::Value {
    json!({"id": id, "code": format!("c{id}"), "media_type": 1})
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[tokio::test]
async fn profile_scrape_extracts_handle_and_normalizes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/instagram/profile"))
        .and(query_param("handle", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"user": {
                "id": "1234",
                "username": "acme",
                "edge_followed_by": {"count": 99}
            }}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = test_ingestor(&server)
        .scrape_profile(Platform::Instagram, "https://www.instagram.com/acme/?hl=en")
        .await;

    assert!(envelope.success(), "error: {:?}", envelope.error());
    let account = envelope.data().unwrap();
    assert_eq!(account.platform(), Platform::Instagram);
    assert_eq!(account.platform_user_id, "1234");
    assert_eq!(account.follower_count, Some(99));
}

#[tokio::test]
async fn vendor_failure_becomes_failed_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/tiktok/profile"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "User not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let before = chrono::Utc::now();
    let envelope = test_ingestor(&server)
        .scrape_profile(Platform::Tiktok, "@ghost")
        .await;

    assert!(!envelope.success());
    assert!(envelope.data().is_none());
    let error = envelope.error().unwrap();
    assert!(!error.is_empty());
    assert!(error.contains("User not found"), "error: {error}");
    assert!(envelope.scraped_at() >= before);
}

#[tokio::test]
async fn linkedin_profile_is_looked_up_by_company_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/linkedin/company"))
        .and(query_param("url", "https://www.linkedin.com/company/acme-beverages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "id": "77",
            "name": "Acme Beverages"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = test_ingestor(&server)
        .scrape_profile(Platform::Linkedin, "linkedin.com/company/acme-beverages/about")
        .await;

    assert!(envelope.success(), "error: {:?}", envelope.error());
    assert!(envelope.data().unwrap().is_business);
}

#[tokio::test]
async fn unextractable_handle_fails_without_a_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let envelope = test_ingestor(&server)
        .scrape_profile(Platform::Instagram, "not a handle!!")
        .await;

    assert!(!envelope.success());
    assert!(envelope.error().unwrap().contains("could not extract"));
}

// ---------------------------------------------------------------------------
// Posts and pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_page_replays_instagram_cursor_verbatim() {
    let server = MockServer::start().await;
    let token = "QVFDb3J6dF9fX2E=";

    Mock::given(method("GET"))
        .and(path("/v2/instagram/user/posts"))
        .and(query_param("next_max_id", token))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [instagram_post("3")],
            "more_available": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/instagram/user/posts"))
        .and(query_param("handle", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [instagram_post("1"), instagram_post("2")],
            "more_available": true,
            "next_max_id": token
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ingestor = test_ingestor(&server);
    let first = ingestor.scrape_posts(Platform::Instagram, "acme", None).await;
    let first = first.into_result().expect("first page");
    assert_eq!(first.items.len(), 2);
    assert!(first.has_more);
    assert_eq!(first.next_cursor, Some(Cursor::Token(token.to_owned())));

    let second = ingestor
        .scrape_posts(Platform::Instagram, "acme", first.next_cursor.as_ref())
        .await
        .into_result()
        .expect("second page");
    assert_eq!(second.items.len(), 1);
    assert!(!second.has_more);
    assert_eq!(second.next_cursor, None);
}

#[tokio::test]
async fn all_posts_follows_numeric_tiktok_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/tiktok/profile/videos"))
        .and(query_param("max_cursor", "1699999999000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "aweme_list": [{"aweme_id": "3"}],
            "has_more": 0,
            "max_cursor": 1_699_000_000_000_i64
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/tiktok/profile/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "aweme_list": [{"aweme_id": "1"}, {"aweme_id": "2"}],
            "has_more": 1,
            "max_cursor": 1_699_999_999_000_i64
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = test_ingestor(&server)
        .scrape_all_posts(Platform::Tiktok, "tiktok.com/@acme")
        .await;

    let posts = envelope.into_result().expect("all pages");
    let ids: Vec<&str> = posts.iter().map(|p| p.platform_post_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn endless_cursor_stops_at_page_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/instagram/user/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [instagram_post("1")],
            "more_available": true,
            "next_max_id": "same-token"
        })))
        .expect(u64::try_from(MAX_PAGES).unwrap())
        .mount(&server)
        .await;

    let envelope = test_ingestor(&server)
        .scrape_all_posts(Platform::Instagram, "acme")
        .await;

    assert!(!envelope.success());
    assert!(envelope.error().unwrap().contains("pagination limit"));
}

#[tokio::test]
async fn posts_for_profile_only_platform_are_unsupported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let envelope = test_ingestor(&server)
        .scrape_posts(Platform::Twitter, "acme", None)
        .await;

    assert_eq!(
        envelope.error(),
        Some("posts scraping is not supported for twitter")
    );
}

// ---------------------------------------------------------------------------
// Website content
// ---------------------------------------------------------------------------

#[tokio::test]
async fn page_content_is_fetched_for_public_hosts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/website/content"))
        .and(query_param("url", "https://example.com/about"))
        .and(query_param("format", "text"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"content": "About Acme"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = test_ingestor(&server)
        .fetch_page_content("https://https://example.com/about")
        .await;

    assert_eq!(envelope.data().map(String::as_str), Some("About Acme"));
}

#[tokio::test]
async fn private_targets_are_rejected_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let ingestor = test_ingestor(&server);
    for target in [
        "http://127.0.0.1/admin",
        "localhost:8080",
        "http://169.254.169.254/latest/meta-data/",
        "10.0.0.5",
        "https://192.168.1.1",
    ] {
        let envelope = ingestor.fetch_page_content(target).await;
        assert!(!envelope.success(), "{target} should be rejected");
        assert!(
            envelope.error().unwrap().contains("refusing to fetch"),
            "{target}: {:?}",
            envelope.error()
        );
    }
}

#[tokio::test]
async fn blank_content_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/website/content"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "content": "  \n "})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let envelope = test_ingestor(&server).fetch_page_content("example.com").await;
    assert_eq!(envelope.error(), Some("No content retrieved"));
}
