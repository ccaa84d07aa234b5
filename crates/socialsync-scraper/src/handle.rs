//! Handle extraction from user-supplied input.
//!
//! Users paste handles in many shapes: `foo`, `@foo`, `instagram.com/foo`,
//! `https://www.instagram.com/foo/?hl=en`, `https://x.com/foo/status/1`.
//! Extraction runs three layers in order and takes the first hit:
//!
//! 1. [`from_profile_url`]: structured URL parse against the platform's domains.
//! 2. [`from_regex`]: pattern search over the raw string, for input that
//!    contains a profile URL but does not parse as one.
//! 3. [`from_bare`]: the input itself, minus a leading `@`.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use socialsync_core::Platform;

use crate::error::ScraperError;

static BARE_HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]{1,100}$").expect("valid regex"));

static INSTAGRAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:instagram\.com|instagr\.am)/(?:stories/)?@?([A-Za-z0-9._-]+)")
        .expect("valid regex")
});

static TIKTOK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)tiktok\.com/@?([A-Za-z0-9._-]+)").expect("valid regex"));

static TWITTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:twitter\.com|x\.com)/@?([A-Za-z0-9._-]+)").expect("valid regex")
});

static YOUTUBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)youtube\.com/(?:@|c/|user/|channel/)([A-Za-z0-9._-]+)").expect("valid regex")
});

static FACEBOOK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:facebook\.com|fb\.com)/(?:pages/)?([A-Za-z0-9._-]+)").expect("valid regex")
});

static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)linkedin\.com/(?:company|school|showcase)/([A-Za-z0-9._-]+)")
        .expect("valid regex")
});

/// Extracts a bare handle for `platform` from `input`.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidHandle`] when no layer yields a plausible
/// handle.
pub fn extract_handle(platform: Platform, input: &str) -> Result<String, ScraperError> {
    from_profile_url(platform, input)
        .or_else(|| from_regex(platform, input))
        .or_else(|| from_bare(platform, input))
        .ok_or_else(|| ScraperError::InvalidHandle {
            platform,
            input: input.to_owned(),
        })
}

/// Hostnames (after stripping `www.`) that serve profiles for `platform`.
#[must_use]
pub fn platform_domains(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Instagram => &["instagram.com", "m.instagram.com", "instagr.am"],
        Platform::Tiktok => &["tiktok.com", "m.tiktok.com"],
        Platform::Twitter => &["twitter.com", "mobile.twitter.com", "x.com", "mobile.x.com"],
        Platform::Youtube => &["youtube.com", "m.youtube.com"],
        Platform::Facebook => &["facebook.com", "m.facebook.com", "web.facebook.com", "fb.com"],
        Platform::Linkedin => &["linkedin.com"],
    }
}

/// Layer 1: structured parse of a profile URL.
///
/// Scheme-less input is accepted only when it starts with one of the
/// platform's domains, so `foo.bar` is never mistaken for a URL.
#[must_use]
pub fn from_profile_url(platform: Platform, input: &str) -> Option<String> {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_owned()
    } else if starts_with_platform_domain(platform, &lower) {
        format!("https://{trimmed}")
    } else {
        return None;
    };

    let url = Url::parse(&candidate).ok()?;
    let host = normalize_host(url.host_str()?);
    if !platform_domains(platform).contains(&host.as_str()) {
        return None;
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    let raw = match platform {
        Platform::Instagram => match segments.as_slice() {
            ["stories", handle, ..] => *handle,
            [first, ..] => *first,
            [] => return None,
        },
        Platform::Youtube => match segments.as_slice() {
            ["c" | "user" | "channel", handle, ..] => *handle,
            [first, ..] if first.starts_with('@') => *first,
            _ => return None,
        },
        Platform::Facebook => match segments.as_slice() {
            ["profile.php", ..] => {
                return url
                    .query_pairs()
                    .find(|(k, _)| k == "id")
                    .and_then(|(_, v)| accept_handle(platform, &v));
            }
            ["pages", .., last] => *last,
            [first, ..] => *first,
            [] => return None,
        },
        Platform::Linkedin => match segments.as_slice() {
            ["company" | "school" | "showcase", handle, ..] => *handle,
            _ => return None,
        },
        Platform::Tiktok | Platform::Twitter => match segments.as_slice() {
            [first, ..] => *first,
            [] => return None,
        },
    };

    accept_handle(platform, raw)
}

/// Layer 2: best-effort pattern match anywhere in the raw input.
#[must_use]
pub fn from_regex(platform: Platform, input: &str) -> Option<String> {
    let re: &Regex = match platform {
        Platform::Instagram => &INSTAGRAM_RE,
        Platform::Tiktok => &TIKTOK_RE,
        Platform::Twitter => &TWITTER_RE,
        Platform::Youtube => &YOUTUBE_RE,
        Platform::Facebook => &FACEBOOK_RE,
        Platform::Linkedin => &LINKEDIN_RE,
    };
    re.captures_iter(input)
        .filter_map(|caps| caps.get(1))
        .find_map(|m| accept_handle(platform, m.as_str()))
}

/// Layer 3: the input itself is the handle, with an optional leading `@`.
#[must_use]
pub fn from_bare(platform: Platform, input: &str) -> Option<String> {
    let lower = input.trim().to_ascii_lowercase();
    if platform_domains(platform).contains(&normalize_host(&lower).as_str()) {
        return None;
    }
    accept_handle(platform, input)
}

/// Path segments that are site features rather than accounts.
fn is_reserved(platform: Platform, segment: &str) -> bool {
    let reserved: &[&str] = match platform {
        Platform::Instagram => &[
            "p", "reel", "reels", "tv", "explore", "accounts", "direct", "stories", "about",
            "developer", "legal",
        ],
        Platform::Tiktok => &[
            "discover", "tag", "music", "video", "search", "explore", "foryou", "following",
            "live", "upload",
        ],
        Platform::Twitter => &[
            "home", "i", "intent", "search", "hashtag", "explore", "settings", "share",
            "notifications", "messages", "login", "signup", "tos", "privacy",
        ],
        Platform::Youtube => &[
            "watch", "results", "shorts", "playlist", "feed", "channel", "c", "user",
        ],
        Platform::Facebook => &[
            "pages", "groups", "events", "watch", "marketplace", "share", "sharer.php", "login",
            "profile.php", "photo", "photos", "story.php", "permalink.php",
        ],
        Platform::Linkedin => &["company", "school", "showcase", "in", "feed", "jobs"],
    };
    reserved.iter().any(|r| r.eq_ignore_ascii_case(segment))
}

fn accept_handle(platform: Platform, raw: &str) -> Option<String> {
    let handle = raw.trim().trim_start_matches('@');
    if !BARE_HANDLE_RE.is_match(handle) || is_reserved(platform, handle) {
        return None;
    }
    Some(handle.to_owned())
}

fn starts_with_platform_domain(platform: Platform, lower: &str) -> bool {
    let without_www = lower.strip_prefix("www.").unwrap_or(lower);
    platform_domains(platform).iter().any(|domain| {
        without_www
            .strip_prefix(domain)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'))
    })
}

fn normalize_host(host: &str) -> String {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_owned(),
        None => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_common_forms_yield_the_same_handle() {
        for input in ["@foo", "foo", "https://instagram.com/foo/", "instagram.com/foo"] {
            assert_eq!(
                extract_handle(Platform::Instagram, input).unwrap(),
                "foo",
                "input: {input}"
            );
        }
    }

    #[test]
    fn instagram_url_variants() {
        for input in [
            "https://www.instagram.com/foo?hl=en",
            "http://m.instagram.com/foo/",
            "https://instagr.am/foo",
            "www.instagram.com/foo",
            "https://www.instagram.com/stories/foo/3141592653/",
        ] {
            assert_eq!(
                from_profile_url(Platform::Instagram, input).as_deref(),
                Some("foo"),
                "input: {input}"
            );
        }
    }

    #[test]
    fn instagram_post_urls_are_not_handles() {
        assert_eq!(
            from_profile_url(Platform::Instagram, "https://www.instagram.com/p/Cx1abc/"),
            None
        );
        let reel = "https://www.instagram.com/reel/Cx1abc/";
        assert!(extract_handle(Platform::Instagram, reel).is_err());
    }

    #[test]
    fn foreign_domain_is_rejected_by_url_layer() {
        assert_eq!(from_profile_url(Platform::Instagram, "https://tiktok.com/@foo"), None);
    }

    #[test]
    fn tiktok_strips_at_sign() {
        assert_eq!(
            extract_handle(Platform::Tiktok, "https://www.tiktok.com/@foo.bar?lang=en").unwrap(),
            "foo.bar"
        );
        assert_eq!(extract_handle(Platform::Tiktok, "@foo_bar").unwrap(), "foo_bar");
    }

    #[test]
    fn twitter_accepts_x_and_mobile_domains() {
        for input in [
            "https://x.com/foo",
            "https://twitter.com/foo/status/12345",
            "mobile.twitter.com/foo",
        ] {
            assert_eq!(extract_handle(Platform::Twitter, input).unwrap(), "foo", "input: {input}");
        }
    }

    #[test]
    fn youtube_path_shapes() {
        for (input, expected) in [
            ("https://www.youtube.com/@foo", "foo"),
            ("https://www.youtube.com/c/FooChannel", "FooChannel"),
            ("https://m.youtube.com/user/foo/videos", "foo"),
            ("https://youtube.com/channel/UC1234567890abcdef", "UC1234567890abcdef"),
        ] {
            assert_eq!(
                from_profile_url(Platform::Youtube, input).as_deref(),
                Some(expected),
                "input: {input}"
            );
        }
        assert_eq!(
            from_profile_url(Platform::Youtube, "https://www.youtube.com/watch?v=abc"),
            None
        );
    }

    #[test]
    fn facebook_shapes() {
        assert_eq!(
            extract_handle(Platform::Facebook, "https://www.facebook.com/foo.page/").unwrap(),
            "foo.page"
        );
        assert_eq!(
            extract_handle(Platform::Facebook, "https://fb.com/foo").unwrap(),
            "foo"
        );
        assert_eq!(
            extract_handle(Platform::Facebook, "https://www.facebook.com/profile.php?id=100012345")
                .unwrap(),
            "100012345"
        );
    }

    #[test]
    fn linkedin_only_company_like_pages() {
        assert_eq!(
            extract_handle(Platform::Linkedin, "https://www.linkedin.com/company/acme-inc/about/")
                .unwrap(),
            "acme-inc"
        );
        assert_eq!(
            from_profile_url(Platform::Linkedin, "https://www.linkedin.com/in/someone"),
            None
        );
    }

    #[test]
    fn regex_layer_finds_url_inside_text() {
        assert_eq!(
            from_regex(Platform::Instagram, "follow us at instagram.com/foo!").as_deref(),
            Some("foo")
        );
        assert_eq!(from_profile_url(Platform::Instagram, "follow us at instagram.com/foo!"), None);
        assert_eq!(
            extract_handle(Platform::Instagram, "follow us at instagram.com/foo!").unwrap(),
            "foo"
        );
    }

    #[test]
    fn regex_layer_skips_reserved_segments() {
        assert_eq!(from_regex(Platform::Instagram, "see instagram.com/p/abc"), None);
    }

    #[test]
    fn bare_layer_validates_characters() {
        assert_eq!(from_bare(Platform::Instagram, "  @foo.bar_1 ").as_deref(), Some("foo.bar_1"));
        assert_eq!(from_bare(Platform::Instagram, "foo bar"), None);
        assert_eq!(from_bare(Platform::Instagram, ""), None);
        assert_eq!(from_bare(Platform::Instagram, "@"), None);
        assert_eq!(from_bare(Platform::Instagram, &"a".repeat(101)), None);
    }

    #[test]
    fn bare_platform_domain_is_not_a_handle() {
        assert_eq!(from_bare(Platform::Instagram, "instagram.com"), None);
        assert!(extract_handle(Platform::Instagram, "www.instagram.com").is_err());
    }

    #[test]
    fn unusable_input_reports_platform_and_input() {
        let err = extract_handle(Platform::Tiktok, "not a handle!").unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not extract a tiktok handle from \"not a handle!\""
        );
    }
}
