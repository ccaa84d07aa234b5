use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

use crate::error::ScraperError;

/// One leading web-scheme prefix, including the sloppy forms users paste:
/// `https://`, `https//`, `http:/`, `HTTPS:`.
static SCHEME_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(https?)(?::/*|//+)").expect("valid regex"));

/// Normalizes user input into an absolute URL.
///
/// - Trims whitespace.
/// - Strips repeated web-scheme prefixes (`https://https://x`,
///   `http://https//x`), keeping the outermost scheme.
/// - Defaults to `https` when no scheme is given.
///
/// Input carrying some other explicit scheme (`ftp://`, `file:///`) is
/// parsed as-is so the safety check can reject it by scheme.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] when the input is empty, does not
/// parse, or has no host.
pub fn normalize_website_url(input: &str) -> Result<Url, ScraperError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid(input, "empty input"));
    }

    let mut scheme: Option<String> = None;
    let mut rest = trimmed;
    while let Some(m) = SCHEME_PREFIX_RE.captures(rest) {
        let (Some(whole), Some(name)) = (m.get(0), m.get(1)) else {
            break;
        };
        scheme.get_or_insert_with(|| name.as_str().to_ascii_lowercase());
        rest = &rest[whole.end()..];
    }

    let candidate = match scheme {
        Some(scheme) => format!("{scheme}://{rest}"),
        None if rest.contains("://") => rest.to_owned(),
        None => format!("https://{rest}"),
    };

    let url = Url::parse(&candidate).map_err(|e| invalid(input, &e.to_string()))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(input, "URL has no host"));
    }
    Ok(url)
}

fn invalid(input: &str, reason: &str) -> ScraperError {
    ScraperError::InvalidUrl {
        input: input.to_owned(),
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(input: &str) -> String {
        normalize_website_url(input).unwrap().to_string()
    }

    #[test]
    fn adds_https_when_scheme_missing() {
        assert_eq!(normalized("example.com"), "https://example.com/");
        assert_eq!(normalized("  www.example.com/about  "), "https://www.example.com/about");
    }

    #[test]
    fn keeps_explicit_http() {
        assert_eq!(normalized("http://example.com/a?b=c"), "http://example.com/a?b=c");
    }

    #[test]
    fn strips_duplicated_prefixes() {
        assert_eq!(normalized("https://https://example.com"), "https://example.com/");
        assert_eq!(normalized("http://https//example.com/x"), "http://example.com/x");
        assert_eq!(normalized("https//example.com"), "https://example.com/");
        assert_eq!(normalized("HTTPS://example.com"), "https://example.com/");
    }

    #[test]
    fn normalization_is_idempotent_for_public_hosts() {
        for input in [
            "example.com",
            "https://https://shop.example.org/path?q=1",
            "http://blog.example.net",
            "Example.COM/Mixed/Case",
            "https//example.io/a/b/",
        ] {
            let once = normalized(input);
            let twice = normalized(&once);
            assert_eq!(once, twice, "input: {input}");
        }
    }

    #[test]
    fn other_schemes_survive_for_the_safety_check() {
        assert_eq!(normalize_website_url("ftp://example.com").unwrap().scheme(), "ftp");
    }

    #[test]
    fn rejects_empty_and_unparseable_input() {
        assert!(matches!(
            normalize_website_url("   "),
            Err(ScraperError::InvalidUrl { .. })
        ));
        assert!(matches!(
            normalize_website_url("https://"),
            Err(ScraperError::InvalidUrl { .. })
        ));
        assert!(matches!(
            normalize_website_url("exa mple.com"),
            Err(ScraperError::InvalidUrl { .. })
        ));
    }
}
