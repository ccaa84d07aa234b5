//! SSRF guard for user-supplied website URLs.
//!
//! Runs before any request is issued. The vendor performs the actual fetch,
//! so what matters is that we never hand it an obviously internal target.

use reqwest::Url;
use socialsync_core::target::check_scheme_and_host;

use crate::error::ScraperError;

/// Rejects URLs that point at loopback, private, link-local, or metadata
/// targets, or that use a scheme other than http/https.
///
/// # Errors
///
/// Returns [`ScraperError::UnsafeUrl`] carrying the rejection reason.
pub fn check_target(url: &Url) -> Result<(), ScraperError> {
    check_scheme_and_host(url.scheme(), url.host_str()).map_err(|blocked| {
        ScraperError::UnsafeUrl {
            url: url.to_string(),
            reason: blocked.0,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(raw: &str) -> Result<(), ScraperError> {
        check_target(&Url::parse(raw).unwrap())
    }

    #[test]
    fn rejects_well_known_internal_targets() {
        for raw in [
            "http://127.0.0.1/",
            "http://localhost:8080/admin",
            "http://169.254.169.254/latest/meta-data/",
            "http://10.0.0.5/",
            "http://192.168.1.1/",
            "http://metadata.google.internal/computeMetadata/v1/",
            "http://[::ffff:127.0.0.1]/",
        ] {
            assert!(
                matches!(check(raw), Err(ScraperError::UnsafeUrl { .. })),
                "expected rejection for {raw}"
            );
        }
    }

    #[test]
    fn ipv4_compatible_loopback_is_rejected() {
        for raw in ["http://[::127.0.0.1]/", "http://[::7f00:1]/"] {
            let err = check(raw).unwrap_err();
            assert!(
                err.to_string().contains("in blocked range 127.0.0.0/8"),
                "{raw}: {err}"
            );
        }
    }

    #[test]
    fn rejects_non_web_schemes() {
        let err = check("ftp://example.com/file").unwrap_err();
        assert!(err.to_string().contains("scheme 'ftp'"), "got: {err}");
        assert!(check("file:///etc/passwd").is_err());
    }

    #[test]
    fn decimal_encoded_loopback_is_caught_after_parsing() {
        // The URL parser canonicalizes 2130706433 to 127.0.0.1.
        assert!(check("http://2130706433/").is_err());
    }

    #[test]
    fn allows_public_targets() {
        for raw in ["https://example.com/", "https://[2606:4700:4700::1111]/"] {
            assert!(check(raw).is_ok(), "expected {raw} to pass");
        }
    }

    #[test]
    fn rejection_reason_names_the_range() {
        let err = check("http://10.1.2.3/").unwrap_err();
        assert_eq!(
            err.to_string(),
            "refusing to fetch http://10.1.2.3/: address 10.1.2.3 is in blocked range 10.0.0.0/8"
        );
    }
}
