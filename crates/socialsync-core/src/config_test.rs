use std::collections::HashMap;
use std::env::VarError;
use std::time::Duration;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("SCRAPECREATORS_API_KEY", "sc-test-key");
    m.insert("SOCIALSYNC_STORAGE_BUCKET", "socialsync-media");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SOCIALSYNC_ENV"));
}

#[test]
fn build_app_config_fails_without_api_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SCRAPECREATORS_API_KEY"),
        "expected MissingEnvVar(SCRAPECREATORS_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_api_key_as_missing() {
    let mut map = full_env();
    map.insert("SCRAPECREATORS_API_KEY", "  ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_fails_without_bucket() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("SCRAPECREATORS_API_KEY", "sc-test-key");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(&result, Err(ConfigError::MissingEnvVar(v)) if v == "SOCIALSYNC_STORAGE_BUCKET"),
        "expected MissingEnvVar(SOCIALSYNC_STORAGE_BUCKET), got: {result:?}"
    );
}

#[test]
fn build_app_config_applies_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.vendor_base_url, "https://api.scrapecreators.com");
    assert_eq!(cfg.vendor_timeout_secs, 30);
    assert_eq!(cfg.vendor_max_attempts, 5);
    assert_eq!(cfg.vendor_backoff_base_ms, 1000);
    assert_eq!(cfg.vendor_backoff_cap_ms, 30_000);
    assert_eq!(cfg.storage_host, "storage.googleapis.com");
    assert_eq!(cfg.storage_upload_url, "https://storage.googleapis.com");
    assert!(cfg.storage_token.is_none());
    assert_eq!(cfg.media_timeout_secs, 30);
    assert_eq!(cfg.media_max_attempts, 3);
    assert_eq!(cfg.media_max_bytes, 100 * 1024 * 1024);
    assert_eq!(cfg.transcode_quality, 82);
}

#[test]
fn upload_url_follows_custom_storage_host() {
    let mut map = full_env();
    map.insert("SOCIALSYNC_STORAGE_HOST", "cdn.example.com");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.storage_upload_url, "https://cdn.example.com");
}

#[test]
fn vendor_timeout_invalid() {
    let mut map = full_env();
    map.insert("SOCIALSYNC_VENDOR_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    let var = match &result {
        Err(ConfigError::InvalidEnvVar { var, .. }) => var.as_str(),
        other => panic!("got: {other:?}"),
    };
    assert_eq!(var, "SOCIALSYNC_VENDOR_TIMEOUT_SECS");
}

#[test]
fn zero_vendor_attempts_rejected() {
    let mut map = full_env();
    map.insert("SOCIALSYNC_VENDOR_MAX_ATTEMPTS", "0");
    let result = build_app_config(lookup_from_map(&map));
    let var = match &result {
        Err(ConfigError::InvalidEnvVar { var, .. }) => var.as_str(),
        other => panic!("got: {other:?}"),
    };
    assert_eq!(var, "SOCIALSYNC_VENDOR_MAX_ATTEMPTS");
}

#[test]
fn transcode_quality_out_of_range_rejected() {
    let mut map = full_env();
    map.insert("SOCIALSYNC_TRANSCODE_QUALITY", "0");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
    map.insert("SOCIALSYNC_TRANSCODE_QUALITY", "101");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn retry_policies_follow_config() {
    let mut map = full_env();
    map.insert("SOCIALSYNC_VENDOR_BACKOFF_BASE_MS", "250");
    map.insert("SOCIALSYNC_MEDIA_MAX_ATTEMPTS", "4");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();

    let vendor = cfg.vendor_retry_policy();
    assert_eq!(vendor.max_attempts, 5);
    assert_eq!(vendor.base_delay, Duration::from_millis(250));
    assert!((vendor.jitter_ratio - 0.2).abs() < f64::EPSILON);

    let media = cfg.media_retry_policy();
    assert_eq!(media.max_attempts, 4);
    assert!(media.jitter_ratio.abs() < f64::EPSILON);
}

#[test]
fn debug_output_redacts_secrets() {
    let mut map = full_env();
    map.insert("SOCIALSYNC_STORAGE_TOKEN", "ya29.secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("sc-test-key"));
    assert!(!rendered.contains("ya29.secret"));
    assert!(rendered.contains("[redacted]"));
}
