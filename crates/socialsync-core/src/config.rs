use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let vendor_api_key = require("SCRAPECREATORS_API_KEY")?;
    let storage_bucket = require("SOCIALSYNC_STORAGE_BUCKET")?;

    let env = parse_environment(&or_default("SOCIALSYNC_ENV", "development"))?;
    let log_level = or_default("SOCIALSYNC_LOG_LEVEL", "info");
    let user_agent = or_default("SOCIALSYNC_USER_AGENT", "socialsync/0.1 (ingestion)");

    let vendor_base_url = or_default(
        "SOCIALSYNC_VENDOR_BASE_URL",
        "https://api.scrapecreators.com",
    );
    let vendor_timeout_secs = parse_u64("SOCIALSYNC_VENDOR_TIMEOUT_SECS", "30")?;
    let vendor_max_attempts = parse_u32("SOCIALSYNC_VENDOR_MAX_ATTEMPTS", "5")?;
    let vendor_backoff_base_ms = parse_u64("SOCIALSYNC_VENDOR_BACKOFF_BASE_MS", "1000")?;
    let vendor_backoff_cap_ms = parse_u64("SOCIALSYNC_VENDOR_BACKOFF_CAP_MS", "30000")?;

    let storage_host = or_default("SOCIALSYNC_STORAGE_HOST", "storage.googleapis.com");
    let storage_upload_url = or_default(
        "SOCIALSYNC_STORAGE_UPLOAD_URL",
        &format!("https://{storage_host}"),
    );
    let storage_token = lookup("SOCIALSYNC_STORAGE_TOKEN")
        .ok()
        .filter(|v| !v.is_empty());

    let media_timeout_secs = parse_u64("SOCIALSYNC_MEDIA_TIMEOUT_SECS", "30")?;
    let media_max_attempts = parse_u32("SOCIALSYNC_MEDIA_MAX_ATTEMPTS", "3")?;
    let media_backoff_base_ms = parse_u64("SOCIALSYNC_MEDIA_BACKOFF_BASE_MS", "1000")?;
    let media_max_bytes = parse_u64("SOCIALSYNC_MEDIA_MAX_BYTES", "104857600")?;
    let transcode_quality = parse_quality(&or_default("SOCIALSYNC_TRANSCODE_QUALITY", "82"))?;

    if vendor_max_attempts == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SOCIALSYNC_VENDOR_MAX_ATTEMPTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if media_max_attempts == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SOCIALSYNC_MEDIA_MAX_ATTEMPTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        user_agent,
        vendor_api_key,
        vendor_base_url,
        vendor_timeout_secs,
        vendor_max_attempts,
        vendor_backoff_base_ms,
        vendor_backoff_cap_ms,
        storage_bucket,
        storage_host,
        storage_upload_url,
        storage_token,
        media_timeout_secs,
        media_max_attempts,
        media_backoff_base_ms,
        media_max_bytes,
        transcode_quality,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for values other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SOCIALSYNC_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_quality(raw: &str) -> Result<u8, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "SOCIALSYNC_TRANSCODE_QUALITY".to_string(),
        reason,
    };
    let quality = raw.parse::<u8>().map_err(|e| invalid(e.to_string()))?;
    if (1..=100).contains(&quality) {
        Ok(quality)
    } else {
        Err(invalid(format!("{quality} is outside 1..=100")))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
