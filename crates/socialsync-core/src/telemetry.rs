use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber for the embedding process.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (usually
/// [`crate::AppConfig::log_level`]) is used. Calling this twice is harmless:
/// the second installation attempt is ignored.
pub fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_tracing("debug");
        init_tracing("not a valid filter [");
        tracing::info!("subscriber installed");
    }
}
