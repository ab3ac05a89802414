//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};
use url::Url;

/// Validate a configuration before any client is built from it.
pub fn validate_config(config: &Config) -> Result<()> {
    parse_base_url(config.api.base_url())?;
    parse_base_url(config.api.dashboard_base_url())?;

    if config.health.interval_secs == 0 {
        return Err(Error::ConfigValidation {
            message: "health.interval_secs must be greater than zero".to_string(),
        });
    }

    Ok(())
}

/// Parse an HTTP(S) base URL.
///
/// The returned URL always ends in `/` so relative endpoint paths join
/// beneath it instead of replacing its last segment.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).map_err(|e| Error::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
