//! Configuration type definitions.

use crate::constants::{
    DEFAULT_DEVELOPMENT_URL, DEFAULT_HEALTH_INTERVAL_SECS, DEFAULT_PRODUCTION_URL,
    DEFAULT_TIMEOUT_SECS, MAP_API_KEY_PLACEHOLDER,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend service settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Offline fallback behaviour.
    #[serde(default)]
    pub fallback: FallbackConfig,

    /// Health polling settings.
    #[serde(default)]
    pub health: HealthConfig,

    /// Map provider settings.
    #[serde(default)]
    pub map: MapConfig,

    /// Export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Build mode selecting which base URL is active.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Local backend.
    #[default]
    Development,
    /// Deployed backend.
    Production,
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Backend service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Which of the two base URLs is active.
    pub mode: BuildMode,

    /// Base URL used in development mode.
    pub development_url: String,

    /// Base URL used in production mode.
    pub production_url: String,

    /// Base URL for the dashboard endpoints, if served separately.
    pub dashboard_url: Option<String>,

    /// Request timeout in seconds (0 disables).
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            mode: BuildMode::Development,
            development_url: DEFAULT_DEVELOPMENT_URL.to_string(),
            production_url: DEFAULT_PRODUCTION_URL.to_string(),
            dashboard_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Base URL for the active build mode.
    pub fn base_url(&self) -> &str {
        match self.mode {
            BuildMode::Development => &self.development_url,
            BuildMode::Production => &self.production_url,
        }
    }

    /// Base URL for dashboard endpoints, defaulting to [`Self::base_url`].
    pub fn dashboard_base_url(&self) -> &str {
        self.dashboard_url.as_deref().unwrap_or_else(|| self.base_url())
    }

    /// Request timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// What the data-access layer does when the service cannot be reached.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Substitute built-in sample data and report the error alongside it.
    #[default]
    Permissive,
    /// Report the error with no data.
    Strict,
}

/// Offline fallback behaviour.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Fallback policy.
    pub policy: FallbackPolicy,
}

/// Health polling settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Seconds between liveness checks.
    pub interval_secs: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_HEALTH_INTERVAL_SECS,
        }
    }
}

impl HealthConfig {
    /// Polling interval.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Map provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Map provider API key.
    pub api_key: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            api_key: MAP_API_KEY_PLACEHOLDER.to_string(),
        }
    }
}

impl MapConfig {
    /// The API key, or `None` while it is blank or still the template placeholder.
    pub fn api_key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        (!key.is_empty() && key != MAP_API_KEY_PLACEHOLDER).then_some(key)
    }
}

/// Export settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Write a UTF-8 BOM at the start of CSV exports.
    pub csv_bom: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { csv_bom: true }
    }
}
