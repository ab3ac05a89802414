//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "birdid";

/// Default API base URL in development mode.
pub const DEFAULT_DEVELOPMENT_URL: &str = "http://localhost:5000/api/v1";

/// Default API base URL in production mode.
///
/// Deployments are expected to override this in the config file.
pub const DEFAULT_PRODUCTION_URL: &str = "https://api.birdid.example/api/v1";

/// Default HTTP request timeout in seconds. Zero disables the timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default health check polling interval in seconds.
pub const DEFAULT_HEALTH_INTERVAL_SECS: u64 = 30;

/// Sentinel value shipped in config templates for the map provider key.
pub const MAP_API_KEY_PLACEHOLDER: &str = "YOUR_MAP_API_KEY";

/// Placeholder rendered for absent text fields.
pub const PLACEHOLDER_TEXT: &str = "—";

/// Placeholder rendered for absent numeric fields.
pub const PLACEHOLDER_NUMBER: &str = "?";

/// Feedback self-assessment bounds.
pub mod feedback {
    /// Lowest accepted confidence self-assessment.
    pub const MIN_CONFIDENCE: u8 = 1;

    /// Highest accepted confidence self-assessment.
    pub const MAX_CONFIDENCE: u8 = 10;

    /// Self-assessment used when the user does not pick one.
    pub const DEFAULT_CONFIDENCE: u8 = 5;
}

/// API endpoint paths, relative to the configured base URL.
pub mod endpoints {
    /// Liveness endpoint.
    pub const HEALTH: &str = "health";

    /// Species catalog collection.
    pub const BIRDS: &str = "birds";

    /// Prediction collection.
    pub const PREDICTIONS: &str = "predictions";

    /// Dashboard species aggregate.
    pub const DASHBOARD_BIRDS: &str = "birds/dashboard";

    /// Dashboard headline statistics.
    pub const DASHBOARD_STATS: &str = "dashboard/stats";
}

/// Sighting activity thresholds used by the location summary.
pub mod activity {
    /// Total sightings at or above which a location is "high" activity.
    pub const HIGH_SIGHTINGS: u64 = 10;

    /// Total sightings at or above which a location is "medium" activity.
    pub const MEDIUM_SIGHTINGS: u64 = 5;
}

/// Confidence display settings.
pub mod confidence {
    /// Decimal places shown for percentage confidence values.
    pub const DECIMAL_PLACES: usize = 1;
}

/// CSV export settings.
pub mod csv {
    /// UTF-8 byte order mark written at the start of CSV exports.
    ///
    /// Spreadsheet applications use it to detect the encoding, which matters
    /// for the localized species names.
    pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
}
