//! Error types for birdid.

/// Result type alias for birdid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for birdid.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// A base URL could not be parsed.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client")]
    ClientBuild {
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The request never produced a response (connection refused, timeout, ...).
    #[error("request to '{url}' failed")]
    Network {
        /// Requested URL.
        url: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-2xx status.
    #[error("API Error: {status} {reason}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
        /// Requested URL.
        url: String,
    },

    /// The audio upload was answered with a non-2xx status.
    #[error("Upload failed: {status} {reason}")]
    Upload {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
    },

    /// The response body was not the expected JSON.
    #[error("failed to decode response from '{url}'")]
    Decode {
        /// Requested URL.
        url: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// Feedback was submitted without a rating.
    #[error("a rating (correct, unsure or incorrect) is required before submitting feedback")]
    MissingRating,

    /// Feedback confidence outside the accepted range.
    #[error("feedback confidence must be between {min} and {max}, got {value}")]
    InvalidFeedbackConfidence {
        /// Rejected value.
        value: u8,
        /// Lower bound.
        min: u8,
        /// Upper bound.
        max: u8,
    },

    /// Failed to read the audio file selected for upload.
    #[error("failed to read audio file '{path}'")]
    AudioRead {
        /// Path to the audio file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Audio file has an extension the service does not accept.
    #[error("unsupported audio format: {format} (expected wav, mp3, aac or flac)")]
    UnsupportedAudioFormat {
        /// Detected extension.
        format: String,
    },

    /// Failed to read a JSON input file.
    #[error("failed to parse JSON file '{path}'")]
    JsonRead {
        /// Path to the JSON file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize JSON output.
    #[error("failed to serialize JSON output")]
    JsonWrite {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write a CSV export.
    #[error("failed to write CSV export '{path}'")]
    CsvWrite {
        /// Path to the CSV file.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// An operation produced no data and no fallback was available.
    #[error("{message}")]
    Unavailable {
        /// Error message recorded by the data-access layer.
        message: String,
    },

    /// Internal error.
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}
