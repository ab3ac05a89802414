//! JSON envelope for `--output json`.
//!
//! Every command prints exactly one envelope to stdout so scripts can tell
//! live data from offline sample data without parsing log lines.

use crate::data::Fetched;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope format version.
pub const SPEC_VERSION: &str = "1.0";

/// Envelope wrapping a command result.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct JsonEnvelope<T> {
    /// Envelope specification version.
    pub spec_version: String,
    /// When the envelope was produced.
    pub timestamp: DateTime<Utc>,
    /// What the payload contains.
    pub result_type: ResultType,
    /// Where the payload came from.
    pub source: DataSource,
    /// Service error, present for fallback and failed results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Command-specific payload; absent when the command failed.
    pub payload: Option<T>,
}

/// Payload discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    /// Liveness check.
    Health,
    /// Species list.
    SpeciesList,
    /// Single species.
    Species,
    /// Species deleted.
    SpeciesDeleted,
    /// Dashboard metrics and counters.
    Dashboard,
    /// Location hotspots.
    Sightings,
    /// Single prediction.
    Prediction,
    /// Prediction list.
    PredictionList,
    /// Prediction deleted.
    PredictionDeleted,
    /// Feedback accepted.
    Feedback,
    /// Configuration display.
    Config,
}

/// Origin of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Returned by the service.
    Live,
    /// Built-in sample data substituted after a service failure.
    Fallback,
    /// No data.
    Failed,
    /// Produced locally without contacting the service.
    Local,
}

impl<T: Serialize> JsonEnvelope<T> {
    /// Envelope for a locally produced payload.
    pub fn local(result_type: ResultType, payload: T) -> Self {
        Self::build(result_type, DataSource::Local, None, Some(payload))
    }

    /// Envelope for a data-access outcome.
    pub fn from_fetched(result_type: ResultType, fetched: Fetched<T>) -> Self {
        match fetched {
            Fetched::Live(data) => Self::build(result_type, DataSource::Live, None, Some(data)),
            Fetched::Fallback { data, error } => {
                Self::build(result_type, DataSource::Fallback, Some(error), Some(data))
            }
            Fetched::Failed(error) => {
                Self::build(result_type, DataSource::Failed, Some(error), None)
            }
        }
    }

    fn build(
        result_type: ResultType,
        source: DataSource,
        error: Option<String>,
        payload: Option<T>,
    ) -> Self {
        Self {
            spec_version: SPEC_VERSION.to_string(),
            timestamp: Utc::now(),
            result_type,
            source,
            error,
            payload,
        }
    }

    /// Serialize as a single line, for streams of envelopes.
    pub fn to_json_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::JsonWrite { source: e })
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::JsonWrite { source: e })
    }
}
