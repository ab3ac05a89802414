//! Wire types exchanged with the identification service.
//!
//! Every optional field deserializes to `None` when absent; consumers render
//! placeholders instead of failing.

use serde::{Deserialize, Serialize};

/// A species catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Identifier, e.g. `b004`.
    pub id: String,
    /// Common (English) name.
    #[serde(default)]
    pub name: String,
    /// Localized (Thai) name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thai_name: Option<String>,
    /// Scientific name with authority.
    #[serde(default)]
    pub scientific_name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Habitat description.
    #[serde(default)]
    pub habitats: String,
    /// Body length range in centimetres, as display text.
    #[serde(default)]
    pub physical_length_cm: String,
    /// Wingspan range in centimetres, as display text.
    #[serde(default)]
    pub physical_wingspan_cm: String,
    /// Weight range in grams, as display text.
    #[serde(default)]
    pub physical_weight_g: String,
    /// Diet description.
    #[serde(default)]
    pub diet: String,
    /// Conservation status, e.g. "Least Concern".
    #[serde(default)]
    pub conservation_status: String,
    /// Image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Fields accepted by create/update. Unset fields are omitted from the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirdPatch {
    /// Common name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Localized name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thai_name: Option<String>,
    /// Scientific name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Habitat description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habitats: Option<String>,
    /// Length range, cm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_length_cm: Option<String>,
    /// Wingspan range, cm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_wingspan_cm: Option<String>,
    /// Weight range, g.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_weight_g: Option<String>,
    /// Diet description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
    /// Conservation status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conservation_status: Option<String>,
    /// Image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Lifecycle status of a species on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeciesStatus {
    /// Recently observed.
    Active,
    /// Not observed recently.
    Inactive,
}

impl std::fmt::Display for SpeciesStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

/// A species record extended with observational metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardBird {
    /// Catalog fields.
    #[serde(flatten)]
    pub bird: Bird,
    /// Average identification confidence, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Where the species was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found: Option<String>,
    /// Recency text, e.g. "2 hours ago".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
    /// Lifecycle status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SpeciesStatus>,
    /// Number of sightings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sightings: Option<u64>,
    /// Number of recordings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recordings: Option<u64>,
    /// Date of the first recording, as display text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_recorded: Option<String>,
    /// Feedback entries received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_count: Option<u64>,
    /// Whether more feedback is wanted for this species.
    #[serde(default)]
    pub needs_feedback: bool,
    /// Share of predictions confirmed correct, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_rate: Option<f64>,
}

/// Headline dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    /// Species known to the service.
    pub total_species: u64,
    /// Users active recently.
    pub active_users: u64,
    /// Distinct recording locations.
    pub locations: u64,
    /// Observations recorded this month.
    pub this_month: u64,
}

/// Location and notes sent alongside an uploaded recording.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadMetadata {
    /// Latitude in decimal degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Capture time, free-form (usually RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<String>,
    /// User notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_notes: Option<String>,
}

impl UploadMetadata {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.latitude.is_none()
            && self.longitude.is_none()
            && self.recorded_at.is_none()
            && self.user_notes.is_none()
    }
}

/// Recording and file metadata attached to a prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionMetadata {
    /// Latitude in decimal degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Capture time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<String>,
    /// User notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_notes: Option<String>,
    /// Original file name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    /// Duration as display text, e.g. "00:45".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Container format, e.g. "WAV".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Sample rate as display text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<String>,
    /// Bit depth as display text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_depth: Option<String>,
}

/// A lower-ranked candidate species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativePrediction {
    /// Candidate species name.
    pub bird_name: String,
    /// Confidence, 0-100.
    pub confidence: f64,
}

/// Acoustic summary of the uploaded call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioAnalysis {
    /// Strongest frequency component.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_frequency: Option<String>,
    /// Observed frequency band.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_range: Option<String>,
    /// Typical call length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_duration: Option<String>,
    /// Number of calls found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calls_detected: Option<u32>,
    /// Background noise rating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise_level: Option<String>,
    /// Recording quality rating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

/// Classification result for one uploaded recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Identifier assigned by the service.
    pub id: String,
    /// Top species label.
    pub predicted_bird: String,
    /// Top confidence, 0-100.
    pub confidence: f64,
    /// Spectrogram image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spectrogram_url: Option<String>,
    /// Stored audio URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Recording metadata.
    #[serde(default)]
    pub metadata: PredictionMetadata,
    /// Other candidates, in the order the service ranked them.
    #[serde(default)]
    pub alternative_predictions: Vec<AlternativePrediction>,
    /// Acoustic summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_analysis: Option<AudioAnalysis>,
    /// Processing duration as display text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<String>,
    /// Analysis timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_date: Option<String>,
}

/// User verdict on a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackRating {
    /// The prediction was right.
    Correct,
    /// The user is not sure.
    Unsure,
    /// The prediction was wrong.
    Incorrect,
}

impl std::fmt::Display for FeedbackRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Correct => write!(f, "correct"),
            Self::Unsure => write!(f, "unsure"),
            Self::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// Feedback body posted to `/predictions/{id}/feedback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Verdict.
    pub rating: FeedbackRating,
    /// Self-assessed certainty, 1-10.
    pub confidence: u8,
    /// Free-text comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Species the user believes it actually was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_species: Option<String>,
    /// Where the recording was made.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_bird_tolerates_missing_fields() {
        let bird: Bird = serde_json::from_str(r#"{"id": "b999"}"#).unwrap();
        assert_eq!(bird.id, "b999");
        assert!(bird.name.is_empty());
        assert!(bird.thai_name.is_none());
    }

    #[test]
    fn test_dashboard_bird_flattens_catalog_fields() {
        let json = r#"{
            "id": "b001",
            "name": "Eastern Jungle Crow",
            "scientific_name": "Corvus levaillantii",
            "confidence": 94.2,
            "status": "active",
            "sightings": 156,
            "needs_feedback": true
        }"#;
        let record: DashboardBird = serde_json::from_str(json).unwrap();
        assert_eq!(record.bird.name, "Eastern Jungle Crow");
        assert_eq!(record.status, Some(SpeciesStatus::Active));
        assert_eq!(record.sightings, Some(156));
        assert!(record.needs_feedback);
        assert!(record.recordings.is_none());
    }

    #[test]
    fn test_prediction_keeps_alternative_order() {
        let json = r#"{
            "id": "p1",
            "predicted_bird": "Eurasian Tree Sparrow",
            "confidence": 92.1,
            "alternative_predictions": [
                {"bird_name": "Red Collared Dove", "confidence": 45.2},
                {"bird_name": "Common Myna", "confidence": 78.3}
            ]
        }"#;
        let prediction: Prediction = serde_json::from_str(json).unwrap();
        assert_eq!(prediction.confidence, 92.1);
        assert_eq!(
            prediction.alternative_predictions[0].bird_name,
            "Red Collared Dove"
        );
        assert_eq!(prediction.metadata, PredictionMetadata::default());
        assert!(prediction.audio_analysis.is_none());
    }

    #[test]
    fn test_feedback_omits_empty_optionals() {
        let feedback = Feedback {
            rating: FeedbackRating::Unsure,
            confidence: 4,
            comments: None,
            actual_species: Some("Common Myna".to_string()),
            location: None,
        };
        let value = serde_json::to_value(&feedback).unwrap();
        assert_eq!(value["rating"], "unsure");
        assert_eq!(value["actual_species"], "Common Myna");
        assert!(value.get("comments").is_none());
    }

    #[test]
    fn test_bird_patch_serializes_only_set_fields() {
        let patch = BirdPatch {
            name: Some("Rock Pigeon".to_string()),
            ..BirdPatch::default()
        };
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"name":"Rock Pigeon"}"#
        );
    }

    #[test]
    fn test_stats_default_missing_counters() {
        let stats: DashboardStats = serde_json::from_str(r#"{"total_species": 1247}"#).unwrap();
        assert_eq!(stats.total_species, 1247);
        assert_eq!(stats.active_users, 0);
    }
}
