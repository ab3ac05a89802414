//! Built-in sample data used when the service is unreachable.

use crate::api::{
    AlternativePrediction, AudioAnalysis, AudioUpload, Bird, DashboardBird, DashboardStats,
    Prediction, PredictionMetadata, SpeciesStatus, UploadMetadata,
};
use chrono::{DateTime, SecondsFormat, Utc};

/// Label of the synthesized offline prediction.
pub const MOCK_PREDICTED_BIRD: &str = "Eurasian Tree Sparrow";

/// Confidence of the synthesized offline prediction.
pub const MOCK_CONFIDENCE: f64 = 92.1;

struct Sample {
    id: &'static str,
    name: &'static str,
    thai_name: &'static str,
    scientific_name: &'static str,
    description: &'static str,
    habitats: &'static str,
    length: &'static str,
    wingspan: &'static str,
    weight: &'static str,
    diet: &'static str,
    confidence: f64,
    last_seen: &'static str,
    status: SpeciesStatus,
    sightings: u64,
    recordings: u64,
    first_recorded: &'static str,
    feedback_count: u64,
    needs_feedback: bool,
    accuracy_rate: f64,
}

const FOUND: &str = "Pathum Thani, Khlong Luang";

const SAMPLES: [Sample; 5] = [
    Sample {
        id: "b001",
        name: "Eastern Jungle Crow",
        thai_name: "อีกา",
        scientific_name: "Corvus levaillantii (Lesson, 1831)",
        description: "Large, all-black bird with a thick bill. Common in urban and rural settings across Thailand.",
        habitats: "Urban areas, agricultural lands",
        length: "45-50",
        wingspan: "85-100",
        weight: "350-450",
        diet: "Omnivorous - insects, small animals, fruits, garbage",
        confidence: 94.2,
        last_seen: "2 hours ago",
        status: SpeciesStatus::Active,
        sightings: 156,
        recordings: 42,
        first_recorded: "Jan 15, 2023",
        feedback_count: 23,
        needs_feedback: true,
        accuracy_rate: 89.5,
    },
    Sample {
        id: "b002",
        name: "Common Myna",
        thai_name: "นกเอี้ยงสาริกา",
        scientific_name: "Acridotheres tristis (Linnaeus, 1766)",
        description: "Medium-sized bird with brown body, black head and yellow bill and legs. Highly adaptable to human environments.",
        habitats: "Urban parks, gardens, agricultural areas",
        length: "23-26",
        wingspan: "40-45",
        weight: "82-143",
        diet: "Insects, fruits, nectar, small reptiles",
        confidence: 89.7,
        last_seen: "5 hours ago",
        status: SpeciesStatus::Active,
        sightings: 203,
        recordings: 67,
        first_recorded: "Dec 3, 2022",
        feedback_count: 45,
        needs_feedback: false,
        accuracy_rate: 92.1,
    },
    Sample {
        id: "b003",
        name: "Red Collared Dove",
        thai_name: "นกเขาไฟ",
        scientific_name: "Streptopelia tranquebarica (Hermann, 1804)",
        description: "Small dove with distinctive red collar in males. Common in rural and suburban areas.",
        habitats: "Open woodlands, agricultural fields",
        length: "20-23",
        wingspan: "32-35",
        weight: "90-120",
        diet: "Seeds, grains, small fruits",
        confidence: 87.3,
        last_seen: "1 day ago",
        status: SpeciesStatus::Inactive,
        sightings: 89,
        recordings: 23,
        first_recorded: "Mar 8, 2023",
        feedback_count: 12,
        needs_feedback: true,
        accuracy_rate: 78.5,
    },
    Sample {
        id: "b004",
        name: "Eurasian Tree Sparrow",
        thai_name: "นกกระจอกบ้าน",
        scientific_name: "Passer montanus (Linnaeus, 1758)",
        description: "Small, brown bird with chestnut crown and black cheek patch. Very common in human settlements.",
        habitats: "Urban areas, villages, agricultural lands",
        length: "12.5-14",
        wingspan: "20-22",
        weight: "19-25",
        diet: "Seeds, grains, insects, and some fruits",
        confidence: 92.1,
        last_seen: "3 hours ago",
        status: SpeciesStatus::Active,
        sightings: 312,
        recordings: 98,
        first_recorded: "Nov 12, 2022",
        feedback_count: 67,
        needs_feedback: false,
        accuracy_rate: 94.2,
    },
    Sample {
        id: "b005",
        name: "Rock Pigeon",
        thai_name: "นกพิราบป่า",
        scientific_name: "Columba livia (Gmelin, 1789)",
        description: "Medium-sized pigeon with variable coloration. Extremely common in urban environments worldwide.",
        habitats: "Urban areas, cliffs, rocky areas",
        length: "29-37",
        wingspan: "64-72",
        weight: "300-500",
        diet: "Seeds, grains, bread, small insects",
        confidence: 96.8,
        last_seen: "1 hour ago",
        status: SpeciesStatus::Active,
        sightings: 427,
        recordings: 112,
        first_recorded: "Oct 5, 2022",
        feedback_count: 89,
        needs_feedback: true,
        accuracy_rate: 91.7,
    },
];

impl Sample {
    fn bird(&self) -> Bird {
        Bird {
            id: self.id.to_string(),
            name: self.name.to_string(),
            thai_name: Some(self.thai_name.to_string()),
            scientific_name: self.scientific_name.to_string(),
            description: self.description.to_string(),
            habitats: self.habitats.to_string(),
            physical_length_cm: self.length.to_string(),
            physical_wingspan_cm: self.wingspan.to_string(),
            physical_weight_g: self.weight.to_string(),
            diet: self.diet.to_string(),
            conservation_status: "Least Concern".to_string(),
            image_url: None,
        }
    }

    fn dashboard(&self) -> DashboardBird {
        DashboardBird {
            bird: self.bird(),
            confidence: Some(self.confidence),
            found: Some(FOUND.to_string()),
            last_seen: Some(self.last_seen.to_string()),
            status: Some(self.status),
            sightings: Some(self.sightings),
            recordings: Some(self.recordings),
            first_recorded: Some(self.first_recorded.to_string()),
            feedback_count: Some(self.feedback_count),
            needs_feedback: self.needs_feedback,
            accuracy_rate: Some(self.accuracy_rate),
        }
    }
}

/// Sample species catalog.
pub fn mock_birds() -> Vec<Bird> {
    SAMPLES.iter().map(Sample::bird).collect()
}

/// Sample species with dashboard metrics.
pub fn mock_dashboard_birds() -> Vec<DashboardBird> {
    SAMPLES.iter().map(Sample::dashboard).collect()
}

/// Sample species record by id.
pub fn mock_bird(id: &str) -> Option<Bird> {
    SAMPLES.iter().find(|s| s.id == id).map(Sample::bird)
}

/// Sample dashboard counters.
pub fn mock_dashboard_stats() -> DashboardStats {
    DashboardStats {
        total_species: 1247,
        active_users: 8932,
        locations: 156,
        this_month: 2341,
    }
}

/// Synthesize an offline prediction for `upload`.
///
/// File details come from the upload; any user metadata is layered on top.
pub fn mock_prediction(
    upload: &AudioUpload,
    metadata: Option<&UploadMetadata>,
    now: DateTime<Utc>,
) -> Prediction {
    let user = metadata.cloned().unwrap_or_default();

    Prediction {
        id: format!("prediction_{}", now.timestamp_millis()),
        predicted_bird: MOCK_PREDICTED_BIRD.to_string(),
        confidence: MOCK_CONFIDENCE,
        spectrogram_url: None,
        audio_url: None,
        metadata: PredictionMetadata {
            latitude: user.latitude,
            longitude: user.longitude,
            recorded_at: user.recorded_at,
            user_notes: user.user_notes,
            file_name: Some(upload.file_name().to_string()),
            file_size: Some(upload.size()),
            duration: Some("00:45".to_string()),
            format: Some(upload.format().label().to_string()),
            sample_rate: Some("44.1 kHz".to_string()),
            bit_depth: Some("16-bit".to_string()),
        },
        alternative_predictions: vec![
            alternative("Common Myna", 78.3),
            alternative("Eastern Jungle Crow", 65.7),
            alternative("Red Collared Dove", 45.2),
        ],
        audio_analysis: Some(AudioAnalysis {
            dominant_frequency: Some("2.8 kHz".to_string()),
            frequency_range: Some("1.2 - 8.5 kHz".to_string()),
            call_duration: Some("0.8 seconds".to_string()),
            calls_detected: Some(12),
            noise_level: Some("Low".to_string()),
            quality: Some("High".to_string()),
        }),
        processing_time: Some("2.3 seconds".to_string()),
        analysis_date: Some(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
    }
}

fn alternative(name: &str, confidence: f64) -> AlternativePrediction {
    AlternativePrediction {
        bird_name: name.to_string(),
        confidence,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_catalog_and_dashboard_share_ids() {
        let catalog: Vec<_> = mock_birds().into_iter().map(|b| b.id).collect();
        let dashboard: Vec<_> = mock_dashboard_birds()
            .into_iter()
            .map(|b| b.bird.id)
            .collect();
        assert_eq!(catalog, dashboard);
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_mock_bird_lookup() {
        assert_eq!(mock_bird("b004").unwrap().name, "Eurasian Tree Sparrow");
        assert!(mock_bird("b999").is_none());
    }

    #[test]
    fn test_mock_prediction_merges_upload_and_metadata() {
        let upload = AudioUpload::new("garden.flac", vec![0; 10]).unwrap();
        let metadata = UploadMetadata {
            latitude: Some(14.07),
            user_notes: Some("near the canal".to_string()),
            ..UploadMetadata::default()
        };
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 14, 30, 25).unwrap();

        let prediction = mock_prediction(&upload, Some(&metadata), now);

        assert_eq!(prediction.id, format!("prediction_{}", now.timestamp_millis()));
        assert_eq!(prediction.predicted_bird, MOCK_PREDICTED_BIRD);
        assert_eq!(prediction.confidence, MOCK_CONFIDENCE);
        assert_eq!(prediction.metadata.file_name.as_deref(), Some("garden.flac"));
        assert_eq!(prediction.metadata.file_size, Some(10));
        assert_eq!(prediction.metadata.format.as_deref(), Some("FLAC"));
        assert_eq!(prediction.metadata.latitude, Some(14.07));
        assert_eq!(
            prediction.metadata.user_notes.as_deref(),
            Some("near the canal")
        );
        assert_eq!(
            prediction.analysis_date.as_deref(),
            Some("2025-01-15T14:30:25.000Z")
        );
        let names: Vec<_> = prediction
            .alternative_predictions
            .iter()
            .map(|a| a.bird_name.as_str())
            .collect();
        assert_eq!(
            names,
            ["Common Myna", "Eastern Jungle Crow", "Red Collared Dove"]
        );
    }
}
