//! Human-readable rendering.
//!
//! Renderers return the full text so commands can print it in one write and
//! tests can assert on it directly.

use crate::api::{Bird, DashboardBird, DashboardStats, Prediction};
use crate::catalog::Hotspot;
use crate::constants::{PLACEHOLDER_NUMBER, PLACEHOLDER_TEXT};
use std::fmt::Display;

/// `92.1%`. The value is shown as received, without rounding.
pub fn format_percent(value: f64) -> String {
    format!("{value}%")
}

/// `92.1% confidence`.
pub fn format_confidence(value: f64) -> String {
    format!("{} confidence", format_percent(value))
}

/// The text, or `—` when absent or blank.
pub fn text_or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => PLACEHOLDER_TEXT,
    }
}

/// The number, or `?` when absent.
pub fn number_or_placeholder<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| PLACEHOLDER_NUMBER.to_string(), |v| v.to_string())
}

fn field(lines: &mut Vec<String>, label: &str, value: &str) {
    lines.push(format!("  {label:<16} {value}"));
}

/// Full prediction result.
pub fn render_prediction(prediction: &Prediction) -> String {
    let mut lines = vec![
        format!("Prediction {}", prediction.id),
        format!(
            "  {} ({})",
            text_or_placeholder(Some(prediction.predicted_bird.as_str())),
            format_confidence(prediction.confidence)
        ),
    ];

    if !prediction.alternative_predictions.is_empty() {
        lines.push(String::new());
        lines.push("Alternatives:".to_string());
        for (rank, alt) in prediction.alternative_predictions.iter().enumerate() {
            lines.push(format!(
                "  {}. {} ({})",
                rank + 1,
                text_or_placeholder(Some(alt.bird_name.as_str())),
                format_percent(alt.confidence)
            ));
        }
    }

    let meta = &prediction.metadata;
    lines.push(String::new());
    lines.push("Recording:".to_string());
    field(&mut lines, "File", text_or_placeholder(meta.file_name.as_deref()));
    field(&mut lines, "Size (bytes)", &number_or_placeholder(meta.file_size));
    field(&mut lines, "Duration", text_or_placeholder(meta.duration.as_deref()));
    field(&mut lines, "Format", text_or_placeholder(meta.format.as_deref()));
    field(&mut lines, "Sample rate", text_or_placeholder(meta.sample_rate.as_deref()));
    field(&mut lines, "Bit depth", text_or_placeholder(meta.bit_depth.as_deref()));
    field(&mut lines, "Recorded at", text_or_placeholder(meta.recorded_at.as_deref()));
    let location = match (meta.latitude, meta.longitude) {
        (Some(lat), Some(lon)) => format!("{lat:.4}, {lon:.4}"),
        _ => PLACEHOLDER_TEXT.to_string(),
    };
    field(&mut lines, "Location", &location);
    field(&mut lines, "Notes", text_or_placeholder(meta.user_notes.as_deref()));

    if let Some(analysis) = &prediction.audio_analysis {
        lines.push(String::new());
        lines.push("Audio analysis:".to_string());
        field(
            &mut lines,
            "Dominant freq.",
            text_or_placeholder(analysis.dominant_frequency.as_deref()),
        );
        field(
            &mut lines,
            "Frequency range",
            text_or_placeholder(analysis.frequency_range.as_deref()),
        );
        field(
            &mut lines,
            "Call duration",
            text_or_placeholder(analysis.call_duration.as_deref()),
        );
        field(
            &mut lines,
            "Calls detected",
            &number_or_placeholder(analysis.calls_detected),
        );
        field(
            &mut lines,
            "Noise level",
            text_or_placeholder(analysis.noise_level.as_deref()),
        );
        field(&mut lines, "Quality", text_or_placeholder(analysis.quality.as_deref()));
    }

    lines.push(String::new());
    field(
        &mut lines,
        "Processing time",
        text_or_placeholder(prediction.processing_time.as_deref()),
    );
    field(
        &mut lines,
        "Analyzed at",
        text_or_placeholder(prediction.analysis_date.as_deref()),
    );

    lines.join("\n")
}

/// One-line-per-prediction history.
pub fn render_prediction_list(predictions: &[Prediction]) -> String {
    if predictions.is_empty() {
        return "No predictions.".to_string();
    }

    let mut lines = vec![format!(
        "{:<28} {:<28} {:>10}  {}",
        "ID", "Species", "Confidence", "File"
    )];
    for p in predictions {
        lines.push(format!(
            "{:<28} {:<28} {:>10}  {}",
            p.id,
            text_or_placeholder(Some(p.predicted_bird.as_str())),
            format_percent(p.confidence),
            text_or_placeholder(p.metadata.file_name.as_deref())
        ));
    }
    lines.join("\n")
}

/// Species detail page.
pub fn render_bird(bird: &Bird) -> String {
    let mut lines = vec![
        format!("{} ({})", text_or_placeholder(Some(bird.name.as_str())), bird.id),
    ];
    field(&mut lines, "Localized name", text_or_placeholder(bird.thai_name.as_deref()));
    field(
        &mut lines,
        "Scientific name",
        text_or_placeholder(Some(bird.scientific_name.as_str())),
    );
    field(&mut lines, "Habitats", text_or_placeholder(Some(bird.habitats.as_str())));
    field(&mut lines, "Length (cm)", text_or_placeholder(Some(bird.physical_length_cm.as_str())));
    field(
        &mut lines,
        "Wingspan (cm)",
        text_or_placeholder(Some(bird.physical_wingspan_cm.as_str())),
    );
    field(&mut lines, "Weight (g)", text_or_placeholder(Some(bird.physical_weight_g.as_str())));
    field(&mut lines, "Diet", text_or_placeholder(Some(bird.diet.as_str())));
    field(
        &mut lines,
        "Conservation",
        text_or_placeholder(Some(bird.conservation_status.as_str())),
    );
    field(&mut lines, "Image", text_or_placeholder(bird.image_url.as_deref()));

    if !bird.description.trim().is_empty() {
        lines.push(String::new());
        lines.push(format!("  {}", bird.description.trim()));
    }

    lines.join("\n")
}

/// Catalog table.
pub fn render_species_table(birds: &[&Bird]) -> String {
    if birds.is_empty() {
        return "No species found.".to_string();
    }

    let mut lines = vec![format!(
        "{:<6} {:<24} {:<20} {}",
        "ID", "Common name", "Localized name", "Scientific name"
    )];
    for bird in birds {
        lines.push(format!(
            "{:<6} {:<24} {:<20} {}",
            bird.id,
            text_or_placeholder(Some(bird.name.as_str())),
            text_or_placeholder(bird.thai_name.as_deref()),
            text_or_placeholder(Some(bird.scientific_name.as_str()))
        ));
    }
    lines.push(format!("{} species", birds.len()));
    lines.join("\n")
}

/// Dashboard counters.
pub fn render_dashboard_stats(stats: &DashboardStats) -> String {
    [
        format!("  {:<16} {}", "Species", stats.total_species),
        format!("  {:<16} {}", "Active users", stats.active_users),
        format!("  {:<16} {}", "Locations", stats.locations),
        format!("  {:<16} {}", "This month", stats.this_month),
    ]
    .join("\n")
}

/// Dashboard species table.
pub fn render_dashboard_table(records: &[&DashboardBird]) -> String {
    if records.is_empty() {
        return "No species match.".to_string();
    }

    let mut lines = vec![format!(
        "{:<6} {:<24} {:>10} {:<9} {:>9} {:>10} {:>9}  {}",
        "ID", "Common name", "Confidence", "Status", "Sightings", "Recordings", "Accuracy", "Feedback"
    )];
    for record in records {
        lines.push(format!(
            "{:<6} {:<24} {:>10} {:<9} {:>9} {:>10} {:>9}  {}",
            record.bird.id,
            text_or_placeholder(Some(record.bird.name.as_str())),
            record
                .confidence
                .map_or_else(|| PLACEHOLDER_NUMBER.to_string(), format_percent),
            record
                .status
                .map_or_else(|| PLACEHOLDER_TEXT.to_string(), |s| s.to_string()),
            number_or_placeholder(record.sightings),
            number_or_placeholder(record.recordings),
            record
                .accuracy_rate
                .map_or_else(|| PLACEHOLDER_NUMBER.to_string(), format_percent),
            if record.needs_feedback { "needed" } else { "" }
        ));
    }
    lines.push(format!("{} species", records.len()));
    lines.join("\n")
}

/// Hotspot list for the sightings view.
pub fn render_hotspots(hotspots: &[Hotspot], map_enabled: bool) -> String {
    let mut lines = Vec::new();
    if hotspots.is_empty() {
        lines.push("No sightings.".to_string());
    }

    for spot in hotspots {
        lines.push(format!(
            "{} [{} activity]",
            spot.location, spot.activity
        ));
        field(&mut lines, "Sightings", &spot.sightings.to_string());
        field(&mut lines, "Recordings", &spot.recordings.to_string());
        field(&mut lines, "Species", &spot.species.join(", "));
    }

    if !map_enabled {
        lines.push(String::new());
        lines.push("Map view disabled: no map API key configured.".to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::AudioUpload;
    use crate::catalog::hotspots;
    use crate::data::mock::{mock_bird, mock_dashboard_birds, mock_prediction};
    use chrono::Utc;

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(92.1), "92.1% confidence");
        assert_eq!(format_confidence(45.0), "45% confidence");
        assert_eq!(format_confidence(75.43), "75.43% confidence");
    }

    #[test]
    fn test_prediction_keeps_received_precision() {
        let prediction: Prediction = serde_json::from_str(
            r#"{"id": "p2", "predicted_bird": "Asian Koel", "confidence": 75.43,
                "alternative_predictions": [{"bird_name": "Common Myna", "confidence": 12.345}]}"#,
        )
        .unwrap();
        let text = render_prediction(&prediction);
        assert!(text.contains("Asian Koel (75.43% confidence)"));
        assert!(text.contains("1. Common Myna (12.345%)"));
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(text_or_placeholder(None), PLACEHOLDER_TEXT);
        assert_eq!(text_or_placeholder(Some("  ")), PLACEHOLDER_TEXT);
        assert_eq!(text_or_placeholder(Some("x")), "x");
        assert_eq!(number_or_placeholder::<u64>(None), PLACEHOLDER_NUMBER);
        assert_eq!(number_or_placeholder(Some(12)), "12");
    }

    #[test]
    fn test_prediction_shows_label_and_alternatives_in_order() {
        let upload = AudioUpload::new("call.wav", vec![0; 4]).unwrap();
        let text = render_prediction(&mock_prediction(&upload, None, Utc::now()));

        assert!(text.contains("Eurasian Tree Sparrow"));
        assert!(text.contains("92.1% confidence"));
        let myna = text.find("1. Common Myna").unwrap();
        let crow = text.find("2. Eastern Jungle Crow").unwrap();
        let dove = text.find("3. Red Collared Dove").unwrap();
        assert!(myna < crow && crow < dove);
    }

    #[test]
    fn test_prediction_with_missing_fields_uses_placeholders() {
        let prediction: Prediction = serde_json::from_str(
            r#"{"id": "p1", "predicted_bird": "Common Myna", "confidence": 78.3}"#,
        )
        .unwrap();
        let text = render_prediction(&prediction);
        assert!(text.contains("78.3% confidence"));
        assert!(text.contains(&format!("File             {PLACEHOLDER_TEXT}")));
        assert!(text.contains(&format!("Size (bytes)     {PLACEHOLDER_NUMBER}")));
        assert!(!text.contains("Alternatives:"));
    }

    #[test]
    fn test_bird_detail() {
        let text = render_bird(&mock_bird("b002").unwrap());
        assert!(text.starts_with("Common Myna (b002)"));
        assert!(text.contains("นกเอี้ยงสาริกา"));
        assert!(text.contains(&format!("Image            {PLACEHOLDER_TEXT}")));
    }

    #[test]
    fn test_dashboard_table_counts_rows() {
        let records = mock_dashboard_birds();
        let refs: Vec<_> = records.iter().collect();
        let text = render_dashboard_table(&refs);
        assert!(text.ends_with("5 species"));
        assert!(text.contains("94.2%"));
    }

    #[test]
    fn test_hotspots_mention_missing_map_key() {
        let text = render_hotspots(&hotspots(&mock_dashboard_birds()), false);
        assert!(text.contains("[high activity]"));
        assert!(text.contains("Map view disabled"));
    }
}
