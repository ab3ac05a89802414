//! Sighting hotspots grouped by location.

use crate::api::DashboardBird;
use crate::constants::activity::{HIGH_SIGHTINGS, MEDIUM_SIGHTINGS};
use crate::constants::PLACEHOLDER_TEXT;
use serde::Serialize;
use std::collections::BTreeMap;

/// Map marker intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Fewer than the medium threshold.
    Low,
    /// Between the medium and high thresholds.
    Medium,
    /// At or above the high threshold.
    High,
}

impl ActivityLevel {
    /// Classify a sightings total.
    pub fn from_sightings(total: u64) -> Self {
        if total >= HIGH_SIGHTINGS {
            Self::High
        } else if total >= MEDIUM_SIGHTINGS {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Sightings at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hotspot {
    /// Location text as reported by the service.
    pub location: String,
    /// Species seen there, in input order.
    pub species: Vec<String>,
    /// Sum of sightings.
    pub sightings: u64,
    /// Sum of recordings.
    pub recordings: u64,
    /// Marker intensity.
    pub activity: ActivityLevel,
}

/// Group dashboard records by location, busiest first. Ties keep
/// alphabetical location order; records without a location are grouped
/// under the placeholder.
pub fn hotspots(records: &[DashboardBird]) -> Vec<Hotspot> {
    let mut by_location: BTreeMap<&str, Hotspot> = BTreeMap::new();

    for record in records {
        let location = record
            .found
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(PLACEHOLDER_TEXT);

        let spot = by_location.entry(location).or_insert_with(|| Hotspot {
            location: location.to_string(),
            species: Vec::new(),
            sightings: 0,
            recordings: 0,
            activity: ActivityLevel::Low,
        });
        spot.species.push(record.bird.name.clone());
        spot.sightings = spot.sightings.saturating_add(record.sightings.unwrap_or(0));
        spot.recordings = spot
            .recordings
            .saturating_add(record.recordings.unwrap_or(0));
    }

    let mut spots: Vec<Hotspot> = by_location
        .into_values()
        .map(|mut spot| {
            spot.activity = ActivityLevel::from_sightings(spot.sightings);
            spot
        })
        .collect();
    spots.sort_by(|a, b| b.sightings.cmp(&a.sightings));
    spots
}
