//! Client-side catalog views: search, status filters and location summaries.

pub mod filter;
pub mod sightings;

pub use filter::{Named, StatusFilter, filter_dashboard, matches_search, search};
pub use sightings::{ActivityLevel, Hotspot, hotspots};
