//! Data-access layer.
//!
//! One container per entity. Each wraps a transport call, publishes
//! `{data, loading, error}` through a `watch` channel, and applies the
//! configured [`FallbackPolicy`](crate::config::FallbackPolicy) when the
//! service cannot be reached.

mod dashboard;
mod feedback;
mod health;
pub mod mock;
mod prediction;
mod species;
mod state;

pub use dashboard::Dashboard;
pub use feedback::{FeedbackDraft, FeedbackSubmitter};
pub use health::{
    HealthMonitorHandle, HealthStatus, MIN_HEALTH_INTERVAL, check_health, spawn_health_monitor,
};
pub use prediction::{PredictionHistory, PredictionLookup, PredictionSubmitter};
pub use species::{SpeciesCatalog, SpeciesDetail};
pub use state::{Fetched, ResourceState, error_message};
