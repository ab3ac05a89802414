//! Dashboard aggregate container.

use super::mock::{mock_dashboard_birds, mock_dashboard_stats};
use super::state::{Fetched, Resource, ResourceState};
use crate::api::{ApiClient, DashboardBird, DashboardStats};
use crate::config::FallbackPolicy;
use std::sync::Arc;

/// Dashboard species metrics and headline counters.
///
/// The two halves load independently; one can fall back while the other is
/// live.
#[derive(Debug)]
pub struct Dashboard {
    client: Arc<ApiClient>,
    policy: FallbackPolicy,
    species: Resource<Vec<DashboardBird>>,
    stats: Resource<DashboardStats>,
}

impl Dashboard {
    /// Create the container.
    pub fn new(client: Arc<ApiClient>, policy: FallbackPolicy) -> Self {
        Self {
            client,
            policy,
            species: Resource::new(true),
            stats: Resource::new(true),
        }
    }

    /// Fetch the species metrics.
    pub async fn fetch_species(&self) -> Fetched<Vec<DashboardBird>> {
        self.species
            .load(self.client.get_dashboard_birds(), self.policy, || {
                Some(mock_dashboard_birds())
            })
            .await
    }

    /// Fetch the headline counters.
    pub async fn fetch_stats(&self) -> Fetched<DashboardStats> {
        self.stats
            .load(self.client.get_dashboard_stats(), self.policy, || {
                Some(mock_dashboard_stats())
            })
            .await
    }

    /// Fetch both halves concurrently.
    pub async fn fetch(&self) -> (Fetched<Vec<DashboardBird>>, Fetched<DashboardStats>) {
        tokio::join!(self.fetch_species(), self.fetch_stats())
    }

    /// Current species state.
    pub fn species_state(&self) -> ResourceState<Vec<DashboardBird>> {
        self.species.snapshot()
    }

    /// Current stats state.
    pub fn stats_state(&self) -> ResourceState<DashboardStats> {
        self.stats.snapshot()
    }
}
