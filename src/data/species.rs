//! Species catalog containers.

use super::mock::{mock_bird, mock_birds};
use super::state::{Fetched, Resource, ResourceState};
use crate::api::{ApiClient, Bird};
use crate::config::FallbackPolicy;
use std::sync::Arc;
use tokio::sync::watch;

/// The full species list.
#[derive(Debug)]
pub struct SpeciesCatalog {
    client: Arc<ApiClient>,
    policy: FallbackPolicy,
    state: Resource<Vec<Bird>>,
}

impl SpeciesCatalog {
    /// Create the container. It reports `loading` until the first fetch resolves.
    pub fn new(client: Arc<ApiClient>, policy: FallbackPolicy) -> Self {
        Self {
            client,
            policy,
            state: Resource::new(true),
        }
    }

    /// Fetch the catalog, substituting the sample catalog on failure.
    pub async fn fetch(&self) -> Fetched<Vec<Bird>> {
        self.state
            .load(self.client.get_all_birds(), self.policy, || {
                Some(mock_birds())
            })
            .await
    }

    /// Fetch again, replacing whatever is currently held.
    pub async fn refetch(&self) -> Fetched<Vec<Bird>> {
        self.fetch().await
    }

    /// Current state.
    pub fn state(&self) -> ResourceState<Vec<Bird>> {
        self.state.snapshot()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<Vec<Bird>>> {
        self.state.subscribe()
    }
}

/// A single species looked up by id.
#[derive(Debug)]
pub struct SpeciesDetail {
    client: Arc<ApiClient>,
    policy: FallbackPolicy,
    state: Resource<Bird>,
}

impl SpeciesDetail {
    /// Create the container.
    pub fn new(client: Arc<ApiClient>, policy: FallbackPolicy) -> Self {
        Self {
            client,
            policy,
            state: Resource::new(true),
        }
    }

    /// Fetch species `id`. On failure the sample record with the same id is
    /// substituted when one exists.
    pub async fn fetch(&self, id: &str) -> Fetched<Bird> {
        if id.trim().is_empty() {
            let fetched = Fetched::Failed("no species id given".to_string());
            self.state.publish(&fetched);
            return fetched;
        }

        self.state
            .load(self.client.get_bird_by_id(id), self.policy, || mock_bird(id))
            .await
    }

    /// Current state.
    pub fn state(&self) -> ResourceState<Bird> {
        self.state.snapshot()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<Bird>> {
        self.state.subscribe()
    }
}
