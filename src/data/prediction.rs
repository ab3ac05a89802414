//! Prediction containers.

use super::mock::mock_prediction;
use super::state::{Fetched, Resource, ResourceState};
use crate::api::{ApiClient, AudioUpload, Prediction, UploadMetadata};
use crate::config::FallbackPolicy;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;

/// Uploads recordings for classification.
#[derive(Debug)]
pub struct PredictionSubmitter {
    client: Arc<ApiClient>,
    policy: FallbackPolicy,
    state: Resource<Prediction>,
}

impl PredictionSubmitter {
    /// Create the container. Nothing is in flight until [`Self::predict`].
    pub fn new(client: Arc<ApiClient>, policy: FallbackPolicy) -> Self {
        Self {
            client,
            policy,
            state: Resource::new(false),
        }
    }

    /// Upload `upload` and return the classification.
    ///
    /// Under the permissive policy a failed upload yields a synthesized
    /// sample prediction carrying the upload's file details.
    pub async fn predict(
        &self,
        upload: &AudioUpload,
        metadata: Option<&UploadMetadata>,
    ) -> Fetched<Prediction> {
        self.state
            .load(
                self.client.upload_audio_for_prediction(upload, metadata),
                self.policy,
                || Some(mock_prediction(upload, metadata, Utc::now())),
            )
            .await
    }

    /// Current state.
    pub fn state(&self) -> ResourceState<Prediction> {
        self.state.snapshot()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<Prediction>> {
        self.state.subscribe()
    }
}

/// Looks up a stored prediction. Never substitutes sample data.
#[derive(Debug)]
pub struct PredictionLookup {
    client: Arc<ApiClient>,
    state: Resource<Prediction>,
}

impl PredictionLookup {
    /// Create the container.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: Resource::new(true),
        }
    }

    /// Fetch prediction `id`.
    pub async fn fetch(&self, id: &str) -> Fetched<Prediction> {
        self.state
            .load(
                self.client.get_prediction_by_id(id),
                FallbackPolicy::Strict,
                || None,
            )
            .await
    }

    /// Current state.
    pub fn state(&self) -> ResourceState<Prediction> {
        self.state.snapshot()
    }
}

/// All stored predictions. Never substitutes sample data.
#[derive(Debug)]
pub struct PredictionHistory {
    client: Arc<ApiClient>,
    state: Resource<Vec<Prediction>>,
}

impl PredictionHistory {
    /// Create the container.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: Resource::new(true),
        }
    }

    /// Fetch every stored prediction.
    pub async fn fetch(&self) -> Fetched<Vec<Prediction>> {
        self.state
            .load(
                self.client.get_all_predictions(),
                FallbackPolicy::Strict,
                || None,
            )
            .await
    }

    /// Current state.
    pub fn state(&self) -> ResourceState<Vec<Prediction>> {
        self.state.snapshot()
    }
}
