//! Data-access containers against the fake service and an unreachable one.

#![allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]

mod common;

use birdid::Error;
use birdid::api::{ApiClient, AudioUpload, FeedbackRating, UploadMetadata};
use birdid::config::FallbackPolicy;
use birdid::data::mock::{MOCK_CONFIDENCE, MOCK_PREDICTED_BIRD, mock_birds};
use birdid::data::{
    Dashboard, FeedbackDraft, FeedbackSubmitter, Fetched, HealthStatus, PredictionHistory,
    PredictionLookup, PredictionSubmitter, SpeciesCatalog, SpeciesDetail, spawn_health_monitor,
};
use common::{spawn_backend, unreachable_url};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::sync::watch;

fn offline_client() -> Arc<ApiClient> {
    Arc::new(ApiClient::new(&unreachable_url()).unwrap())
}

async fn wait_for(rx: &mut watch::Receiver<HealthStatus>, wanted: HealthStatus, within: Duration) {
    tokio::time::timeout(within, rx.wait_for(|status| *status == wanted))
        .await
        .unwrap_or_else(|_| panic!("status did not become {wanted} within {within:?}"))
        .unwrap();
}

#[tokio::test]
async fn test_every_sample_species_is_served_offline() {
    let detail = SpeciesDetail::new(offline_client(), FallbackPolicy::Permissive);

    for sample in mock_birds() {
        let fetched = detail.fetch(&sample.id).await;
        assert!(fetched.is_fallback(), "{} should fall back", sample.id);
        assert_eq!(fetched.data(), Some(&sample));
    }
}

#[tokio::test]
async fn test_unknown_species_fails_offline() {
    let detail = SpeciesDetail::new(offline_client(), FallbackPolicy::Permissive);
    let fetched = detail.fetch("b999").await;
    assert!(matches!(fetched, Fetched::Failed(_)));
    assert!(detail.state().data.is_none());
    assert!(!detail.state().loading);
}

#[tokio::test]
async fn test_failed_list_fetch_keeps_error_and_sample_data() {
    let catalog = SpeciesCatalog::new(offline_client(), FallbackPolicy::Permissive);
    let mut rx = catalog.subscribe();
    assert!(catalog.state().loading);

    let fetched = catalog.fetch().await;

    rx.changed().await.unwrap();
    let state = rx.borrow_and_update().clone();
    assert!(!state.loading);
    assert!(!state.error.as_deref().unwrap_or_default().is_empty());
    assert_eq!(state.data.map(|d| d.len()), Some(5));
    assert!(fetched.is_fallback());
}

#[tokio::test]
async fn test_strict_policy_never_substitutes() {
    let catalog = SpeciesCatalog::new(offline_client(), FallbackPolicy::Strict);
    let fetched = catalog.fetch().await;
    assert!(fetched.data().is_none());
    let state = catalog.state();
    assert!(state.data.is_none());
    assert!(state.error.is_some());
    assert!(!state.loading);
}

#[tokio::test]
async fn test_refetch_replaces_fallback_with_live_data() {
    let backend = spawn_backend().await;
    let client = Arc::new(ApiClient::new(&backend.base_url).unwrap());
    let catalog = SpeciesCatalog::new(client, FallbackPolicy::Permissive);

    let fetched = catalog.refetch().await;
    assert!(fetched.is_live());
    let state = catalog.state();
    assert_eq!(state.data.unwrap()[0].name, "House Sparrow");
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_dashboard_halves_fall_back_together() {
    let dashboard = Dashboard::new(offline_client(), FallbackPolicy::Permissive);
    let (species, stats) = dashboard.fetch().await;
    assert!(species.is_fallback());
    assert_eq!(stats.data().unwrap().total_species, 1247);
    assert!(!dashboard.species_state().loading);
    assert!(!dashboard.stats_state().loading);
}

#[tokio::test]
async fn test_offline_prediction_is_synthesized() {
    let submitter = PredictionSubmitter::new(offline_client(), FallbackPolicy::Permissive);
    let upload = AudioUpload::new("garden.wav", vec![0; 64]).unwrap();
    let metadata = UploadMetadata {
        user_notes: Some("morning".to_string()),
        ..UploadMetadata::default()
    };

    let fetched = submitter.predict(&upload, Some(&metadata)).await;
    let prediction = fetched.data().unwrap();
    assert_eq!(prediction.predicted_bird, MOCK_PREDICTED_BIRD);
    assert_eq!(prediction.confidence, MOCK_CONFIDENCE);
    assert_eq!(prediction.metadata.file_name.as_deref(), Some("garden.wav"));
    assert_eq!(prediction.metadata.user_notes.as_deref(), Some("morning"));
    assert!(submitter.state().error.is_some());
}

#[tokio::test]
async fn test_prediction_round_trip_through_containers() {
    let backend = spawn_backend().await;
    let client = Arc::new(ApiClient::new(&backend.base_url).unwrap());

    let submitter = PredictionSubmitter::new(client.clone(), FallbackPolicy::Permissive);
    let upload = AudioUpload::new("koel.flac", vec![3; 100]).unwrap();
    let created = submitter.predict(&upload, None).await;
    assert!(created.is_live());
    let created = created.data().unwrap().clone();

    let lookup = PredictionLookup::new(client.clone());
    let fetched = lookup.fetch(&created.id).await;
    let fetched = fetched.data().unwrap();
    assert_eq!(fetched.predicted_bird, created.predicted_bird);
    assert_eq!(fetched.confidence, created.confidence);

    let history = PredictionHistory::new(client);
    assert_eq!(history.fetch().await.data().unwrap().len(), 1);
}

#[tokio::test]
async fn test_lookup_never_falls_back() {
    let lookup = PredictionLookup::new(offline_client());
    let fetched = lookup.fetch("prediction_1").await;
    assert!(matches!(fetched, Fetched::Failed(_)));
}

#[tokio::test]
async fn test_feedback_without_rating_is_rejected_before_sending() {
    let backend = spawn_backend().await;
    let client = Arc::new(ApiClient::new(&backend.base_url).unwrap());
    let submitter = FeedbackSubmitter::new(client);

    let result = submitter.submit("pred-1", &FeedbackDraft::default()).await;
    assert!(matches!(result, Err(Error::MissingRating)));
    assert!(backend.state.feedback.lock().unwrap().is_empty());
    assert!(!submitter.submitted());
}

#[tokio::test]
async fn test_feedback_submission() {
    let backend = spawn_backend().await;
    let client = Arc::new(ApiClient::new(&backend.base_url).unwrap());
    let upload = AudioUpload::new("koel.wav", vec![0; 8]).unwrap();
    let prediction = client
        .upload_audio_for_prediction(&upload, None)
        .await
        .unwrap();

    let submitter = FeedbackSubmitter::new(client);
    let draft = FeedbackDraft {
        rating: Some(FeedbackRating::Correct),
        comments: "  clear call  ".to_string(),
        ..FeedbackDraft::default()
    };
    let fetched = submitter.submit(&prediction.id, &draft).await.unwrap();
    assert!(fetched.is_live());
    assert!(submitter.submitted());

    let received = backend.state.feedback.lock().unwrap().clone();
    assert_eq!(received[0].1["comments"], "clear call");
    assert_eq!(received[0].1["confidence"], 5);
}

#[tokio::test]
async fn test_feedback_failure_is_reported() {
    let submitter = FeedbackSubmitter::new(offline_client());
    let draft = FeedbackDraft {
        rating: Some(FeedbackRating::Unsure),
        ..FeedbackDraft::default()
    };
    let fetched = submitter.submit("pred-1", &draft).await.unwrap();
    assert!(matches!(fetched, Fetched::Failed(_)));
    assert!(!submitter.submitted());
}

#[tokio::test]
async fn test_health_monitor_tracks_service() {
    let backend = spawn_backend().await;
    backend.state.online.store(false, Ordering::SeqCst);
    let client = Arc::new(ApiClient::new(&backend.base_url).unwrap());

    let interval = Duration::from_millis(200);
    let slack = Duration::from_millis(150);
    let monitor = spawn_health_monitor(client, interval);
    let mut rx = monitor.subscribe();

    wait_for(&mut rx, HealthStatus::Offline, interval + slack).await;

    backend.state.online.store(true, Ordering::SeqCst);
    wait_for(&mut rx, HealthStatus::Online, interval + slack).await;
    assert_eq!(monitor.status(), HealthStatus::Online);

    monitor.stop().await;
}

#[tokio::test]
async fn test_health_monitor_stops_on_cancel() {
    let monitor = spawn_health_monitor(offline_client(), Duration::from_millis(50));
    let mut rx = monitor.subscribe();
    monitor.cancellation_token().cancel();

    let closed = tokio::time::timeout(Duration::from_secs(2), async {
        while rx.changed().await.is_ok() {}
    })
    .await;
    assert!(closed.is_ok());
}
