//! In-process fake of the identification service for integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// Mutable behaviour and recorded requests of the fake service.
#[derive(Debug)]
pub struct BackendState {
    /// `/health` answers 200 while set, 503 otherwise.
    pub online: AtomicBool,
    /// Uploads answer 500 while set.
    pub fail_uploads: AtomicBool,
    /// Stored predictions.
    pub predictions: Mutex<Vec<Value>>,
    /// Received feedback as `(prediction id, body)`.
    pub feedback: Mutex<Vec<(String, Value)>>,
    /// Received multipart text fields of the last upload.
    pub last_upload_fields: Mutex<Vec<(String, String)>>,
    next_id: AtomicU32,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            online: AtomicBool::new(true),
            fail_uploads: AtomicBool::new(false),
            predictions: Mutex::new(Vec::new()),
            feedback: Mutex::new(Vec::new()),
            last_upload_fields: Mutex::new(Vec::new()),
            next_id: AtomicU32::new(1),
        }
    }
}

/// A running fake service.
pub struct FakeBackend {
    /// Versioned base URL, e.g. `http://127.0.0.1:41234/api/v1`.
    pub base_url: String,
    /// Shared state.
    pub state: Arc<BackendState>,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start the fake service on an ephemeral port.
pub async fn spawn_backend() -> FakeBackend {
    let state = Arc::new(BackendState::default());

    let api = Router::new()
        .route("/health", get(health))
        .route("/birds", get(list_birds).post(create_bird))
        .route("/birds/dashboard", get(dashboard_birds))
        .route(
            "/birds/{id}",
            get(get_bird).put(update_bird).delete(delete_bird),
        )
        .route("/dashboard/stats", get(dashboard_stats))
        .route("/predictions", get(list_predictions).post(upload))
        .route(
            "/predictions/{id}",
            get(get_prediction).delete(delete_prediction),
        )
        .route("/predictions/{id}/feedback", post(feedback))
        .with_state(state.clone());
    let app = Router::new().nest("/api/v1", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let task = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeBackend {
        base_url: format!("http://{addr}/api/v1"),
        state,
        task,
    }
}

/// Base URL of a port nothing listens on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api/v1")
}

fn catalog() -> Vec<Value> {
    vec![
        json!({
            "id": "s1",
            "name": "House Sparrow",
            "thai_name": "นกกระจอกใหญ่",
            "scientific_name": "Passer domesticus",
            "habitats": "Towns, farms",
            "conservation_status": "Least Concern"
        }),
        json!({
            "id": "s2",
            "name": "Asian Koel",
            "thai_name": "นกกาเหว่า",
            "scientific_name": "Eudynamys scolopaceus",
            "conservation_status": "Least Concern"
        }),
        json!({
            "id": "s3",
            "name": "Olive-backed Sunbird",
            "scientific_name": "Cinnyris jugularis"
        }),
    ]
}

async fn health(State(state): State<Arc<BackendState>>) -> Response {
    if state.online.load(Ordering::SeqCst) {
        (StatusCode::OK, "OK").into_response()
    } else {
        StatusCode::SERVICE_UNAVAILABLE.into_response()
    }
}

async fn list_birds() -> Json<Vec<Value>> {
    Json(catalog())
}

async fn get_bird(Path(id): Path<String>) -> Response {
    catalog()
        .into_iter()
        .find(|b| b["id"] == id.as_str())
        .map_or_else(
            || StatusCode::NOT_FOUND.into_response(),
            |b| Json(b).into_response(),
        )
}

async fn create_bird(Json(mut body): Json<Value>) -> (StatusCode, Json<Value>) {
    body["id"] = json!("s100");
    (StatusCode::CREATED, Json(body))
}

async fn update_bird(Path(id): Path<String>, Json(patch): Json<Value>) -> Response {
    let Some(mut bird) = catalog().into_iter().find(|b| b["id"] == id.as_str()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let (Some(target), Some(changes)) = (bird.as_object_mut(), patch.as_object()) {
        for (key, value) in changes {
            target.insert(key.clone(), value.clone());
        }
    }
    Json(bird).into_response()
}

async fn delete_bird(Path(id): Path<String>) -> StatusCode {
    if catalog().iter().any(|b| b["id"] == id.as_str()) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn dashboard_birds() -> Json<Vec<Value>> {
    Json(vec![
        json!({
            "id": "s1",
            "name": "House Sparrow",
            "thai_name": "นกกระจอกใหญ่",
            "scientific_name": "Passer domesticus",
            "confidence": 88.0,
            "found": "Bangkok, Lat Krabang",
            "status": "active",
            "sightings": 240,
            "recordings": 31,
            "needs_feedback": false,
            "accuracy_rate": 90.5
        }),
        json!({
            "id": "s2",
            "name": "Asian Koel",
            "scientific_name": "Eudynamys scolopaceus",
            "confidence": 71.2,
            "found": "Chiang Mai, Mueang",
            "status": "inactive",
            "sightings": 12,
            "needs_feedback": true
        }),
    ])
}

async fn dashboard_stats() -> Json<Value> {
    Json(json!({
        "total_species": 3,
        "active_users": 17,
        "locations": 2,
        "this_month": 9
    }))
}

async fn upload(State(state): State<Arc<BackendState>>, mut multipart: Multipart) -> Response {
    if state.fail_uploads.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let mut file_name = None;
    let mut file_size = 0usize;
    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            file_name = field.file_name().map(str::to_string);
            file_size = field.bytes().await.map(|b| b.len()).unwrap_or_default();
        } else {
            fields.push((name, field.text().await.unwrap_or_default()));
        }
    }

    let Some(file_name) = file_name else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let id = format!("pred-{}", state.next_id.fetch_add(1, Ordering::SeqCst));
    let prediction = json!({
        "id": id,
        "predicted_bird": "Asian Koel",
        "confidence": 81.4,
        "metadata": {
            "file_name": file_name,
            "file_size": file_size,
            "format": "WAV"
        },
        "alternative_predictions": [
            {"bird_name": "Greater Coucal", "confidence": 40.2},
            {"bird_name": "Common Myna", "confidence": 12.9}
        ]
    });

    *state.last_upload_fields.lock().unwrap() = fields;
    state.predictions.lock().unwrap().push(prediction.clone());
    (StatusCode::CREATED, Json(prediction)).into_response()
}

async fn list_predictions(State(state): State<Arc<BackendState>>) -> Json<Vec<Value>> {
    Json(state.predictions.lock().unwrap().clone())
}

async fn get_prediction(State(state): State<Arc<BackendState>>, Path(id): Path<String>) -> Response {
    state
        .predictions
        .lock()
        .unwrap()
        .iter()
        .find(|p| p["id"] == id.as_str())
        .cloned()
        .map_or_else(
            || StatusCode::NOT_FOUND.into_response(),
            |p| Json(p).into_response(),
        )
}

async fn delete_prediction(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
) -> StatusCode {
    let mut predictions = state.predictions.lock().unwrap();
    let before = predictions.len();
    predictions.retain(|p| p["id"] != id.as_str());
    if predictions.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn feedback(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    let known = state
        .predictions
        .lock()
        .unwrap()
        .iter()
        .any(|p| p["id"] == id.as_str());
    if !known {
        return StatusCode::NOT_FOUND;
    }
    state.feedback.lock().unwrap().push((id, body));
    StatusCode::CREATED
}
